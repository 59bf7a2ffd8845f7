use crate::session_cache::SessionSnapshot;

/// Most recent visits included in the advisory context.
pub const MAX_CONTEXT_VISITS: usize = 3;

/// Render the snapshot as the advisory context block.
///
/// Section order is fixed. Sections with nothing to show are left out
/// entirely, header included.
pub fn compile_context(session: &SessionSnapshot) -> String {
    let mut parts = vec![identity_line(session)];

    if !session.chronic_diseases().is_empty() {
        let diseases: Vec<String> = session
            .chronic_diseases()
            .iter()
            .map(|d| format!("{} ({})", d.name, opt(&d.severity)))
            .collect();
        parts.push(format!("Chronic diseases: {}", diseases.join(", ")));
    }

    if !session.allergies().is_empty() {
        let allergies: Vec<String> = session
            .allergies()
            .iter()
            .map(|a| format!("{} ({})", a.allergen, opt(&a.reaction)))
            .collect();
        parts.push(format!("Allergies: {}", allergies.join(", ")));
    }

    if !session.medications().is_empty() {
        let meds: Vec<String> = session
            .medications()
            .iter()
            .map(|m| {
                join_present(&[
                    Some(m.drug_name.as_str()),
                    m.dose.as_deref(),
                    m.frequency.as_deref(),
                ])
            })
            .collect();
        parts.push(format!("Current medications: {}", meds.join(", ")));
    }

    if !session.surgeries().is_empty() {
        let surgeries: Vec<String> = session
            .surgeries()
            .iter()
            .map(|s| format!("{} ({})", s.name, opt_date(s.date)))
            .collect();
        parts.push(format!("Previous surgeries: {}", surgeries.join(", ")));
    }

    if !session.visits().is_empty() {
        parts.push("Recent visits:".to_string());
        for v in session.visits().iter().take(MAX_CONTEXT_VISITS) {
            parts.push(format!(
                "  - {}: {} -> {}",
                opt_date(v.visit_date),
                opt(&v.reason),
                opt(&v.diagnosis)
            ));
        }
    }

    if !session.abnormal_labs().is_empty() {
        parts.push("Abnormal lab results:".to_string());
        for lab in session.abnormal_labs() {
            parts.push(format!(
                "  - {}: {} (normal: {})",
                lab.test_name,
                opt(&lab.result_value),
                opt(&lab.normal_range)
            ));
        }
    }

    if !session.contraindications().is_empty() {
        parts.push("Contraindicated substances:".to_string());
        for rule in session.contraindications() {
            parts.push(format!(
                "  - {} ({}): {}",
                rule.substance,
                rule.risk_level.as_str(),
                opt(&rule.reason)
            ));
        }
    }

    if !session.current_vitals().is_empty() {
        parts.push("Current vitals:".to_string());
        for (key, value) in session.current_vitals().iter() {
            parts.push(format!("  - {key}: {value}"));
        }
    }

    parts.join("\n")
}

fn identity_line(session: &SessionSnapshot) -> String {
    let p = session.patient();
    format!(
        "Patient: {} | {} years | {} | Blood type: {}",
        p.name,
        p.age.map(|a| a.to_string()).unwrap_or_default(),
        opt(&p.sex),
        opt(&p.blood_type),
    )
}

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

fn opt_date(date: Option<chrono::NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_default()
}

fn join_present(fields: &[Option<&str>]) -> String {
    fields
        .iter()
        .flatten()
        .filter(|f| !f.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}
