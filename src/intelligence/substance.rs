use std::collections::HashSet;

use crate::intelligence::messages::MessageTemplates;
use crate::models::{Alert, AlertOrigin, AlertType, Allergy, Contraindication, RiskLevel};
use crate::session_cache::SessionSnapshot;

// ---------------------------------------------------------------------------
// Single substance
// ---------------------------------------------------------------------------

/// Check one substance name against the patient's contraindications and
/// allergies. Blank input yields no alerts.
///
/// Matching is case-insensitive substring in either direction, so partial
/// and combined names ("Magnesium Sulfate" against "Magnesium") both hit.
pub fn check_substance(session: &SessionSnapshot, substance: &str) -> Vec<Alert> {
    let query = substance.trim();
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    let rule_alerts = session
        .contraindications()
        .iter()
        .filter(|rule| names_overlap(&needle, &rule.substance))
        .map(|rule| contraindication_alert(query, rule));

    let allergy_alerts = session
        .allergies()
        .iter()
        .filter(|allergy| names_overlap(&needle, &allergy.allergen))
        .map(allergy_alert);

    rule_alerts.chain(allergy_alerts).collect()
}

// ---------------------------------------------------------------------------
// Free text
// ---------------------------------------------------------------------------

/// Scan free text for every known substance and allergen, check each hit,
/// and drop repeats (first one wins). A repeat shares a title, or points at
/// the same contraindication rule or allergy record through another name.
pub fn check_multiple_substances(session: &SessionSnapshot, text: &str) -> Vec<Alert> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let haystack = text.to_lowercase();

    let alerts: Vec<Alert> = known_substance_names(session)
        .into_iter()
        .filter(|name| haystack.contains(&name.to_lowercase()))
        .flat_map(|name| check_substance(session, name))
        .collect();

    dedup_alerts(alerts)
}

/// Every rule substance and allergen name, rules first, without
/// case-insensitive repeats. Blank names are skipped.
pub fn known_substance_names(session: &SessionSnapshot) -> Vec<&str> {
    let mut seen = HashSet::new();
    session
        .contraindications()
        .iter()
        .map(|rule| rule.substance.trim())
        .chain(session.allergies().iter().map(|a| a.allergen.trim()))
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(name.to_lowercase()))
        .collect()
}

pub(crate) fn dedup_alerts(alerts: Vec<Alert>) -> Vec<Alert> {
    let mut titles = HashSet::new();
    let mut sources = HashSet::new();
    alerts
        .into_iter()
        .filter(|alert| {
            let new_source = match alert.origin {
                AlertOrigin::Contraindication { .. } | AlertOrigin::Allergy { .. } => {
                    !sources.contains(&alert.origin)
                }
                AlertOrigin::Vital { .. } | AlertOrigin::Workflow => true,
            };
            if new_source && titles.insert(alert.title.clone()) {
                sources.insert(alert.origin.clone());
                true
            } else {
                false
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `needle` must already be lowercase.
fn names_overlap(needle: &str, candidate: &str) -> bool {
    let candidate = candidate.trim().to_lowercase();
    !candidate.is_empty() && (candidate.contains(needle) || needle.contains(&candidate))
}

fn contraindication_alert(queried: &str, rule: &Contraindication) -> Alert {
    Alert {
        alert_type: rule.risk_level.alert_type(),
        title: MessageTemplates::contraindication_title(
            rule.risk_level,
            queried,
            &rule.disease_name,
        ),
        message: rule.reason.clone().unwrap_or_default(),
        details: MessageTemplates::contraindication_details(rule),
        risk_level: Some(rule.risk_level),
        origin: AlertOrigin::Contraindication {
            disease: rule.disease_name.clone(),
            substance: rule.substance.clone(),
        },
    }
}

// Any allergen hit is critical, whatever severity was recorded.
fn allergy_alert(allergy: &Allergy) -> Alert {
    Alert {
        alert_type: AlertType::Critical,
        title: MessageTemplates::allergy_title(&allergy.allergen),
        message: MessageTemplates::allergy_message(allergy),
        details: MessageTemplates::allergy_details(allergy),
        risk_level: Some(RiskLevel::Critical),
        origin: AlertOrigin::Allergy {
            allergen: allergy.allergen.clone(),
        },
    }
}
