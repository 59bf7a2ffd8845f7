//! Reception, emergency and diagnosis workflows.
//!
//! Every workflow computes its alerts from the session snapshot before the
//! advisor is called, so alerts are identical whether or not the advisor
//! answers.

use chrono::Local;
use rusqlite::Connection;
use serde::Serialize;

use crate::advisor::{advise_or_fallback, prompts, Advice, Advisor};
use crate::db::{
    self, DatabaseError, NewAllergy, NewDisease, NewMedication, NewPatient, NewVisit,
};
use crate::intelligence::{
    check_multiple_substances, check_vitals, check_vitals_simple, compile_context,
    NO_VITALS_ENTERED,
};
use crate::knowledge::KnowledgeBase;
use crate::models::{
    Alert, AlertOrigin, AlertType, DiseaseCategory, PatientId, RiskLevel, VitalReadings,
};
use crate::session_cache::{ActiveSession, SessionError, SessionSnapshot};

/// Token budget for the differential-diagnosis request.
pub const DIAGNOSIS_MAX_TOKENS: u32 = 2048;

pub const NO_TRANSCRIPT_NOTICE: &str = "No conversation transcript was provided.";

/// Department recorded for reception hand-offs.
pub const EMERGENCY_DEPARTMENT: &str = "Emergency";

/// Severity recorded for conditions and allergies entered at registration.
const REGISTRATION_SEVERITY: &str = "moderate";

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("No patient selected")]
    NoPatientSelected,
    #[error("A chief complaint is required")]
    MissingComplaint,
    #[error("A visit reason is required")]
    MissingVisitReason,
    #[error("A patient name is required")]
    MissingPatientName,
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Reception registration screen. List fields hold one entry per line.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub national_id: Option<String>,
    pub name: String,
    pub age: Option<u32>,
    pub sex: Option<String>,
    pub blood_type: Option<String>,
    pub phone: Option<String>,
    pub emergency_contact: Option<String>,
    pub diseases: String,
    pub allergies: String,
    pub medications: String,
}

/// Outcome of a reception hand-off to the emergency department.
#[derive(Debug, Clone, Serialize)]
pub struct TransferReceipt {
    pub visit_id: i64,
    pub patient_id: PatientId,
    pub patient_name: String,
    pub visit_reason: String,
    pub priority: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VitalsReport {
    pub status_text: String,
    pub alerts: Vec<Alert>,
}

#[derive(Debug, Clone)]
pub struct ConversationAnalysis {
    pub advice: Advice,
    pub alerts: Vec<Alert>,
}

#[derive(Debug, Clone)]
pub struct DiagnosisReport {
    pub advice: Advice,
    /// Substance alerts from the complaint, form and transcript.
    pub alerts: Vec<Alert>,
    /// Every contraindication for this patient, as "do not prescribe" cards.
    pub avoid: Vec<Alert>,
}

/// Emergency screen fields.
#[derive(Debug, Clone, Default)]
pub struct EmergencyForm {
    pub chief_complaint: String,
    pub history: String,
    pub medications_given: String,
    pub substances_taken: String,
}

// ---------------------------------------------------------------------------
// Reception
// ---------------------------------------------------------------------------

/// Select a patient and prepare the advisory summary.
pub fn select_patient(
    active: &mut ActiveSession,
    kb: &impl KnowledgeBase,
    patient_id: PatientId,
    advisor: &dyn Advisor,
) -> Result<Advice, WorkflowError> {
    let session = active.select_patient(kb, patient_id)?;
    Ok(summarize_patient(session, advisor))
}

/// Ask the advisor for a record summary. Only a real answer is kept on the
/// snapshot; a fallback leaves any earlier summary in place.
pub fn summarize_patient(session: &mut SessionSnapshot, advisor: &dyn Advisor) -> Advice {
    let prompt = prompts::summary_prompt(&compile_context(session));
    let advice = advise_or_fallback(advisor, &prompt, Some(prompts::SYSTEM_PROMPT), None);
    if !advice.degraded {
        session.set_ai_summary(advice.text.clone());
    }
    advice
}

pub fn require_session(active: &mut ActiveSession) -> Result<&mut SessionSnapshot, WorkflowError> {
    active.current_mut().ok_or(WorkflowError::NoPatientSelected)
}

/// Register a new patient from the reception form.
pub fn register_patient(
    conn: &Connection,
    form: &RegistrationForm,
) -> Result<PatientId, WorkflowError> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(WorkflowError::MissingPatientName);
    }

    let patient = NewPatient {
        national_id: non_blank(form.national_id.as_deref()),
        name: name.to_string(),
        age: form.age,
        sex: non_blank(form.sex.as_deref()),
        blood_type: non_blank(form.blood_type.as_deref()),
        phone: non_blank(form.phone.as_deref()),
        emergency_contact: non_blank(form.emergency_contact.as_deref()),
        diseases: entries(&form.diseases)
            .map(|disease| NewDisease {
                name: disease.to_string(),
                code: DiseaseCategory::from_display_name(disease),
                severity: Some(REGISTRATION_SEVERITY.to_string()),
            })
            .collect(),
        allergies: entries(&form.allergies)
            .map(|allergen| NewAllergy {
                allergen: allergen.to_string(),
                reaction: None,
                severity: Some(REGISTRATION_SEVERITY.to_string()),
            })
            .collect(),
        medications: entries(&form.medications)
            .map(|drug| NewMedication {
                drug_name: drug.to_string(),
                dose: None,
                frequency: None,
                reason: None,
            })
            .collect(),
    };

    Ok(db::add_new_patient(conn, &patient)?)
}

/// Hand the selected patient over to the emergency department: the visit is
/// written to the record first, then the reception details join the session.
pub fn transfer_to_emergency(
    active: &mut ActiveSession,
    conn: &Connection,
    visit_reason: &str,
    priority: &str,
    notes: &str,
) -> Result<TransferReceipt, WorkflowError> {
    let session = require_session(active)?;
    let reason = visit_reason.trim();
    if reason.is_empty() {
        return Err(WorkflowError::MissingVisitReason);
    }

    let visit_id = db::add_visit(
        conn,
        session.patient_id(),
        &NewVisit {
            visit_date: Local::now().date_naive(),
            department: Some(EMERGENCY_DEPARTMENT.to_string()),
            reason: Some(reason.to_string()),
            diagnosis: None,
            treatment: None,
            doctor_notes: non_blank(Some(notes)),
        },
    )?;
    session.record_reception(reason, priority, notes);

    tracing::info!(
        session_id = %session.session_id(),
        patient_id = session.patient_id(),
        visit_id,
        priority,
        "Patient transferred to emergency"
    );

    Ok(TransferReceipt {
        visit_id,
        patient_id: session.patient_id(),
        patient_name: session.patient().name.clone(),
        visit_reason: reason.to_string(),
        priority: priority.to_string(),
    })
}

/// Free-form question to the advisor, sent without the clinical system prompt.
pub fn ask(advisor: &dyn Advisor, message: &str) -> Advice {
    advise_or_fallback(advisor, message, None, None)
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

fn entries(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|line| !line.is_empty())
}

// ---------------------------------------------------------------------------
// Emergency
// ---------------------------------------------------------------------------

/// Check substances mentioned as given or taken. Non-blank text with no
/// match yields a single success card; blank text yields nothing.
pub fn check_administered(session: &SessionSnapshot, text: &str) -> Vec<Alert> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let alerts = check_multiple_substances(session, text);
    if alerts.is_empty() {
        vec![Alert::success(
            "No conflicts found",
            "No conflict detected with the substances mentioned",
        )]
    } else {
        tracing::info!(
            session_id = %session.session_id(),
            alerts = alerts.len(),
            "Substance conflicts detected"
        );
        alerts
    }
}

/// Store readings as the current vitals and report on them.
pub fn record_vitals(session: &mut SessionSnapshot, readings: VitalReadings) -> VitalsReport {
    let mut alerts = check_vitals(&readings, Some(&*session));
    let status_text = check_vitals_simple(&readings);

    if alerts.is_empty() && status_text != NO_VITALS_ENTERED {
        alerts.push(Alert::success(
            "Vital signs normal",
            "All values are within the normal range",
        ));
    }

    session.set_current_vitals(readings);
    VitalsReport {
        status_text,
        alerts,
    }
}

pub fn analyze_conversation(
    session: &mut SessionSnapshot,
    transcript: &str,
    advisor: &dyn Advisor,
) -> ConversationAnalysis {
    if transcript.trim().is_empty() {
        return ConversationAnalysis {
            advice: Advice {
                text: NO_TRANSCRIPT_NOTICE.to_string(),
                degraded: false,
            },
            alerts: Vec::new(),
        };
    }

    session.set_current_transcript(transcript);
    let mut alerts = check_multiple_substances(session, transcript);

    let prompt = prompts::conversation_analysis_prompt(transcript, &compile_context(session));
    let advice = advise_or_fallback(advisor, &prompt, Some(prompts::SYSTEM_PROMPT), None);
    if advice.degraded {
        alerts.push(advisor_unavailable());
    }

    ConversationAnalysis { advice, alerts }
}

pub fn generate_suggestions(
    session: &SessionSnapshot,
    form: &EmergencyForm,
    advisor: &dyn Advisor,
) -> Advice {
    let clinical_data = prompts::emergency_clinical_data(
        &form.chief_complaint,
        &form.history,
        &form.medications_given,
        &form.substances_taken,
    );
    let vitals_text = if session.current_vitals().is_empty() {
        String::new()
    } else {
        check_vitals_simple(session.current_vitals())
    };
    let prompt =
        prompts::suggestion_prompt(&compile_context(session), &clinical_data, &vitals_text);
    advise_or_fallback(advisor, &prompt, Some(prompts::SYSTEM_PROMPT), None)
}

// ---------------------------------------------------------------------------
// Diagnosis
// ---------------------------------------------------------------------------

pub fn run_diagnosis_loop(
    session: &SessionSnapshot,
    chief_complaint: &str,
    notes: &str,
    transcript: &str,
    advisor: &dyn Advisor,
) -> Result<DiagnosisReport, WorkflowError> {
    let complaint = chief_complaint.trim();
    if complaint.is_empty() {
        return Err(WorkflowError::MissingComplaint);
    }

    let form_data = diagnosis_form(session, complaint, notes);
    let mut alerts =
        check_multiple_substances(session, &format!("{complaint} {form_data} {transcript}"));
    let avoid = avoid_list(session);

    let prompt = prompts::diagnosis_loop_prompt(
        &compile_context(session),
        complaint,
        &form_data,
        transcript,
    );
    let advice = advise_or_fallback(
        advisor,
        &prompt,
        Some(prompts::SYSTEM_PROMPT),
        Some(DIAGNOSIS_MAX_TOKENS),
    );
    if advice.degraded {
        alerts.push(advisor_unavailable());
    }

    tracing::info!(
        session_id = %session.session_id(),
        alerts = alerts.len(),
        avoid = avoid.len(),
        degraded = advice.degraded,
        "Diagnosis loop finished"
    );

    Ok(DiagnosisReport {
        advice,
        alerts,
        avoid,
    })
}

fn diagnosis_form(session: &SessionSnapshot, complaint: &str, notes: &str) -> String {
    let notes = if notes.trim().is_empty() { "none" } else { notes.trim() };
    let vitals = if session.current_vitals().is_empty() {
        "not entered".to_string()
    } else {
        check_vitals_simple(session.current_vitals())
    };

    let mut form = format!(
        "Chief complaint: {complaint}\nAdditional notes: {notes}\nVital signs: {vitals}\n"
    );
    if !session.session_updates().is_empty() {
        form.push_str("\nSession updates:\n");
        for update in session.session_updates() {
            form.push_str(&format!("  - {}: {}\n", update.field, update.value));
        }
    }
    form
}

/// One card per contraindication rule. Critical rules stay critical;
/// every other rule is shown as high.
fn avoid_list(session: &SessionSnapshot) -> Vec<Alert> {
    session
        .contraindications()
        .iter()
        .map(|rule| Alert {
            alert_type: match rule.risk_level {
                RiskLevel::Critical => AlertType::Critical,
                RiskLevel::High | RiskLevel::Moderate => AlertType::High,
            },
            title: format!("Do not prescribe: {}", rule.substance),
            message: rule.reason.clone().unwrap_or_default(),
            details: format!(
                "Disease: {} | Source: {}",
                rule.disease_name,
                rule.source.as_deref().unwrap_or("")
            ),
            risk_level: Some(rule.risk_level),
            origin: AlertOrigin::Contraindication {
                disease: rule.disease_name.clone(),
                substance: rule.substance.clone(),
            },
        })
        .collect()
}

fn advisor_unavailable() -> Alert {
    Alert::info(
        "AI analysis unavailable",
        "The advisor did not respond. Alerts shown were computed locally.",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::testing::{RecordingAdvisor, UnreachableAdvisor};
    use crate::advisor::FALLBACK_MESSAGE;
    use crate::db::{open_memory_database, seed::seed_demo_data};
    use crate::knowledge::SqliteKnowledgeBase;
    use rusqlite::Connection;

    fn seeded() -> Connection {
        let conn = open_memory_database().unwrap();
        seed_demo_data(&conn).unwrap();
        conn
    }

    fn load(conn: &Connection, id: PatientId) -> SessionSnapshot {
        SessionSnapshot::load(&SqliteKnowledgeBase::new(conn), id).unwrap()
    }

    #[test]
    fn select_patient_stores_summary() {
        let conn = seeded();
        let mut active = ActiveSession::new();
        let advisor = RecordingAdvisor::new("High-risk cardiac patient");
        let advice =
            select_patient(&mut active, &SqliteKnowledgeBase::new(&conn), 1, &advisor).unwrap();
        assert!(!advice.degraded);
        let session = require_session(&mut active).unwrap();
        assert_eq!(session.ai_summary(), Some("High-risk cardiac patient"));
        assert!(advisor.calls.borrow()[0].0.contains("Abdullah Youssef"));
    }

    #[test]
    fn select_unknown_patient_is_session_error() {
        let conn = seeded();
        let mut active = ActiveSession::new();
        let result = select_patient(
            &mut active,
            &SqliteKnowledgeBase::new(&conn),
            77,
            &RecordingAdvisor::new("unused"),
        );
        assert!(matches!(
            result,
            Err(WorkflowError::Session(SessionError::PatientNotFound(77)))
        ));
        assert!(matches!(
            require_session(&mut active),
            Err(WorkflowError::NoPatientSelected)
        ));
    }

    #[test]
    fn failed_summary_is_not_stored() {
        let conn = seeded();
        let mut session = load(&conn, 3);
        let advice = summarize_patient(&mut session, &UnreachableAdvisor);
        assert!(advice.degraded);
        assert_eq!(advice.text, FALLBACK_MESSAGE);
        assert!(session.ai_summary().is_none());
    }

    #[test]
    fn administered_conflict_vs_clean() {
        let conn = seeded();
        let session = load(&conn, 3);

        let alerts = check_administered(&session, "Magnesium sulfate 2g IV");
        assert!(alerts.iter().any(|a| a.alert_type == AlertType::Critical));

        let clean = check_administered(&session, "Paracetamol 1g");
        assert_eq!(clean.len(), 1);
        assert_eq!(clean[0].alert_type, AlertType::Success);

        assert!(check_administered(&session, "  ").is_empty());
    }

    #[test]
    fn record_vitals_stores_and_contextualizes() {
        let conn = seeded();
        let mut session = load(&conn, 3);
        let report = record_vitals(
            &mut session,
            VitalReadings::new().with("spo2", "86").with("heart_rate", "88"),
        );
        assert_eq!(report.alerts.len(), 1);
        assert!(report.alerts[0].details.contains("FVC"));
        assert_eq!(report.status_text.lines().count(), 2);
        assert_eq!(session.current_vitals().get("spo2"), Some("86"));
    }

    #[test]
    fn normal_vitals_get_success_card() {
        let conn = seeded();
        let mut session = load(&conn, 5);
        let report = record_vitals(&mut session, VitalReadings::new().with("heart_rate", "72"));
        assert_eq!(report.alerts.len(), 1);
        assert_eq!(report.alerts[0].alert_type, AlertType::Success);

        let empty = record_vitals(&mut session, VitalReadings::new());
        assert!(empty.alerts.is_empty());
        assert_eq!(empty.status_text, NO_VITALS_ENTERED);
    }

    #[test]
    fn empty_transcript_skips_advisor() {
        let conn = seeded();
        let mut session = load(&conn, 2);
        let advisor = RecordingAdvisor::new("unused");
        let analysis = analyze_conversation(&mut session, "   ", &advisor);
        assert_eq!(analysis.advice.text, NO_TRANSCRIPT_NOTICE);
        assert!(analysis.alerts.is_empty());
        assert!(advisor.calls.borrow().is_empty());
    }

    #[test]
    fn conversation_alerts_survive_advisor_failure() {
        let conn = seeded();
        let mut session = load(&conn, 2);
        let transcript = "He was given penicillin at the clinic yesterday";

        let ok = analyze_conversation(&mut session, transcript, &RecordingAdvisor::new("ok"));
        let down = analyze_conversation(&mut session, transcript, &UnreachableAdvisor);

        assert_eq!(ok.alerts.len(), 1);
        assert_eq!(ok.alerts[0].title, "Recorded allergy: Penicillin");
        assert_eq!(down.alerts[0], ok.alerts[0]);
        assert_eq!(down.alerts.last().unwrap().alert_type, AlertType::Info);
        assert_eq!(session.current_transcript(), Some(transcript));
    }

    #[test]
    fn suggestions_include_form_and_vitals() {
        let conn = seeded();
        let mut session = load(&conn, 1);
        record_vitals(&mut session, VitalReadings::new().with("systolic_bp", "185"));
        let advisor = RecordingAdvisor::new("Give nitrates");
        let form = EmergencyForm {
            chief_complaint: "Chest pain".into(),
            history: "Two hours".into(),
            medications_given: "Aspirin 300mg".into(),
            substances_taken: String::new(),
        };
        let advice = generate_suggestions(&session, &form, &advisor);
        assert_eq!(advice.text, "Give nitrates");
        let prompt = &advisor.calls.borrow()[0].0;
        assert!(prompt.contains("Chief complaint: Chest pain"));
        assert!(prompt.contains("Systolic blood pressure: 185 mmHg (CRITICAL)"));
    }

    #[test]
    fn diagnosis_requires_complaint() {
        let conn = seeded();
        let session = load(&conn, 3);
        let result = run_diagnosis_loop(&session, " ", "", "", &RecordingAdvisor::new("x"));
        assert!(matches!(result, Err(WorkflowError::MissingComplaint)));
    }

    #[test]
    fn diagnosis_uses_token_budget_and_lists_avoid() {
        let conn = seeded();
        let mut session = load(&conn, 3);
        session.record_reception("Weakness", "urgent", "Stopped medication");
        let advisor = RecordingAdvisor::new("Likely myasthenic crisis");

        let report = run_diagnosis_loop(
            &session,
            "Progressive weakness",
            "",
            "Took ciprofloxacin and magnesium supplements",
            &advisor,
        )
        .unwrap();

        let calls = advisor.calls.borrow();
        assert_eq!(calls[0].1, Some(DIAGNOSIS_MAX_TOKENS));
        assert!(calls[0].0.contains("priority: urgent"));

        // Seven MG rules in the seed data, five of them critical.
        assert_eq!(report.avoid.len(), 7);
        assert!(report.avoid.iter().all(|a| a.title.starts_with("Do not prescribe: ")));
        let critical = report
            .avoid
            .iter()
            .filter(|a| a.alert_type == AlertType::Critical)
            .count();
        assert_eq!(critical, 5);
        assert!(report
            .alerts
            .iter()
            .any(|a| a.title == "Critical risk: Magnesium conflicts with Myasthenia Gravis"));
        assert!(!report.advice.degraded);
    }

    #[test]
    fn degraded_diagnosis_adds_info_alert() {
        let conn = seeded();
        let session = load(&conn, 5);
        let report =
            run_diagnosis_loop(&session, "Headache", "", "", &UnreachableAdvisor).unwrap();
        assert!(report.advice.degraded);
        assert_eq!(report.alerts.len(), 1);
        assert_eq!(report.alerts[0].alert_type, AlertType::Info);
        assert!(report.avoid.is_empty());
    }

    #[test]
    fn avoid_list_shows_non_critical_rules_as_high() {
        let conn = seeded();
        let session = load(&conn, 4);
        let report =
            run_diagnosis_loop(&session, "Wheezing", "", "", &RecordingAdvisor::new("ok")).unwrap();

        let cards: Vec<(&str, AlertType, Option<RiskLevel>)> = report
            .avoid
            .iter()
            .map(|a| (a.title.as_str(), a.alert_type, a.risk_level))
            .collect();
        assert_eq!(
            cards,
            vec![
                ("Do not prescribe: Beta-blockers", AlertType::High, Some(RiskLevel::High)),
                ("Do not prescribe: Aspirin", AlertType::High, Some(RiskLevel::High)),
                ("Do not prescribe: NSAIDs", AlertType::High, Some(RiskLevel::Moderate)),
            ]
        );
        assert!(report.avoid.iter().all(|a| a.details.starts_with("Disease: Asthma")));
    }

    #[test]
    fn transfer_requires_a_selected_patient() {
        let conn = seeded();
        let mut active = ActiveSession::new();
        let result = transfer_to_emergency(&mut active, &conn, "Chest pain", "urgent", "");
        assert!(matches!(result, Err(WorkflowError::NoPatientSelected)));
    }

    #[test]
    fn transfer_rejects_blank_reason_and_writes_nothing() {
        let conn = seeded();
        let mut active = ActiveSession::new();
        active
            .select_patient(&SqliteKnowledgeBase::new(&conn), 3)
            .unwrap();
        let before = db::get_visits(&conn, 3).unwrap().len();

        let result = transfer_to_emergency(&mut active, &conn, "   ", "urgent", "notes");

        assert!(matches!(result, Err(WorkflowError::MissingVisitReason)));
        assert_eq!(db::get_visits(&conn, 3).unwrap().len(), before);
        let session = active.current().unwrap();
        assert!(session.current_complaint().is_none());
        assert!(session.session_updates().is_empty());
    }

    #[test]
    fn transfer_records_emergency_visit_and_session_details() {
        let conn = seeded();
        let mut active = ActiveSession::new();
        active
            .select_patient(&SqliteKnowledgeBase::new(&conn), 3)
            .unwrap();

        let receipt = transfer_to_emergency(
            &mut active,
            &conn,
            " Shortness of breath ",
            "critical",
            "Arrived by ambulance",
        )
        .unwrap();

        assert_eq!(receipt.patient_name, "Sara Khaled");
        assert_eq!(receipt.visit_reason, "Shortness of breath");

        let visits = db::get_visits(&conn, 3).unwrap();
        assert_eq!(visits[0].id, receipt.visit_id);
        assert_eq!(visits[0].department.as_deref(), Some(EMERGENCY_DEPARTMENT));
        assert_eq!(visits[0].reason.as_deref(), Some("Shortness of breath"));
        assert_eq!(visits[0].doctor_notes.as_deref(), Some("Arrived by ambulance"));
        assert_eq!(visits[0].visit_date, Some(Local::now().date_naive()));

        let session = active.current().unwrap();
        assert_eq!(session.current_complaint(), Some("Shortness of breath"));
        let fields: Vec<&str> = session
            .session_updates()
            .iter()
            .map(|u| u.field.as_str())
            .collect();
        assert_eq!(fields, vec!["visit_reason", "priority", "reception_notes"]);
    }

    #[test]
    fn register_patient_parses_one_entry_per_line() {
        let conn = seeded();
        let form = RegistrationForm {
            name: "  Omar Nabil ".into(),
            age: Some(29),
            sex: Some("male".into()),
            blood_type: Some(" ".into()),
            diseases: "Asthma\n\n  Migraine  \n".into(),
            allergies: "Latex".into(),
            medications: "Salbutamol Inhaler\nMontelukast".into(),
            ..RegistrationForm::default()
        };

        let id = register_patient(&conn, &form).unwrap();

        let patient = db::get_patient(&conn, id).unwrap().unwrap();
        assert_eq!(patient.name, "Omar Nabil");
        assert!(patient.blood_type.is_none());
        let diseases = db::get_chronic_diseases(&conn, id).unwrap();
        assert_eq!(diseases.len(), 2);
        assert_eq!(diseases[0].category(), Some(DiseaseCategory::Asthma));
        assert_eq!(diseases[1].category(), None);
        assert_eq!(db::get_allergies(&conn, id).unwrap()[0].allergen, "Latex");
        assert_eq!(db::get_medications(&conn, id).unwrap().len(), 2);

        let session = load(&conn, id);
        assert!(session
            .contraindications()
            .iter()
            .any(|rule| rule.substance == "Beta-blockers"));
    }

    #[test]
    fn register_patient_requires_a_name() {
        let conn = seeded();
        let result = register_patient(&conn, &RegistrationForm::default());
        assert!(matches!(result, Err(WorkflowError::MissingPatientName)));
        assert_eq!(db::list_patient_summaries(&conn).unwrap().len(), 5);
    }

    #[test]
    fn duplicate_national_id_surfaces_as_database_error() {
        let conn = seeded();
        let existing = db::get_patient(&conn, 1).unwrap().unwrap();
        let form = RegistrationForm {
            name: "Someone Else".into(),
            national_id: existing.national_id,
            ..RegistrationForm::default()
        };
        let result = register_patient(&conn, &form);
        assert!(matches!(
            result,
            Err(WorkflowError::Database(DatabaseError::ConstraintViolation(_)))
        ));
    }

    #[test]
    fn ask_sends_message_without_system_prompt() {
        let advisor = RecordingAdvisor::new("Usually 2-4 mg IV");
        let advice = ask(&advisor, "Typical morphine dose?");
        assert_eq!(advice.text, "Usually 2-4 mg IV");
        assert_eq!(advisor.calls.borrow()[0].0, "Typical morphine dose?");
        assert_eq!(advisor.system_prompts.borrow()[0], None);

        assert!(ask(&UnreachableAdvisor, "hello").degraded);
    }
}
