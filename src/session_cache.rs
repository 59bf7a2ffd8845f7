//! Per-patient session snapshot.
//!
//! Loads a patient's full record once when the patient is selected and
//! serves every later query from memory. Historical collections are fixed
//! for the life of the session; only the doctor-entered fields (vitals,
//! complaint, transcript, summary) and the append-only update log change.

use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::knowledge::KnowledgeBase;
use crate::models::*;

// ═══════════════════════════════════════════════════════════
// Session data
// ═══════════════════════════════════════════════════════════

/// One doctor-entered change made during the session.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SessionUpdate {
    pub field: String,
    pub value: String,
    pub timestamp: NaiveDateTime,
}

/// Header strip shown above every screen for the selected patient.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PatientBanner {
    pub name: String,
    pub age: Option<u32>,
    pub blood_type: Option<String>,
    pub sex: Option<String>,
    pub allergies: Vec<String>,
    pub diseases: Vec<String>,
}

/// In-memory aggregate of one patient's record for a care episode.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    session_id: Uuid,
    started_at: NaiveDateTime,

    patient: Patient,
    chronic_diseases: Vec<ChronicDisease>,
    allergies: Vec<Allergy>,
    medications: Vec<Medication>,
    surgeries: Vec<Surgery>,
    visits: Vec<Visit>,
    lab_results: Vec<LabResult>,
    abnormal_labs: Vec<LabResult>,
    contraindications: Vec<Contraindication>,

    current_vitals: VitalReadings,
    current_complaint: Option<String>,
    current_transcript: Option<String>,
    ai_summary: Option<String>,
    session_updates: Vec<SessionUpdate>,
}

impl SessionSnapshot {
    /// Load every collection for `patient_id` in one pass.
    ///
    /// Contraindications are looked up by the loaded disease names; a patient
    /// without chronic diseases gets an empty rule set and no rule query.
    pub fn load(kb: &impl KnowledgeBase, patient_id: PatientId) -> Result<Self, SessionError> {
        let patient = kb
            .patient(patient_id)?
            .ok_or(SessionError::PatientNotFound(patient_id))?;

        let chronic_diseases = kb.chronic_diseases(patient_id)?;
        let disease_names: Vec<String> =
            chronic_diseases.iter().map(|d| d.name.clone()).collect();
        let contraindications = if disease_names.is_empty() {
            Vec::new()
        } else {
            kb.contraindications_for(&disease_names)?
        };

        let snapshot = Self {
            session_id: Uuid::new_v4(),
            started_at: Local::now().naive_local(),
            patient,
            chronic_diseases,
            allergies: kb.allergies(patient_id)?,
            medications: kb.medications(patient_id)?,
            surgeries: kb.surgeries(patient_id)?,
            visits: kb.visits(patient_id)?,
            lab_results: kb.lab_results(patient_id)?,
            abnormal_labs: kb.abnormal_lab_results(patient_id)?,
            contraindications,
            current_vitals: VitalReadings::new(),
            current_complaint: None,
            current_transcript: None,
            ai_summary: None,
            session_updates: Vec::new(),
        };

        tracing::info!(
            session_id = %snapshot.session_id,
            patient_id,
            diseases = snapshot.chronic_diseases.len(),
            allergies = snapshot.allergies.len(),
            medications = snapshot.medications.len(),
            contraindications = snapshot.contraindications.len(),
            "Session snapshot loaded"
        );

        Ok(snapshot)
    }

    // ── Identity ─────────────────────────────────────────

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn started_at(&self) -> NaiveDateTime {
        self.started_at
    }

    pub fn patient(&self) -> &Patient {
        &self.patient
    }

    pub fn patient_id(&self) -> PatientId {
        self.patient.id
    }

    // ── Historical record (fixed for the session) ────────

    pub fn chronic_diseases(&self) -> &[ChronicDisease] {
        &self.chronic_diseases
    }

    pub fn allergies(&self) -> &[Allergy] {
        &self.allergies
    }

    pub fn medications(&self) -> &[Medication] {
        &self.medications
    }

    pub fn surgeries(&self) -> &[Surgery] {
        &self.surgeries
    }

    /// Newest first.
    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    pub fn lab_results(&self) -> &[LabResult] {
        &self.lab_results
    }

    pub fn abnormal_labs(&self) -> &[LabResult] {
        &self.abnormal_labs
    }

    /// Most severe first.
    pub fn contraindications(&self) -> &[Contraindication] {
        &self.contraindications
    }

    pub fn disease_names(&self) -> Vec<&str> {
        self.chronic_diseases.iter().map(|d| d.name.as_str()).collect()
    }

    pub fn allergy_names(&self) -> Vec<&str> {
        self.allergies.iter().map(|a| a.allergen.as_str()).collect()
    }

    pub fn medication_names(&self) -> Vec<&str> {
        self.medications.iter().map(|m| m.drug_name.as_str()).collect()
    }

    /// Resolved categories of the patient's diseases, in record order.
    pub fn disease_categories(&self) -> Vec<DiseaseCategory> {
        self.chronic_diseases.iter().filter_map(|d| d.category()).collect()
    }

    pub fn banner(&self) -> PatientBanner {
        PatientBanner {
            name: self.patient.name.clone(),
            age: self.patient.age,
            blood_type: self.patient.blood_type.clone(),
            sex: self.patient.sex.clone(),
            allergies: self.allergy_names().into_iter().map(String::from).collect(),
            diseases: self.disease_names().into_iter().map(String::from).collect(),
        }
    }

    // ── In-session state ─────────────────────────────────

    pub fn current_vitals(&self) -> &VitalReadings {
        &self.current_vitals
    }

    pub fn set_current_vitals(&mut self, vitals: VitalReadings) {
        self.current_vitals = vitals;
    }

    pub fn current_complaint(&self) -> Option<&str> {
        self.current_complaint.as_deref()
    }

    pub fn set_current_complaint(&mut self, complaint: impl Into<String>) {
        self.current_complaint = Some(complaint.into());
    }

    pub fn current_transcript(&self) -> Option<&str> {
        self.current_transcript.as_deref()
    }

    pub fn set_current_transcript(&mut self, transcript: impl Into<String>) {
        self.current_transcript = Some(transcript.into());
    }

    pub fn ai_summary(&self) -> Option<&str> {
        self.ai_summary.as_deref()
    }

    pub fn set_ai_summary(&mut self, summary: impl Into<String>) {
        self.ai_summary = Some(summary.into());
    }

    pub fn session_updates(&self) -> &[SessionUpdate] {
        &self.session_updates
    }

    /// Append to the session log. Entries are never edited or removed.
    pub fn add_session_update(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.session_updates.push(SessionUpdate {
            field: field.into(),
            value: value.into(),
            timestamp: Local::now().naive_local(),
        });
    }

    /// Reception intake: the visit reason becomes the current complaint.
    pub fn record_reception(&mut self, visit_reason: &str, priority: &str, notes: &str) {
        self.set_current_complaint(visit_reason);
        self.add_session_update("visit_reason", visit_reason);
        self.add_session_update("priority", priority);
        self.add_session_update("reception_notes", notes);
    }
}

// ═══════════════════════════════════════════════════════════
// ActiveSession: the single selected-patient slot
// ═══════════════════════════════════════════════════════════

/// Holds at most one snapshot. Selecting a patient replaces whatever was
/// there; callers holding data from the old snapshot are not notified.
#[derive(Debug, Default)]
pub struct ActiveSession {
    current: Option<SessionSnapshot>,
}

impl ActiveSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and activate `patient_id`. On failure the slot is left empty.
    pub fn select_patient(
        &mut self,
        kb: &impl KnowledgeBase,
        patient_id: PatientId,
    ) -> Result<&mut SessionSnapshot, SessionError> {
        self.current = None;
        let snapshot = SessionSnapshot::load(kb, patient_id)?;
        Ok(self.current.insert(snapshot))
    }

    pub fn current(&self) -> Option<&SessionSnapshot> {
        self.current.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut SessionSnapshot> {
        self.current.as_mut()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

// ═══════════════════════════════════════════════════════════
// Error type
// ═══════════════════════════════════════════════════════════

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Patient {0} not found")]
    PatientNotFound(PatientId),
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

// ═══════════════════════════════════════════════════════════
// Test support
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::Cell;

    use super::*;

    /// In-memory knowledge base. Rules are filtered by disease name on lookup.
    #[derive(Default)]
    pub struct StubKnowledge {
        pub patient: Option<Patient>,
        pub diseases: Vec<ChronicDisease>,
        pub allergies: Vec<Allergy>,
        pub medications: Vec<Medication>,
        pub surgeries: Vec<Surgery>,
        pub visits: Vec<Visit>,
        pub labs: Vec<LabResult>,
        pub rules: Vec<Contraindication>,
        pub rule_queries: Cell<usize>,
    }

    impl StubKnowledge {
        pub fn for_patient(name: &str) -> Self {
            Self {
                patient: Some(Patient {
                    id: 1,
                    national_id: None,
                    name: name.into(),
                    age: Some(40),
                    sex: Some("female".into()),
                    blood_type: Some("O+".into()),
                    phone: None,
                    emergency_contact: None,
                }),
                ..Default::default()
            }
        }

        pub fn disease(mut self, name: &str, severity: &str) -> Self {
            let id = self.diseases.len() as i64 + 1;
            self.diseases.push(ChronicDisease {
                id,
                name: name.into(),
                code: None,
                diagnosed_date: None,
                severity: Some(severity.into()),
                notes: None,
            });
            self
        }

        pub fn allergy(mut self, allergen: &str, reaction: &str, severity: &str) -> Self {
            let id = self.allergies.len() as i64 + 1;
            self.allergies.push(Allergy {
                id,
                allergen: allergen.into(),
                reaction: Some(reaction.into()),
                severity: Some(severity.into()),
            });
            self
        }

        pub fn rule(
            mut self,
            disease: &str,
            substance: &str,
            risk: RiskLevel,
            reason: &str,
        ) -> Self {
            let id = self.rules.len() as i64 + 1;
            self.rules.push(Contraindication {
                id,
                disease_name: disease.into(),
                substance: substance.into(),
                risk_level: risk,
                reason: Some(reason.into()),
                source: Some("Test source".into()),
            });
            self
        }

        pub fn snapshot(&self) -> SessionSnapshot {
            SessionSnapshot::load(self, 1).unwrap()
        }
    }

    impl KnowledgeBase for StubKnowledge {
        fn patient(&self, id: PatientId) -> Result<Option<Patient>, DatabaseError> {
            Ok(self.patient.clone().filter(|p| p.id == id))
        }
        fn chronic_diseases(&self, _: PatientId) -> Result<Vec<ChronicDisease>, DatabaseError> {
            Ok(self.diseases.clone())
        }
        fn allergies(&self, _: PatientId) -> Result<Vec<Allergy>, DatabaseError> {
            Ok(self.allergies.clone())
        }
        fn medications(&self, _: PatientId) -> Result<Vec<Medication>, DatabaseError> {
            Ok(self.medications.clone())
        }
        fn surgeries(&self, _: PatientId) -> Result<Vec<Surgery>, DatabaseError> {
            Ok(self.surgeries.clone())
        }
        fn visits(&self, _: PatientId) -> Result<Vec<Visit>, DatabaseError> {
            Ok(self.visits.clone())
        }
        fn lab_results(&self, _: PatientId) -> Result<Vec<LabResult>, DatabaseError> {
            Ok(self.labs.clone())
        }
        fn abnormal_lab_results(&self, _: PatientId) -> Result<Vec<LabResult>, DatabaseError> {
            Ok(self.labs.iter().filter(|l| l.is_abnormal).cloned().collect())
        }
        fn contraindications_for(
            &self,
            disease_names: &[String],
        ) -> Result<Vec<Contraindication>, DatabaseError> {
            self.rule_queries.set(self.rule_queries.get() + 1);
            Ok(self
                .rules
                .iter()
                .filter(|r| disease_names.contains(&r.disease_name))
                .cloned()
                .collect())
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
