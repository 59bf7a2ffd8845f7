use serde::{Deserialize, Serialize};

/// Row id of a patient record.
pub type PatientId = i64;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    pub id: PatientId,
    pub national_id: Option<String>,
    pub name: String,
    pub age: Option<u32>,
    pub sex: Option<String>,
    pub blood_type: Option<String>,
    pub phone: Option<String>,
    pub emergency_contact: Option<String>,
}

/// Patient picker entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientSummary {
    pub id: PatientId,
    pub name: String,
    pub age: Option<u32>,
    pub sex: Option<String>,
}
