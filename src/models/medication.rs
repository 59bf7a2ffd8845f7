use serde::{Deserialize, Serialize};

/// A current medication (not an alert).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Medication {
    pub id: i64,
    pub drug_name: String,
    pub dose: Option<String>,
    pub frequency: Option<String>,
    pub reason: Option<String>,
}
