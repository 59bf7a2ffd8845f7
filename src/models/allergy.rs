use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Allergy {
    pub id: i64,
    pub allergen: String,
    pub reaction: Option<String>,
    /// Recorded severity, free text. Not used to grade alerts.
    pub severity: Option<String>,
}
