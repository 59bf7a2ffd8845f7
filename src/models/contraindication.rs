use serde::{Deserialize, Serialize};

use super::enums::RiskLevel;

/// Global rule: `substance` is dangerous for patients with `disease_name`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Contraindication {
    pub id: i64,
    pub disease_name: String,
    pub substance: String,
    pub risk_level: RiskLevel,
    pub reason: Option<String>,
    pub source: Option<String>,
}
