use serde::{Deserialize, Serialize};

use super::enums::{AlertType, RiskLevel, VitalKey};

/// What produced an alert. Structured counterpart of the rendered title.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AlertOrigin {
    Contraindication { disease: String, substance: String },
    Allergy { allergen: String },
    Vital { key: VitalKey },
    Workflow,
}

/// A transient clinical warning. Produced fresh per check, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alert {
    pub alert_type: AlertType,
    pub title: String,
    pub message: String,
    pub details: String,
    pub risk_level: Option<RiskLevel>,
    pub origin: AlertOrigin,
}

impl Alert {
    /// Positive feedback card ("no conflicts found").
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            alert_type: AlertType::Success,
            title: title.into(),
            message: message.into(),
            details: String::new(),
            risk_level: None,
            origin: AlertOrigin::Workflow,
        }
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            alert_type: AlertType::Info,
            title: title.into(),
            message: message.into(),
            details: String::new(),
            risk_level: None,
            origin: AlertOrigin::Workflow,
        }
    }

    pub fn is_critical(&self) -> bool {
        self.alert_type == AlertType::Critical
    }
}
