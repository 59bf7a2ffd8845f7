use crate::intelligence::reference::VitalRange;
use crate::models::{Allergy, Contraindication, RiskLevel};

const NOT_SPECIFIED: &str = "not specified";

/// Alert wording. Titles double as the deduplication key for text scans,
/// so they depend only on the queried substance and the matched record.
pub struct MessageTemplates;

impl MessageTemplates {
    pub fn contraindication_title(risk: RiskLevel, substance: &str, disease: &str) -> String {
        format!("{} risk: {} conflicts with {}", risk.label(), substance, disease)
    }

    pub fn contraindication_details(rule: &Contraindication) -> String {
        format!(
            "Source: {} | Risk level: {}",
            rule.source.as_deref().unwrap_or("N/A"),
            rule.risk_level.as_str(),
        )
    }

    pub fn allergy_title(allergen: &str) -> String {
        format!("Recorded allergy: {allergen}")
    }

    pub fn allergy_message(allergy: &Allergy) -> String {
        format!(
            "Patient is allergic to {}. Previous reaction: {}",
            allergy.allergen,
            allergy.reaction.as_deref().unwrap_or(NOT_SPECIFIED),
        )
    }

    pub fn allergy_details(allergy: &Allergy) -> String {
        format!(
            "Allergy severity: {}",
            allergy.severity.as_deref().unwrap_or(NOT_SPECIFIED)
        )
    }

    pub fn vital_critical_title(range: &VitalRange) -> String {
        format!("Critical value: {}", range.name)
    }

    pub fn vital_abnormal_title(range: &VitalRange) -> String {
        format!("Abnormal value: {}", range.name)
    }

    pub fn vital_message(range: &VitalRange, value: f64) -> String {
        format!(
            "Value: {} {}, normal: {}-{} {}",
            value, range.unit, range.min, range.max, range.unit
        )
    }

    /// One status line for the vitals panel.
    pub fn vital_status_line(range: &VitalRange, value: f64, status: &str) -> String {
        format!("{}: {} {} ({})", range.name, value, range.unit, status)
    }
}
