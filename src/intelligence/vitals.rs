use std::str::FromStr;

use crate::intelligence::messages::MessageTemplates;
use crate::intelligence::reference::{contextual_note, VitalRange};
use crate::models::{Alert, AlertOrigin, AlertType, VitalKey, VitalReadings};
use crate::session_cache::SessionSnapshot;

/// Returned by [`check_vitals_simple`] when no usable reading was given.
pub const NO_VITALS_ENTERED: &str = "No vitals entered";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VitalError {
    #[error("Invalid value for {key}: {raw:?}")]
    InvalidValue { key: String, raw: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VitalStatus {
    Normal,
    Abnormal,
    Critical,
}

impl VitalStatus {
    pub fn classify(range: &VitalRange, value: f64) -> Self {
        if range.is_critical(value) {
            VitalStatus::Critical
        } else if range.is_abnormal(value) {
            VitalStatus::Abnormal
        } else {
            VitalStatus::Normal
        }
    }

    fn label(self) -> &'static str {
        match self {
            VitalStatus::Normal => "normal",
            VitalStatus::Abnormal => "abnormal",
            VitalStatus::Critical => "CRITICAL",
        }
    }
}

/// Parse one raw reading. Empty, non-numeric and non-finite values are invalid.
pub fn parse_reading(key: VitalKey, raw: &str) -> Result<f64, VitalError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| VitalError::InvalidValue {
            key: key.as_str().to_string(),
            raw: raw.to_string(),
        })
}

/// Readings with a known key and a usable value, in entry order.
fn usable_readings(readings: &VitalReadings) -> Vec<(&'static VitalRange, f64)> {
    readings
        .iter()
        .filter_map(|(key, raw)| {
            let range = VitalKey::from_str(key).ok().and_then(VitalRange::for_key)?;
            match parse_reading(range.key, raw) {
                Ok(value) => Some((range, value)),
                Err(e) => {
                    tracing::debug!(error = %e, "Skipping vital reading");
                    None
                }
            }
        })
        .collect()
}

/// Alerts for abnormal and critical readings; normal readings produce none.
///
/// With a session, critical readings carry a note when the patient's disease
/// history makes that vital sign particularly dangerous.
pub fn check_vitals(readings: &VitalReadings, session: Option<&SessionSnapshot>) -> Vec<Alert> {
    let categories = session.map(|s| s.disease_categories()).unwrap_or_default();

    usable_readings(readings)
        .into_iter()
        .filter_map(|(range, value)| match VitalStatus::classify(range, value) {
            VitalStatus::Critical => Some(Alert {
                alert_type: AlertType::Critical,
                title: MessageTemplates::vital_critical_title(range),
                message: MessageTemplates::vital_message(range, value),
                details: contextual_note(&categories, range.key)
                    .unwrap_or_default()
                    .to_string(),
                risk_level: None,
                origin: AlertOrigin::Vital { key: range.key },
            }),
            VitalStatus::Abnormal => Some(Alert {
                alert_type: AlertType::High,
                title: MessageTemplates::vital_abnormal_title(range),
                message: MessageTemplates::vital_message(range, value),
                details: String::new(),
                risk_level: None,
                origin: AlertOrigin::Vital { key: range.key },
            }),
            VitalStatus::Normal => None,
        })
        .collect()
}

/// One status line per usable reading, or [`NO_VITALS_ENTERED`].
pub fn check_vitals_simple(readings: &VitalReadings) -> String {
    let lines: Vec<String> = usable_readings(readings)
        .into_iter()
        .map(|(range, value)| {
            let status = VitalStatus::classify(range, value);
            MessageTemplates::vital_status_line(range, value, status.label())
        })
        .collect();

    if lines.is_empty() {
        NO_VITALS_ENTERED.to_string()
    } else {
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session_cache::testing::StubKnowledge;

    fn spo2(value: &str) -> VitalReadings {
        VitalReadings::new().with("spo2", value)
    }

    #[test]
    fn spo2_between_critical_and_normal_is_high() {
        let alerts = check_vitals(&spo2("91"), None);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type, AlertType::High);
        assert_eq!(alerts[0].title, "Abnormal value: Oxygen saturation");
    }

    #[test]
    fn spo2_at_or_below_critical_low_is_critical() {
        for value in ["87", "88"] {
            let alerts = check_vitals(&spo2(value), None);
            assert_eq!(alerts.len(), 1);
            assert_eq!(alerts[0].alert_type, AlertType::Critical);
        }
    }

    #[test]
    fn no_readings_means_no_alerts_and_sentinel_text() {
        let empty = VitalReadings::new();
        assert!(check_vitals(&empty, None).is_empty());
        assert_eq!(check_vitals_simple(&empty), NO_VITALS_ENTERED);
    }

    #[test]
    fn every_range_classifies_its_boundaries() {
        for range in crate::intelligence::reference::VITAL_RANGES {
            let readings = |v: f64| VitalReadings::new().with(range.key.as_str(), v.to_string());

            for v in [range.critical_low, range.critical_high, range.critical_low - 1.0] {
                let alerts = check_vitals(&readings(v), None);
                assert_eq!(alerts[0].alert_type, AlertType::Critical, "{} = {v}", range.name);
            }

            let mid = (range.min + range.max) / 2.0;
            assert!(check_vitals(&readings(mid), None).is_empty(), "{} = {mid}", range.name);
            assert!(check_vitals_simple(&readings(mid)).ends_with("(normal)"));
        }
    }

    #[test]
    fn malformed_values_are_skipped() {
        let readings = VitalReadings::new()
            .with("heart_rate", "")
            .with("spo2", "ninety")
            .with("temperature", "NaN")
            .with("systolic_bp", "inf")
            .with("blood_glucose", "300")
            .with("respiratory_rate", " 35 ");
        let alerts = check_vitals(&readings, None);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].origin, AlertOrigin::Vital { key: VitalKey::RespiratoryRate });
        assert_eq!(check_vitals_simple(&readings).lines().count(), 1);
    }

    #[test]
    fn only_garbage_yields_sentinel() {
        let readings = VitalReadings::new().with("spo2", "").with("pulse", "80");
        assert_eq!(check_vitals_simple(&readings), NO_VITALS_ENTERED);
    }

    #[test]
    fn parse_reading_reports_key_and_raw() {
        assert_eq!(parse_reading(VitalKey::Gcs, "14").unwrap(), 14.0);
        assert_eq!(
            parse_reading(VitalKey::Gcs, "n/a"),
            Err(VitalError::InvalidValue {
                key: "gcs".into(),
                raw: "n/a".into()
            })
        );
    }

    #[test]
    fn simple_status_marks_each_line() {
        let readings = VitalReadings::new()
            .with("heart_rate", "80")
            .with("spo2", "91")
            .with("systolic_bp", "190");
        let text = check_vitals_simple(&readings);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Heart rate: 80 bpm (normal)");
        assert_eq!(lines[1], "Oxygen saturation: 91 % (abnormal)");
        assert_eq!(lines[2], "Systolic blood pressure: 190 mmHg (CRITICAL)");
    }

    #[test]
    fn critical_reading_gets_disease_context() {
        let session = StubKnowledge::for_patient("Sara")
            .disease("Myasthenia Gravis", "moderate")
            .snapshot();
        let alerts = check_vitals(&spo2("85"), Some(&session));
        assert!(alerts[0].details.contains("FVC"));

        let cad = StubKnowledge::for_patient("Abdullah")
            .disease("Coronary Artery Disease", "severe")
            .snapshot();
        let readings = VitalReadings::new().with("heart_rate", "160");
        let alerts = check_vitals(&readings, Some(&cad));
        assert!(alerts[0].details.contains("ECG"));
    }

    #[test]
    fn context_resolves_from_arabic_display_name() {
        let session = StubKnowledge::for_patient("Mahmoud")
            .disease("ربو", "moderate")
            .snapshot();
        let alerts = check_vitals(&spo2("80"), Some(&session));
        assert!(alerts[0].details.contains("nebulizer"));
    }

    #[test]
    fn abnormal_reading_gets_no_context() {
        let session = StubKnowledge::for_patient("Sara")
            .disease("Myasthenia Gravis", "moderate")
            .snapshot();
        let alerts = check_vitals(&spo2("92"), Some(&session));
        assert_eq!(alerts[0].alert_type, AlertType::High);
        assert!(alerts[0].details.is_empty());
    }

    #[test]
    fn critical_without_session_has_empty_details() {
        let alerts = check_vitals(&spo2("80"), None);
        assert!(alerts[0].details.is_empty());
    }
}
