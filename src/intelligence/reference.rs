use crate::models::{DiseaseCategory, VitalKey};

/// Normal and critical bands for one vital sign.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VitalRange {
    pub key: VitalKey,
    pub name: &'static str,
    pub unit: &'static str,
    pub min: f64,
    pub max: f64,
    pub critical_low: f64,
    pub critical_high: f64,
}

impl VitalRange {
    pub fn for_key(key: VitalKey) -> Option<&'static VitalRange> {
        VITAL_RANGES.iter().find(|r| r.key == key)
    }

    /// At or beyond either critical boundary.
    pub fn is_critical(&self, value: f64) -> bool {
        value <= self.critical_low || value >= self.critical_high
    }

    /// Outside the normal band.
    pub fn is_abnormal(&self, value: f64) -> bool {
        value < self.min || value > self.max
    }
}

pub const VITAL_RANGES: &[VitalRange] = &[
    VitalRange {
        key: VitalKey::SystolicBp,
        name: "Systolic blood pressure",
        unit: "mmHg",
        min: 90.0,
        max: 140.0,
        critical_low: 80.0,
        critical_high: 180.0,
    },
    VitalRange {
        key: VitalKey::DiastolicBp,
        name: "Diastolic blood pressure",
        unit: "mmHg",
        min: 60.0,
        max: 90.0,
        critical_low: 50.0,
        critical_high: 110.0,
    },
    VitalRange {
        key: VitalKey::HeartRate,
        name: "Heart rate",
        unit: "bpm",
        min: 60.0,
        max: 100.0,
        critical_low: 40.0,
        critical_high: 150.0,
    },
    VitalRange {
        key: VitalKey::Spo2,
        name: "Oxygen saturation",
        unit: "%",
        min: 95.0,
        max: 100.0,
        critical_low: 88.0,
        critical_high: 101.0,
    },
    VitalRange {
        key: VitalKey::Temperature,
        name: "Temperature",
        unit: "°C",
        min: 36.1,
        max: 37.2,
        critical_low: 34.0,
        critical_high: 40.0,
    },
    VitalRange {
        key: VitalKey::RespiratoryRate,
        name: "Respiratory rate",
        unit: "breaths/min",
        min: 12.0,
        max: 20.0,
        critical_low: 8.0,
        critical_high: 30.0,
    },
    VitalRange {
        key: VitalKey::Gcs,
        name: "Level of consciousness (GCS)",
        unit: "points",
        min: 15.0,
        max: 15.0,
        critical_low: 8.0,
        critical_high: 16.0,
    },
];

/// Disease category whose critical readings on `keys` warrant `note`.
#[derive(Debug, Clone, Copy)]
pub struct VitalContextRule {
    pub category: DiseaseCategory,
    pub keys: &'static [VitalKey],
    pub note: &'static str,
}

/// Checked in order; the first matching rule supplies the note.
pub const VITAL_CONTEXT_RULES: &[VitalContextRule] = &[
    VitalContextRule {
        category: DiseaseCategory::CoronaryArteryDisease,
        keys: &[VitalKey::SystolicBp, VitalKey::HeartRate],
        note: "History of coronary artery disease with stent: immediate ECG and troponin",
    },
    VitalContextRule {
        category: DiseaseCategory::Asthma,
        keys: &[VitalKey::Spo2],
        note: "Patient has asthma: may need an immediate nebulizer",
    },
    VitalContextRule {
        category: DiseaseCategory::MyastheniaGravis,
        keys: &[VitalKey::Spo2, VitalKey::RespiratoryRate],
        note: "Patient has myasthenia gravis: risk of respiratory failure, monitor FVC",
    },
];

/// Note for a critical `key` reading given the patient's disease categories.
pub fn contextual_note(categories: &[DiseaseCategory], key: VitalKey) -> Option<&'static str> {
    VITAL_CONTEXT_RULES
        .iter()
        .find(|rule| categories.contains(&rule.category) && rule.keys.contains(&key))
        .map(|rule| rule.note)
}
