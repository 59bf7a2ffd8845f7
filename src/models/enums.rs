use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(RiskLevel {
    Moderate => "moderate",
    High => "high",
    Critical => "critical",
});

str_enum!(AlertType {
    Critical => "critical",
    High => "high",
    Moderate => "moderate",
    Info => "info",
    Success => "success",
});

str_enum!(VitalKey {
    SystolicBp => "systolic_bp",
    DiastolicBp => "diastolic_bp",
    HeartRate => "heart_rate",
    Spo2 => "spo2",
    Temperature => "temperature",
    RespiratoryRate => "respiratory_rate",
    Gcs => "gcs",
});

str_enum!(DiseaseCategory {
    CoronaryArteryDisease => "coronary_artery_disease",
    Hypertension => "hypertension",
    Type2Diabetes => "type2_diabetes",
    Asthma => "asthma",
    MyastheniaGravis => "myasthenia_gravis",
    ChronicKidneyDisease => "chronic_kidney_disease",
    PepticUlcer => "peptic_ulcer",
});

impl RiskLevel {
    /// Alert type raised for a contraindication at this risk level.
    pub fn alert_type(self) -> AlertType {
        match self {
            RiskLevel::Critical => AlertType::Critical,
            RiskLevel::High => AlertType::High,
            RiskLevel::Moderate => AlertType::Moderate,
        }
    }

    /// Capitalized label used in alert titles.
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Critical => "Critical",
            RiskLevel::High => "High",
            RiskLevel::Moderate => "Moderate",
        }
    }

    /// Sort rank, most severe first.
    pub fn rank(self) -> u8 {
        match self {
            RiskLevel::Critical => 0,
            RiskLevel::High => 1,
            RiskLevel::Moderate => 2,
        }
    }
}

/// Display names (lowercase) recognised for each category when a record has no code.
const DISEASE_ALIASES: &[(DiseaseCategory, &[&str])] = &[
    (
        DiseaseCategory::CoronaryArteryDisease,
        &[
            "coronary artery disease",
            "coronary insufficiency",
            "ischemic heart disease",
            "قصور في الشريان التاجي",
        ],
    ),
    (
        DiseaseCategory::Hypertension,
        &["hypertension", "high blood pressure", "ارتفاع ضغط الدم"],
    ),
    (
        DiseaseCategory::Type2Diabetes,
        &["type 2 diabetes", "diabetes mellitus type 2", "سكري نوع 2"],
    ),
    (DiseaseCategory::Asthma, &["asthma", "bronchial asthma", "ربو"]),
    (
        DiseaseCategory::MyastheniaGravis,
        &["myasthenia gravis", "الوهن العضلي الوبيل"],
    ),
    (
        DiseaseCategory::ChronicKidneyDisease,
        &["chronic kidney disease", "renal failure", "قصور كلوي"],
    ),
    (
        DiseaseCategory::PepticUlcer,
        &["peptic ulcer", "gastric ulcer", "قرحة معدة"],
    ),
];

impl DiseaseCategory {
    /// Resolve a category from a display name (exact, case-insensitive alias match).
    pub fn from_display_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_lowercase();
        DISEASE_ALIASES
            .iter()
            .find(|(_, aliases)| aliases.iter().any(|a| *a == lower))
            .map(|(category, _)| *category)
    }
}
