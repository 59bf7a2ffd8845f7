use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::DiseaseCategory;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChronicDisease {
    pub id: i64,
    pub name: String,
    /// Stable identifier, see [`DiseaseCategory`].
    pub code: Option<String>,
    pub diagnosed_date: Option<NaiveDate>,
    pub severity: Option<String>,
    pub notes: Option<String>,
}

impl ChronicDisease {
    /// Category from the stored code, else from the display name.
    pub fn category(&self) -> Option<DiseaseCategory> {
        self.code
            .as_deref()
            .and_then(|c| DiseaseCategory::from_str(c).ok())
            .or_else(|| DiseaseCategory::from_display_name(&self.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disease(name: &str, code: Option<&str>) -> ChronicDisease {
        ChronicDisease {
            id: 1,
            name: name.into(),
            code: code.map(Into::into),
            diagnosed_date: None,
            severity: None,
            notes: None,
        }
    }

    #[test]
    fn stored_code_wins_over_display_name() {
        let d = disease("Renamed heart condition", Some("coronary_artery_disease"));
        assert_eq!(d.category(), Some(DiseaseCategory::CoronaryArteryDisease));
    }

    #[test]
    fn falls_back_to_display_name() {
        assert_eq!(disease("Asthma", None).category(), Some(DiseaseCategory::Asthma));
        assert_eq!(
            disease("Asthma", Some("not_a_code")).category(),
            Some(DiseaseCategory::Asthma)
        );
    }

    #[test]
    fn unknown_disease_has_no_category() {
        assert_eq!(disease("Migraine", None).category(), None);
    }
}
