use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabResult {
    pub id: i64,
    pub test_name: String,
    pub result_value: Option<String>,
    pub normal_range: Option<String>,
    pub test_date: Option<NaiveDate>,
    pub is_abnormal: bool,
}
