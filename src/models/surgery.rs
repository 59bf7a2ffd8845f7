use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Surgery {
    pub id: i64,
    pub name: String,
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
}
