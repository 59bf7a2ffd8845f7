//! Repository layer: table-scoped database operations.
//!
//! All reads are keyed by patient id, except contraindications which form a
//! global rule table keyed by disease name.

mod allergy;
mod contraindication;
mod disease;
mod lab_result;
mod medication;
mod patient;
mod surgery;
mod visit;

use chrono::NaiveDate;

pub use allergy::*;
pub use contraindication::*;
pub use disease::*;
pub use lab_result::*;
pub use medication::*;
pub use patient::*;
pub use surgery::*;
pub use visit::*;

/// Stored dates are ISO `YYYY-MM-DD`; anything else reads as absent.
pub(crate) fn parse_date(value: Option<String>) -> Option<NaiveDate> {
    value.and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok())
}
