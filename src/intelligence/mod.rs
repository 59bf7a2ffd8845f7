//! Clinical alerting engine.
//!
//! Pure functions over a loaded [`SessionSnapshot`](crate::session_cache::SessionSnapshot):
//! substance and allergy matching, vital-sign validation, and the context
//! block handed to the advisor. Nothing here touches storage or the network.

pub mod context;
pub mod messages;
pub mod reference;
pub mod substance;
pub mod vitals;

pub use context::compile_context;
pub use reference::{VitalRange, VITAL_RANGES};
pub use substance::{check_multiple_substances, check_substance};
pub use vitals::{check_vitals, check_vitals_simple, VitalError, VitalStatus, NO_VITALS_ENTERED};
