pub mod enums;

mod alert;
mod allergy;
mod contraindication;
mod disease;
mod lab;
mod medication;
mod patient;
mod surgery;
mod visit;
mod vital_sign;

pub use alert::*;
pub use allergy::*;
pub use contraindication::*;
pub use disease::*;
pub use enums::{AlertType, DiseaseCategory, RiskLevel, VitalKey};
pub use lab::*;
pub use medication::*;
pub use patient::*;
pub use surgery::*;
pub use visit::*;
pub use vital_sign::*;
