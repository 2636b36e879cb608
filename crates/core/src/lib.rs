//! triage-core: Shared symptom-triage types and checks
//!
//! This crate provides the domain logic used across the triage server:
//! input validation, emergency detection, the emergency contact payload,
//! and the query history record type. It performs no I/O.

pub mod contacts;
pub mod emergency;
pub mod error;
pub mod record;
pub mod validate;

pub use contacts::EmergencyInfo;
pub use emergency::{EMERGENCY_WARNING, contains_emergency_symptoms};
pub use error::TriageError;
pub use record::QueryRecord;
pub use validate::validate_symptoms;
