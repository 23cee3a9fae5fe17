//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the estimation domain.

mod errors;
mod ids;
mod scenario;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::ReportId;
pub use scenario::{Scenario, ScenarioMap};
pub use timestamp::Timestamp;
