//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (scenarios, IDs, timestamps, errors)
//! - `catalog` - Module definitions and reference tables
//! - `estimation` - Pure domain services for CAPEX estimation
//! - `risk` - Monte Carlo spread and sensitivity ranking
//! - `report` - Serializable estimate reports

pub mod catalog;
pub mod estimation;
pub mod foundation;
pub mod report;
pub mod risk;
