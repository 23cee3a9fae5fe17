//! Capex Estimator - Parametric construction cost estimation
//!
//! This crate estimates construction CAPEX for building projects from
//! per-chapter rate tables, multiplicative adjustment factors and optional
//! benchmark calibration, with a Monte Carlo risk overlay and report export.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
