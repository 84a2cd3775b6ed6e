//! # vigil-core
//!
//! Core types and error taxonomy for Vigil, the crime-report triage engine.
//!
//! This crate provides the foundational types shared across all Vigil crates:
//! - Aspect definitions and per-aspect classification results
//! - The assembled [`TriageResult`] and chart-ready [`ChartSeries`]
//! - Document-store records (crime reports and user profiles)
//! - Time-window filtering used when browsing reports
//! - Cross-cutting error types

pub mod aspect;
pub mod errors;
pub mod records;
pub mod triage;
pub mod window;

pub use aspect::{
    AspectDefinition, AspectResult, ClassificationScore, UNAVAILABLE_LABEL, UNKNOWN_LABEL,
};
pub use errors::TriageError;
pub use records::{Coordinates, CrimeReport, UserProfile, UserType};
pub use triage::{ChartSeries, TriageResult};
pub use window::TimeWindow;
