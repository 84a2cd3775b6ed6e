//! # vigil-triage
//!
//! The crime-report triage pipeline:
//! - [`AspectRegistry`]: the fixed, ordered set of aspects
//! - [`TriageOrchestrator`]: concurrent fan-out and partial-failure handling
//! - [`TriageSession`]: newest-request-wins supersession
//! - [`ResultPresenter`]: chart series and the summary text

pub mod orchestrator;
pub mod presenter;
pub mod registry;
pub mod session;

pub use orchestrator::TriageOrchestrator;
pub use presenter::{
    ResultPresenter, TriageView, round_half_up, to_chart_series, to_single_slice,
};
pub use registry::AspectRegistry;
pub use session::{Submission, TriageSession};
