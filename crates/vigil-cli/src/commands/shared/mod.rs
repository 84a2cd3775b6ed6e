pub mod limit;
pub mod triage;
