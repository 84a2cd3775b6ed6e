pub mod analyze;
pub mod aspects;
pub mod classify;
pub mod dispatch;
pub mod interactive;
pub mod reports;
pub mod schema;
pub mod shared;
