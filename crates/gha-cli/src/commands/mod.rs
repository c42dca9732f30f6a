//! Command implementations

mod readme;
mod telemetry;

pub use readme::run_readme;
pub use telemetry::run_telemetry;
