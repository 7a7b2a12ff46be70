pub mod error;
pub mod telemetry;

pub use error::{HarnessError, Result};
pub use telemetry::init_tracing;
