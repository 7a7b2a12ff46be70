//! tocheck: conformance harness for a CDN control-plane API
//!
//! Table-driven CRUD scenarios with conditional-request (If-Modified-Since,
//! If-Unmodified-Since, If-Match) expectations, run against cache groups,
//! steering targets, delivery-service regexes and the about endpoint.

pub mod client;
pub mod config;
pub mod context;
pub mod core;
pub mod fixtures;
pub mod harness;
pub mod modules;

// Re-export commonly used types
pub use client::{ConditionalBaseline, Outcome, TrafficOpsClient};
pub use context::TestContext;
pub use fixtures::{with_objs, TcObj, TestData};
pub use harness::{Engine, MethodTests, Report, Scenarios, TestCase};
pub use modules::about;
pub use modules::cache_groups;
pub use modules::ds_regexes;
pub use modules::steering_targets;
