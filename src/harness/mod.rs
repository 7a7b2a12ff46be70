//! Table-driven, conditional-request-aware CRUD test harness.
//!
//! A [`MethodTests`] table maps method buckets to named [`TestCase`]s. The
//! [`Engine`] resolves each case's references, dispatches it through a
//! [`Resource`] and runs its [`checks`] against the resulting outcome.

pub mod case;
pub mod checks;
pub mod engine;
pub mod reference;
pub mod report;
pub mod verb;

pub use case::{MethodTests, Scenario, Scenarios, TestCase};
pub use checks::{Check, CheckFailure};
pub use engine::{require_endpoint, Engine, Resource};
pub use reference::{resolve_body, EntityRef, IdRef, ParamValue, Resolve, Resolver};
pub use report::{Report, ScenarioResult, Verdict};
pub use verb::Verb;
