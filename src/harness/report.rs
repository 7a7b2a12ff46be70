use std::fmt;

use super::checks::CheckFailure;
use crate::core::HarnessError;

/// Result of one scenario
#[derive(Debug)]
pub enum Verdict {
    Passed,
    /// The request went through but expectations did not hold
    Failed(Vec<CheckFailure>),
    /// The scenario could not be executed (resolution, serialization, transport)
    Errored(HarnessError),
}

impl Verdict {
    pub fn is_passed(&self) -> bool {
        matches!(self, Verdict::Passed)
    }
}

#[derive(Debug)]
pub struct ScenarioResult {
    pub method: String,
    pub name: String,
    pub verdict: Verdict,
}

impl fmt::Display for ScenarioResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.verdict {
            Verdict::Passed => write!(f, "{}/{}: ok", self.method, self.name),
            Verdict::Failed(failures) => {
                write!(f, "{}/{}: FAILED", self.method, self.name)?;
                for failure in failures {
                    write!(f, "\n    - {}", failure)?;
                }
                Ok(())
            }
            Verdict::Errored(error) => {
                write!(f, "{}/{}: ERROR {}", self.method, self.name, error)
            }
        }
    }
}

/// Per-scenario results of one table run, in execution order
#[derive(Debug)]
pub struct Report {
    pub resource: &'static str,
    pub results: Vec<ScenarioResult>,
}

impl Report {
    pub fn new(resource: &'static str) -> Self {
        Self {
            resource,
            results: Vec::new(),
        }
    }

    pub fn push(&mut self, result: ScenarioResult) {
        self.results.push(result);
    }

    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|result| result.verdict.is_passed())
    }

    pub fn failures(&self) -> impl Iterator<Item = &ScenarioResult> {
        self.results
            .iter()
            .filter(|result| !result.verdict.is_passed())
    }

    pub fn get(&self, method: &str, name: &str) -> Option<&ScenarioResult> {
        self.results
            .iter()
            .find(|result| result.method == method && result.name == name)
    }

    /// Panic with every failing scenario listed
    ///
    /// # Panics
    /// If any scenario did not pass
    pub fn assert_passed(&self) {
        let failures: Vec<String> = self.failures().map(ToString::to_string).collect();
        assert!(
            failures.is_empty(),
            "{} of {} {} scenarios did not pass:\n{}",
            failures.len(),
            self.results.len(),
            self.resource,
            failures.join("\n")
        );
    }
}
