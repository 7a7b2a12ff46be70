pub mod about;
pub mod cache_groups;
pub mod delivery_services;
pub mod ds_regexes;
pub mod steering_targets;
pub mod types;

use crate::client::Outcome;
use crate::core::{HarnessError, Result};

/// Id of the single entity a by-key lookup must return
///
/// Fails on API errors, on anything other than exactly one result and on a
/// null id.
pub(crate) fn single_id<T>(
    outcome: Outcome<T>,
    what: &str,
    id_of: impl Fn(&T) -> Option<i64>,
) -> Result<i64> {
    if let Some(error) = outcome.error {
        return Err(HarnessError::lookup(format!("GET {} failed: {}", what, error)));
    }

    match outcome.response.as_slice() {
        [item] => id_of(item).ok_or_else(|| HarnessError::lookup(format!("{} has a null id", what))),
        items => Err(HarnessError::lookup(format!(
            "expected exactly 1 {}, got {}",
            what,
            items.len()
        ))),
    }
}
