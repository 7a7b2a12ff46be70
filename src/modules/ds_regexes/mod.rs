pub mod fixtures;
pub mod models;
pub mod resource;

pub use fixtures::{create_test_ds_regexes, delete_test_ds_regexes};
pub use models::{DeliveryServiceRegex, DeliveryServiceRegexFixture, DeliveryServiceRegexPost};
pub use resource::DeliveryServiceRegexes;

use crate::client::{RequestOptions, TrafficOpsClient};
use crate::core::{HarnessError, Result};

/// Id of the first regex attached to delivery service `ds`
///
/// The delivery service must have at least one regex.
pub async fn first_regex_id(session: &TrafficOpsClient, ds: i64, xml_id: &str) -> Result<i64> {
    let outcome = session
        .get::<DeliveryServiceRegex>(&format!("deliveryservices/{}/regexes", ds), &RequestOptions::new())
        .await?;

    if let Some(error) = outcome.error {
        return Err(HarnessError::lookup(format!(
            "GET regexes of delivery service '{}' failed: {}",
            xml_id, error
        )));
    }

    let first = outcome.response.first().ok_or_else(|| {
        HarnessError::lookup(format!("delivery service '{}' has no regexes", xml_id))
    })?;

    first
        .id
        .ok_or_else(|| HarnessError::lookup(format!("first regex of '{}' has a null id", xml_id)))
}
