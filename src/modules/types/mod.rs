pub mod models;

pub use models::Type;

use crate::client::{RequestOptions, TrafficOpsClient};
use crate::core::Result;

/// Id of the type named `name`
pub async fn type_id_by_name(session: &TrafficOpsClient, name: &str) -> Result<i64> {
    let outcome = session
        .get::<Type>("types", &RequestOptions::new().query("name", name))
        .await?;
    super::single_id(outcome, &format!("type '{}'", name), |t| t.id)
}
