pub mod models;

pub use models::DeliveryService;

use crate::client::{RequestOptions, TrafficOpsClient};
use crate::core::Result;

/// Id of the delivery service with `xml_id`
pub async fn delivery_service_id(session: &TrafficOpsClient, xml_id: &str) -> Result<i64> {
    let outcome = session
        .get::<DeliveryService>("deliveryservices", &RequestOptions::new().query("xmlId", xml_id))
        .await?;
    super::single_id(outcome, &format!("delivery service '{}'", xml_id), |ds| ds.id)
}
