use async_trait::async_trait;

use super::models::{DeliveryServiceRegex, DeliveryServiceRegexPost};
use crate::client::{Outcome, RequestOptions, TrafficOpsClient};
use crate::core::Result;
use crate::harness::{require_endpoint, Resource};

/// `/deliveryservices/{id}/regexes`; read and create only
pub struct DeliveryServiceRegexes;

#[async_trait]
impl Resource for DeliveryServiceRegexes {
    type Session = TrafficOpsClient;
    type Item = DeliveryServiceRegex;
    type Body = DeliveryServiceRegexPost;

    fn name(&self) -> &'static str {
        "delivery service regexes"
    }

    async fn read(
        &self,
        session: &TrafficOpsClient,
        endpoint: Option<i64>,
        options: &RequestOptions,
    ) -> Result<Outcome<DeliveryServiceRegex>> {
        let ds = require_endpoint(self.name(), endpoint)?;
        session
            .get(&format!("deliveryservices/{}/regexes", ds), options)
            .await
    }

    async fn create(
        &self,
        session: &TrafficOpsClient,
        endpoint: Option<i64>,
        body: Option<&DeliveryServiceRegexPost>,
        options: &RequestOptions,
    ) -> Result<Outcome<DeliveryServiceRegex>> {
        let ds = require_endpoint(self.name(), endpoint)?;
        session
            .post(&format!("deliveryservices/{}/regexes", ds), body, options)
            .await
    }
}
