use async_trait::async_trait;

use super::models::{SteeringTarget, SteeringTargetRequest};
use crate::client::{Outcome, RequestOptions, TrafficOpsClient};
use crate::core::Result;
use crate::harness::{require_endpoint, IdRef, Resource};

/// `/steering/{ds}/targets`
///
/// The endpoint id is the steering delivery service. Writes take the
/// delivery service and target from the body when no endpoint is given.
pub struct SteeringTargets;

fn body_ids(body: Option<&SteeringTargetRequest>) -> (Option<i64>, Option<i64>) {
    match body {
        Some(body) => (
            body.delivery_service_id.as_ref().and_then(IdRef::id),
            body.target_id.as_ref().and_then(IdRef::id),
        ),
        None => (None, None),
    }
}

#[async_trait]
impl Resource for SteeringTargets {
    type Session = TrafficOpsClient;
    type Item = SteeringTarget;
    type Body = SteeringTargetRequest;

    fn name(&self) -> &'static str {
        "steering targets"
    }

    async fn read(
        &self,
        session: &TrafficOpsClient,
        endpoint: Option<i64>,
        options: &RequestOptions,
    ) -> Result<Outcome<SteeringTarget>> {
        let ds = require_endpoint(self.name(), endpoint)?;
        session.get(&format!("steering/{}/targets", ds), options).await
    }

    async fn create(
        &self,
        session: &TrafficOpsClient,
        endpoint: Option<i64>,
        body: Option<&SteeringTargetRequest>,
        options: &RequestOptions,
    ) -> Result<Outcome<SteeringTarget>> {
        let (body_ds, _) = body_ids(body);
        let ds = require_endpoint(self.name(), endpoint.or(body_ds))?;
        session
            .post(&format!("steering/{}/targets", ds), body, options)
            .await
    }

    async fn update(
        &self,
        session: &TrafficOpsClient,
        endpoint: Option<i64>,
        body: Option<&SteeringTargetRequest>,
        options: &RequestOptions,
    ) -> Result<Outcome<SteeringTarget>> {
        let (body_ds, target) = body_ids(body);
        let ds = require_endpoint(self.name(), endpoint.or(body_ds))?;
        let target = require_endpoint(self.name(), target)?;
        session
            .put(&format!("steering/{}/targets/{}", ds, target), body, options)
            .await
    }

    async fn delete(
        &self,
        session: &TrafficOpsClient,
        endpoint: Option<i64>,
        body: Option<&SteeringTargetRequest>,
        options: &RequestOptions,
    ) -> Result<Outcome<SteeringTarget>> {
        let (body_ds, target) = body_ids(body);
        let ds = require_endpoint(self.name(), endpoint.or(body_ds))?;
        let target = require_endpoint(self.name(), target)?;
        session
            .delete(&format!("steering/{}/targets/{}", ds, target), options)
            .await
    }
}
