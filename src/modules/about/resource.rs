use async_trait::async_trait;

use super::models::About;
use crate::client::{Outcome, RequestOptions, TrafficOpsClient};
use crate::core::Result;
use crate::harness::Resource;

/// `GET /about`; read-only
pub struct AboutResource;

#[async_trait]
impl Resource for AboutResource {
    type Session = TrafficOpsClient;
    type Item = About;
    type Body = ();

    fn name(&self) -> &'static str {
        "about"
    }

    async fn read(
        &self,
        session: &TrafficOpsClient,
        _endpoint: Option<i64>,
        options: &RequestOptions,
    ) -> Result<Outcome<About>> {
        session.get_bare("about", options).await
    }
}
