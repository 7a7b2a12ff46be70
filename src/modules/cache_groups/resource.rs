use async_trait::async_trait;

use super::models::{CacheGroup, CacheGroupRequest};
use crate::client::{Outcome, RequestOptions, TrafficOpsClient};
use crate::core::Result;
use crate::harness::{require_endpoint, Resource};

/// `/cachegroups`: list, create, update and delete by id
pub struct CacheGroups;

#[async_trait]
impl Resource for CacheGroups {
    type Session = TrafficOpsClient;
    type Item = CacheGroup;
    type Body = CacheGroupRequest;

    fn name(&self) -> &'static str {
        "cachegroups"
    }

    async fn read(
        &self,
        session: &TrafficOpsClient,
        endpoint: Option<i64>,
        options: &RequestOptions,
    ) -> Result<Outcome<CacheGroup>> {
        match endpoint {
            Some(id) => {
                let options = options.clone().query("id", id.to_string());
                session.get("cachegroups", &options).await
            }
            None => session.get("cachegroups", options).await,
        }
    }

    async fn create(
        &self,
        session: &TrafficOpsClient,
        _endpoint: Option<i64>,
        body: Option<&CacheGroupRequest>,
        options: &RequestOptions,
    ) -> Result<Outcome<CacheGroup>> {
        session.post("cachegroups", body, options).await
    }

    async fn update(
        &self,
        session: &TrafficOpsClient,
        endpoint: Option<i64>,
        body: Option<&CacheGroupRequest>,
        options: &RequestOptions,
    ) -> Result<Outcome<CacheGroup>> {
        let id = require_endpoint(self.name(), endpoint)?;
        session.put(&format!("cachegroups/{}", id), body, options).await
    }

    async fn delete(
        &self,
        session: &TrafficOpsClient,
        endpoint: Option<i64>,
        _body: Option<&CacheGroupRequest>,
        options: &RequestOptions,
    ) -> Result<Outcome<CacheGroup>> {
        let id = require_endpoint(self.name(), endpoint)?;
        session.delete(&format!("cachegroups/{}", id), options).await
    }
}
