pub mod fixtures;
pub mod models;
pub mod resource;

pub use fixtures::{create_test_cache_groups, delete_test_cache_groups};
pub use models::{CacheGroup, CacheGroupRequest};
pub use resource::CacheGroups;

use crate::client::{RequestOptions, TrafficOpsClient};
use crate::core::Result;

/// Id of the cache group named `name`
pub async fn cache_group_id(session: &TrafficOpsClient, name: &str) -> Result<i64> {
    let outcome = session
        .get::<CacheGroup>("cachegroups", &RequestOptions::new().query("name", name))
        .await?;
    super::single_id(outcome, &format!("cache group '{}'", name), |cg| cg.id)
}
