// Fixture Lifecycle
//
// Test data is read from a JSON file once per run. `with_objs` seeds the
// listed kinds in dependency order, runs a test group and tears them down in
// reverse order.

use serde::Deserialize;
use std::fmt;
use std::future::Future;
use std::path::Path;

use crate::context::TestContext;
use crate::core::{HarnessError, Result};
use crate::modules::cache_groups::{self, CacheGroup};
use crate::modules::ds_regexes::{self, DeliveryServiceRegexFixture};
use crate::modules::steering_targets::{self, SteeringTarget};

/// Fixture entities, keyed the way the fixture file names them
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestData {
    #[serde(default)]
    pub cachegroups: Vec<CacheGroup>,
    #[serde(default)]
    pub steering_targets: Vec<SteeringTarget>,
    #[serde(default)]
    pub delivery_services_regexes: Vec<DeliveryServiceRegexFixture>,
}

impl TestData {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            HarnessError::fixture(format!("cannot read fixtures '{}': {}", path.display(), e))
        })?;
        let data = Self::from_json(&raw)?;

        tracing::info!(
            path = %path.display(),
            cachegroups = data.cachegroups.len(),
            steering_targets = data.steering_targets.len(),
            ds_regexes = data.delivery_services_regexes.len(),
            "Loaded fixture data"
        );
        Ok(data)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Kinds of fixture objects `with_objs` knows how to seed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TcObj {
    CacheGroups,
    SteeringTargets,
    DeliveryServicesRegexes,
}

impl fmt::Display for TcObj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TcObj::CacheGroups => "cachegroups",
            TcObj::SteeringTargets => "steering targets",
            TcObj::DeliveryServicesRegexes => "delivery service regexes",
        };
        f.write_str(name)
    }
}

pub async fn create(ctx: &TestContext, obj: TcObj) -> Result<()> {
    tracing::info!(objects = %obj, "Creating fixtures");
    match obj {
        TcObj::CacheGroups => {
            cache_groups::create_test_cache_groups(&ctx.admin, &ctx.data.cachegroups).await
        }
        TcObj::SteeringTargets => {
            steering_targets::create_test_steering_targets(&ctx.steering, &ctx.data.steering_targets)
                .await
        }
        TcObj::DeliveryServicesRegexes => {
            ds_regexes::create_test_ds_regexes(&ctx.admin, &ctx.data.delivery_services_regexes)
                .await
        }
    }
}

pub async fn delete(ctx: &TestContext, obj: TcObj) -> Result<()> {
    tracing::info!(objects = %obj, "Deleting fixtures");
    match obj {
        TcObj::CacheGroups => {
            cache_groups::delete_test_cache_groups(&ctx.admin, &ctx.data.cachegroups).await
        }
        TcObj::SteeringTargets => {
            steering_targets::delete_test_steering_targets(&ctx.steering, &ctx.data.steering_targets)
                .await
        }
        TcObj::DeliveryServicesRegexes => {
            ds_regexes::delete_test_ds_regexes(
                &ctx.admin,
                ctx.pool()?,
                &ctx.data.delivery_services_regexes,
            )
            .await
        }
    }
}

/// Create `objs` in order, run `body`, then delete them in reverse order
///
/// Teardown runs even when `body` reports failures, so `body` should return
/// its results (e.g. a `Report`) and leave asserting to the caller. If a
/// create fails, the kinds already created are torn down and the create
/// error is returned.
pub async fn with_objs<F, Fut, T>(ctx: &TestContext, objs: &[TcObj], body: F) -> Result<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = T>,
{
    let mut created = Vec::with_capacity(objs.len());

    for &obj in objs {
        if let Err(e) = create(ctx, obj).await {
            tracing::error!(objects = %obj, error = %e, "Fixture setup failed");
            teardown(ctx, &created).await?;
            return Err(e);
        }
        created.push(obj);
    }

    let output = body().await;

    teardown(ctx, &created).await?;
    Ok(output)
}

async fn teardown(ctx: &TestContext, created: &[TcObj]) -> Result<()> {
    let mut problems = Vec::new();
    for &obj in created.iter().rev() {
        if let Err(e) = delete(ctx, obj).await {
            tracing::error!(objects = %obj, error = %e, "Fixture teardown failed");
            problems.push(format!("{}: {}", obj, e));
        }
    }
    HarnessError::from_problems(problems)
}
