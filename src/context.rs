use sqlx::PgPool;
use std::sync::Arc;

use crate::client::{ConditionalBaseline, TrafficOpsClient};
use crate::config::Config;
use crate::core::{init_tracing, HarnessError, Result};
use crate::fixtures::TestData;

/// Everything a test group needs, scoped to one run
///
/// Replaces package-level sessions: scenarios receive the sessions they are
/// issued through explicitly.
pub struct TestContext {
    pub config: Config,
    /// Logged in as the configured operator
    pub admin: Arc<TrafficOpsClient>,
    /// Never logged in
    pub no_auth: Arc<TrafficOpsClient>,
    /// Logged in as the steering user
    pub steering: Arc<TrafficOpsClient>,
    pub data: TestData,
    pub pool: Option<PgPool>,
}

impl TestContext {
    /// Validate `config`, log in the standard sessions and open the database pool if configured
    pub async fn new(config: Config, data: TestData) -> Result<Self> {
        config.validate()?;

        let credentials = &config.credentials;
        let admin =
            TrafficOpsClient::login(&config.api, &credentials.user, &credentials.password).await?;
        let steering = TrafficOpsClient::login(
            &config.api,
            &credentials.steering_user,
            &credentials.steering_password,
        )
        .await?;
        let no_auth = TrafficOpsClient::unauthenticated(&config.api)?;

        let pool = match &config.database {
            Some(database) => Some(database.create_pool().await?),
            None => None,
        };

        tracing::info!(
            base_url = %config.api.base_url,
            api_version = %config.api.api_version,
            database = pool.is_some(),
            "Test context ready"
        );

        Ok(Self {
            config,
            admin: Arc::new(admin),
            no_auth: Arc::new(no_auth),
            steering: Arc::new(steering),
            data,
            pool,
        })
    }

    /// Context from the environment and the fixture file it names
    ///
    /// Also installs the tracing subscriber from `LOG_LEVEL` and `LOG_FORMAT`.
    pub async fn from_env() -> Result<Self> {
        let config = Config::from_env()?;
        init_tracing(&config.app.log_level, config.app.log_json);
        let data = TestData::load(&config.app.fixtures_path)?;
        Self::new(config, data).await
    }

    /// Additional session logged in as `user`
    pub async fn session(&self, user: &str, password: &str) -> Result<Arc<TrafficOpsClient>> {
        Ok(Arc::new(
            TrafficOpsClient::login(&self.config.api, user, password).await?,
        ))
    }

    /// Conditional-request baselines for a test group, captured now
    pub fn baseline(&self) -> ConditionalBaseline {
        ConditionalBaseline::capture(self.config.app.conditional_skew_secs)
    }

    pub fn pool(&self) -> Result<&PgPool> {
        self.pool
            .as_ref()
            .ok_or_else(|| HarnessError::configuration("DATABASE_URL is required for this fixture"))
    }
}
