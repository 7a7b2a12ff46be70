use crate::core::{HarnessError, Result};
use std::env;
use std::path::PathBuf;

pub mod api;
pub mod database;

pub use api::ApiConfig;
pub use database::DatabaseConfig;

/// Main harness configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub api: ApiConfig,
    pub credentials: CredentialsConfig,
    pub database: Option<DatabaseConfig>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_json: bool,
    pub fixtures_path: PathBuf,
    /// How far behind "now" the conditional-request baseline sits
    pub conditional_skew_secs: u64,
}

#[derive(Clone)]
pub struct CredentialsConfig {
    pub user: String,
    pub password: String,
    pub steering_user: String,
    pub steering_password: String,
}

impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("user", &self.user)
            .field("password", &"***")
            .field("steering_user", &self.steering_user)
            .field("steering_password", &"***")
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(AppConfig {
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            log_json: var("LOG_FORMAT")
                .map(|format| format.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
            fixtures_path: var("TO_FIXTURES")
                .unwrap_or_else(|| "tests/fixtures/tc-fixtures.json".to_string())
                .into(),
            conditional_skew_secs: var("TO_CONDITIONAL_SKEW_SECS")
                .unwrap_or_else(|| "15".to_string())
                .parse()
                .map_err(|_| HarnessError::configuration("Invalid TO_CONDITIONAL_SKEW_SECS"))?,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_json: false,
            fixtures_path: "tests/fixtures/tc-fixtures.json".into(),
            conditional_skew_secs: 15,
        }
    }
}

impl CredentialsConfig {
    pub fn from_env() -> Result<Self> {
        Ok(CredentialsConfig {
            user: env::var("TO_USER")
                .map_err(|_| HarnessError::configuration("TO_USER not set"))?,
            password: env::var("TO_PASSWORD")
                .map_err(|_| HarnessError::configuration("TO_PASSWORD not set"))?,
            steering_user: env::var("TO_STEERING_USER")
                .unwrap_or_else(|_| "steering".to_string()),
            steering_password: env::var("TO_STEERING_PASSWORD")
                .unwrap_or_else(|_| "pa$$word".to_string()),
        })
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let database = match env::var("DATABASE_URL") {
            Ok(_) => Some(DatabaseConfig::from_env()?),
            Err(_) => None,
        };

        Ok(Config {
            app: AppConfig::from_env()?,
            api: ApiConfig::from_env()?,
            credentials: CredentialsConfig::from_env()?,
            database,
        })
    }

    /// Configuration for an API at `base_url` with explicit credentials and no database.
    pub fn for_api(base_url: impl Into<String>, user: &str, password: &str) -> Self {
        Config {
            app: AppConfig::default(),
            api: ApiConfig::new(base_url),
            credentials: CredentialsConfig {
                user: user.to_string(),
                password: password.to_string(),
                steering_user: "steering".to_string(),
                steering_password: "pa$$word".to_string(),
            },
            database: None,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.api.validate()?;

        if self.app.conditional_skew_secs == 0 {
            return Err(HarnessError::configuration(
                "Conditional skew must be greater than 0",
            ));
        }

        if self.credentials.user.is_empty() {
            return Err(HarnessError::configuration("TO_USER must not be empty"));
        }

        Ok(())
    }
}
