use crate::core::{HarnessError, Result};
use std::env;
use std::time::Duration;

/// Control-plane API connection settings
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_version: String,
    pub timeout_secs: u64,
    /// Accept self-signed certificates (development instances)
    pub insecure: bool,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_version: "5.0".to_string(),
            timeout_secs: 30,
            insecure: false,
        }
    }

    pub fn from_env() -> Result<Self> {
        let base_url =
            env::var("TO_URL").map_err(|_| HarnessError::configuration("TO_URL not set"))?;

        Ok(ApiConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_version: env::var("TO_API_VERSION").unwrap_or_else(|_| "5.0".to_string()),
            timeout_secs: env::var("TO_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .map_err(|_| HarnessError::configuration("Invalid TO_TIMEOUT_SECS"))?,
            insecure: env::var("TO_INSECURE")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Absolute URL of an API route, e.g. `cachegroups/12`
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/api/{}/{}",
            self.base_url,
            self.api_version,
            path.trim_start_matches('/')
        )
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(HarnessError::configuration(format!(
                "TO_URL must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }

        if self.timeout_secs == 0 {
            return Err(HarnessError::configuration(
                "API timeout must be greater than 0",
            ));
        }

        Ok(())
    }
}
