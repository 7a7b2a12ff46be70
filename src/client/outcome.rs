use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use std::fmt;

use super::alerts::Alerts;
use crate::core::{HarnessError, Result};

/// Per-request options passed through to the API unchanged
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add a header, rejecting values that are not valid on the wire
    pub fn header(mut self, name: HeaderName, value: &str) -> Result<Self> {
        let value = HeaderValue::from_str(value).map_err(|e| HarnessError::InvalidHeader {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        self.headers.append(name, value);
        Ok(self)
    }
}

/// Request metadata captured for every call
#[derive(Debug, Clone)]
pub struct ReqInf {
    pub method: Method,
    pub url: String,
    pub status: StatusCode,
}

/// Error response from the API (status >= 400)
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub status: StatusCode,
    pub alerts: Alerts,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status, self.alerts)
    }
}

impl std::error::Error for ApiError {}

/// The (response, request-metadata, alerts, error) tuple every checker sees
#[derive(Debug, Clone)]
pub struct Outcome<T> {
    pub info: ReqInf,
    pub response: Vec<T>,
    pub alerts: Alerts,
    pub error: Option<ApiError>,
}

impl<T> Outcome<T> {
    pub fn status(&self) -> StatusCode {
        self.info.status
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// The first response item, if any
    pub fn first(&self) -> Option<&T> {
        self.response.first()
    }
}
