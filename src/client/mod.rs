// Control-Plane API Client
//
// A logged-in (or deliberately anonymous) session against the API under
// test. Every call returns an `Outcome`: HTTP error statuses are data, not
// failures, so that expected-failure scenarios can assert on them. Only
// transport and serialization problems surface as `HarnessError`.

pub mod alerts;
pub mod conditional;
pub mod outcome;
pub mod resolver;

pub use alerts::{Alert, AlertLevel, Alerts};
pub use conditional::ConditionalBaseline;
pub use outcome::{ApiError, Outcome, ReqInf, RequestOptions};

use reqwest::header::{HeaderValue, CONTENT_TYPE, COOKIE, SET_COOKIE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::ApiConfig;
use crate::core::{HarnessError, Result};

/// HTTP session against the control-plane API
pub struct TrafficOpsClient {
    http: Client,
    api: ApiConfig,
    cookie: Option<HeaderValue>,
    user: Option<String>,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    u: &'a str,
    p: &'a str,
}

#[derive(Deserialize)]
struct Envelope<T> {
    response: Option<OneOrMany<T>>,
    #[serde(default)]
    alerts: Alerts,
}

#[derive(Deserialize)]
struct AlertsEnvelope {
    #[serde(default)]
    alerts: Alerts,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

impl TrafficOpsClient {
    /// Session that never logs in, for UNAUTHORIZED scenarios
    pub fn unauthenticated(api: &ApiConfig) -> Result<Self> {
        Ok(Self {
            http: build_http(api)?,
            api: api.clone(),
            cookie: None,
            user: None,
        })
    }

    /// Log in and keep the session cookie for subsequent requests
    pub async fn login(api: &ApiConfig, user: &str, password: &str) -> Result<Self> {
        let http = build_http(api)?;
        let url = api.endpoint("user/login");

        let response = http
            .post(&url)
            .json(&LoginRequest { u: user, p: password })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HarnessError::Authentication(format!(
                "login as '{}' returned {}: {}",
                user, status, body
            )));
        }

        let cookies: Vec<String> = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(|value| value.split(';').next())
            .map(|pair| pair.trim().to_string())
            .filter(|pair| !pair.is_empty())
            .collect();

        if cookies.is_empty() {
            return Err(HarnessError::Authentication(format!(
                "login as '{}' returned no session cookie",
                user
            )));
        }

        let cookie = HeaderValue::from_str(&cookies.join("; "))
            .map_err(|e| HarnessError::Authentication(format!("unusable session cookie: {}", e)))?;

        tracing::info!(user = user, base_url = %api.base_url, "Logged in to control-plane API");

        Ok(Self {
            http,
            api: api.clone(),
            cookie: Some(cookie),
            user: Some(user.to_string()),
        })
    }

    /// Logged-in user name, `None` for anonymous sessions
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<Outcome<T>> {
        self.send::<(), T>(Method::GET, path, None, options).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&B>,
        options: &RequestOptions,
    ) -> Result<Outcome<T>> {
        self.send(Method::POST, path, body, options).await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&B>,
        options: &RequestOptions,
    ) -> Result<Outcome<T>> {
        self.send(Method::PUT, path, body, options).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<Outcome<T>> {
        self.send::<(), T>(Method::DELETE, path, None, options).await
    }

    /// GET an endpoint that answers with a bare object instead of an envelope
    pub async fn get_bare<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<Outcome<T>> {
        let (info, bytes) = self.exchange::<()>(Method::GET, path, None, options).await?;
        decode_bare_outcome(info, &bytes)
    }

    async fn send<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: &RequestOptions,
    ) -> Result<Outcome<T>> {
        let (info, bytes) = self.exchange(method, path, body, options).await?;
        decode_outcome(info, &bytes)
    }

    async fn exchange<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: &RequestOptions,
    ) -> Result<(ReqInf, Vec<u8>)> {
        let url = self.api.endpoint(path);

        let mut request = self
            .http
            .request(method.clone(), &url)
            .headers(options.headers.clone());

        if !options.query.is_empty() {
            request = request.query(&options.query);
        }

        if let Some(cookie) = &self.cookie {
            request = request.header(COOKIE, cookie.clone());
        }

        if let Some(body) = body {
            let payload = serde_json::to_vec(body)?;
            request = request.header(CONTENT_TYPE, "application/json").body(payload);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?.to_vec();

        tracing::debug!(
            method = %method,
            url = %url,
            status = status.as_u16(),
            "API request completed"
        );

        Ok((ReqInf { method, url, status }, bytes))
    }
}

fn build_http(api: &ApiConfig) -> Result<Client> {
    Client::builder()
        .timeout(api.timeout())
        .danger_accept_invalid_certs(api.insecure)
        .build()
        .map_err(HarnessError::Transport)
}

/// Turn a raw response into an `Outcome`
///
/// Error statuses keep whatever alerts the body carries; a body that is not
/// JSON is tolerated there. A 2xx body that does not match `T` is a decode
/// error.
pub(crate) fn decode_outcome<T: DeserializeOwned>(info: ReqInf, bytes: &[u8]) -> Result<Outcome<T>> {
    let status = info.status;

    if status.is_client_error() || status.is_server_error() {
        let alerts = serde_json::from_slice::<AlertsEnvelope>(bytes)
            .map(|envelope| envelope.alerts)
            .unwrap_or_default();
        return Ok(Outcome {
            info,
            response: Vec::new(),
            alerts: alerts.clone(),
            error: Some(ApiError { status, alerts }),
        });
    }

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Outcome {
            info,
            response: Vec::new(),
            alerts: Alerts::default(),
            error: None,
        });
    }

    let envelope: Envelope<T> = serde_json::from_slice(bytes)?;
    Ok(Outcome {
        info,
        response: envelope
            .response
            .map(OneOrMany::into_vec)
            .unwrap_or_default(),
        alerts: envelope.alerts,
        error: None,
    })
}

/// Like `decode_outcome`, for a 2xx body that is the item itself
pub(crate) fn decode_bare_outcome<T: DeserializeOwned>(info: ReqInf, bytes: &[u8]) -> Result<Outcome<T>> {
    if !info.status.is_success() || bytes.iter().all(u8::is_ascii_whitespace) {
        return decode_outcome(info, bytes);
    }

    let item: T = serde_json::from_slice(bytes)?;
    Ok(Outcome {
        info,
        response: vec![item],
        alerts: Alerts::default(),
        error: None,
    })
}
