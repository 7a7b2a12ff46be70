use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity attached to a server alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Success,
    Info,
    Warning,
    Error,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self {
            AlertLevel::Success => "success",
            AlertLevel::Info => "info",
            AlertLevel::Warning => "warning",
            AlertLevel::Error => "error",
            AlertLevel::Unknown => "unknown",
        };
        f.write_str(level)
    }
}

/// One human-readable operation outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub text: String,
    pub level: AlertLevel,
}

/// Alerts returned alongside (or instead of) a response payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Alerts(pub Vec<Alert>);

impl Alerts {
    pub fn new(alerts: Vec<Alert>) -> Self {
        Self(alerts)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.0.iter()
    }

    pub fn has_level(&self, level: AlertLevel) -> bool {
        self.0.iter().any(|alert| alert.level == level)
    }
}

impl fmt::Display for Alerts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .0
            .iter()
            .map(|alert| format!("{}: {}", alert.level, alert.text))
            .collect();
        write!(f, "[{}]", rendered.join(", "))
    }
}
