use serde::{Deserialize, Serialize};

/// Build and version information of the control plane
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct About {
    #[serde(rename = "commitHash")]
    pub commit_hash: Option<String>,
    pub commits: Option<String>,
    #[serde(rename = "goVersion")]
    pub go_version: Option<String>,
    pub release: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "RPMVersion")]
    pub rpm_version: Option<String>,
    #[serde(rename = "Version")]
    pub version: Option<String>,
}
