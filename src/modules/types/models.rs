use serde::{Deserialize, Serialize};

/// Type row (cache group types, steering types, regex types)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Type {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub use_in_table: Option<String>,
}
