use serde::{Deserialize, Serialize};

/// The slice of a delivery service the harness needs for lookups
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryService {
    pub id: Option<i64>,
    pub xml_id: Option<String>,
    pub display_name: Option<String>,
    pub active: Option<bool>,
}
