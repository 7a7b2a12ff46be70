use serde::{Deserialize, Serialize};

use crate::harness::{EntityRef, IdRef, Resolve};

/// Regex attached to a delivery service, as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryServiceRegex {
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub type_id: Option<i64>,
    pub type_name: Option<String>,
    pub set_number: Option<i64>,
    pub pattern: Option<String>,
}

/// Fixture entry: the delivery service and type are named, not numbered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryServiceRegexFixture {
    pub ds_name: String,
    pub type_name: String,
    #[serde(default)]
    pub set_number: i64,
    pub pattern: String,
}

/// POST payload for `deliveryservices/{id}/regexes`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryServiceRegexPost {
    #[serde(rename = "type")]
    pub type_id: IdRef,
    pub set_number: i64,
    pub pattern: String,
}

impl DeliveryServiceRegexPost {
    /// Post with the type looked up by name before dispatch
    pub fn new(type_name: impl Into<String>, set_number: i64, pattern: impl Into<String>) -> Self {
        Self {
            type_id: EntityRef::type_named(type_name).into(),
            set_number,
            pattern: pattern.into(),
        }
    }
}

impl From<&DeliveryServiceRegexFixture> for DeliveryServiceRegexPost {
    fn from(fixture: &DeliveryServiceRegexFixture) -> Self {
        Self::new(fixture.type_name.clone(), fixture.set_number, fixture.pattern.clone())
    }
}

impl Resolve for DeliveryServiceRegexPost {
    fn references(&mut self) -> Vec<&mut IdRef> {
        vec![&mut self.type_id]
    }
}
