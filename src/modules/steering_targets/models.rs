use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::harness::{EntityRef, IdRef, Resolve};

/// Steering weight/order value
///
/// Older servers send it as a string, newer ones as a number; both decode.
/// Always serialized as a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SteeringValue(pub i64);

impl Serialize for SteeringValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.0)
    }
}

impl<'de> Deserialize<'de> for SteeringValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum IntOrString {
            Int(i64),
            Str(String),
        }

        match IntOrString::deserialize(deserializer)? {
            IntOrString::Int(value) => Ok(SteeringValue(value)),
            IntOrString::Str(value) => value
                .trim()
                .parse()
                .map(SteeringValue)
                .map_err(|_| serde::de::Error::custom(format!("invalid steering value '{}'", value))),
        }
    }
}

impl fmt::Display for SteeringValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for SteeringValue {
    fn from(value: i64) -> Self {
        SteeringValue(value)
    }
}

/// Steering target as returned by the API and as written in fixture files
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SteeringTarget {
    /// xmlId of the steering delivery service
    pub delivery_service: Option<String>,
    pub delivery_service_id: Option<i64>,
    /// xmlId of the target delivery service
    pub target: Option<String>,
    pub target_id: Option<i64>,
    #[serde(rename = "type")]
    pub type_name: Option<String>,
    pub type_id: Option<i64>,
    pub value: Option<SteeringValue>,
}

/// Create/update payload
///
/// The steering delivery service and the target both address the entity on
/// the wire, so they travel in the body as well as in the path.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SteeringTargetRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_service_id: Option<IdRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_id: Option<IdRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<SteeringValue>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_id: Option<IdRef>,
}

impl SteeringTargetRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request for a fixture entry; delivery services and the type are joined by name
    pub fn from_fixture(st: &SteeringTarget) -> Self {
        let join = |id: Option<i64>, key: &Option<String>, make: fn(String) -> EntityRef| {
            id.map(IdRef::Id)
                .or_else(|| key.clone().map(|k| IdRef::Deferred(make(k))))
        };

        Self {
            delivery_service_id: join(
                st.delivery_service_id,
                &st.delivery_service,
                EntityRef::DeliveryService,
            ),
            target_id: join(st.target_id, &st.target, EntityRef::DeliveryService),
            value: st.value,
            type_name: st.type_name.clone(),
            type_id: join(st.type_id, &st.type_name, EntityRef::Type),
        }
    }

    pub fn delivery_service(mut self, xml_id: impl Into<String>) -> Self {
        self.delivery_service_id = Some(EntityRef::delivery_service(xml_id).into());
        self
    }

    pub fn target(mut self, xml_id: impl Into<String>) -> Self {
        self.target_id = Some(EntityRef::delivery_service(xml_id).into());
        self
    }

    pub fn value(mut self, value: i64) -> Self {
        self.value = Some(SteeringValue(value));
        self
    }

    /// Type id only, looked up by name before dispatch
    pub fn type_id(mut self, type_name: impl Into<String>) -> Self {
        self.type_id = Some(EntityRef::type_named(type_name).into());
        self
    }

    /// Send the type name alongside the id
    pub fn type_named(mut self, type_name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        self.type_id = Some(EntityRef::type_named(type_name.clone()).into());
        self.type_name = Some(type_name);
        self
    }
}

impl Resolve for SteeringTargetRequest {
    fn references(&mut self) -> Vec<&mut IdRef> {
        self.delivery_service_id
            .iter_mut()
            .chain(self.target_id.iter_mut())
            .chain(self.type_id.iter_mut())
            .collect()
    }
}
