// Symbolic References
//
// Table entries name the entities they touch ("cache group cachegroup1",
// "type EDGE_LOC") instead of embedding ids. The ids only exist once the
// fixtures are on the server, so the engine resolves every reference right
// before dispatching the scenario.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::core::Result;

/// An entity addressed by its natural key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityRef {
    /// Type by name, e.g. `EDGE_LOC`
    Type(String),
    /// Cache group by name
    CacheGroup(String),
    /// Delivery service by xmlId
    DeliveryService(String),
    /// First regex attached to a delivery service (by xmlId)
    DeliveryServiceRegex(String),
}

impl EntityRef {
    pub fn type_named(name: impl Into<String>) -> Self {
        EntityRef::Type(name.into())
    }

    pub fn cache_group(name: impl Into<String>) -> Self {
        EntityRef::CacheGroup(name.into())
    }

    pub fn delivery_service(xml_id: impl Into<String>) -> Self {
        EntityRef::DeliveryService(xml_id.into())
    }

    pub fn ds_regex(xml_id: impl Into<String>) -> Self {
        EntityRef::DeliveryServiceRegex(xml_id.into())
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityRef::Type(name) => write!(f, "type '{}'", name),
            EntityRef::CacheGroup(name) => write!(f, "cache group '{}'", name),
            EntityRef::DeliveryService(xml_id) => write!(f, "delivery service '{}'", xml_id),
            EntityRef::DeliveryServiceRegex(xml_id) => {
                write!(f, "first regex of delivery service '{}'", xml_id)
            }
        }
    }
}

/// Turns references into ids, usually by querying the API under test
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve(&self, reference: &EntityRef) -> Result<i64>;
}

/// An id that is either known or still to be looked up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdRef {
    Id(i64),
    Deferred(EntityRef),
}

impl IdRef {
    /// Resolve in place and return the id
    pub async fn resolve(&mut self, resolver: &dyn Resolver) -> Result<i64> {
        let id = match self {
            IdRef::Id(id) => return Ok(*id),
            IdRef::Deferred(reference) => resolver.resolve(reference).await?,
        };
        *self = IdRef::Id(id);
        Ok(id)
    }

    pub fn id(&self) -> Option<i64> {
        match self {
            IdRef::Id(id) => Some(*id),
            IdRef::Deferred(_) => None,
        }
    }
}

impl From<i64> for IdRef {
    fn from(id: i64) -> Self {
        IdRef::Id(id)
    }
}

impl From<EntityRef> for IdRef {
    fn from(reference: EntityRef) -> Self {
        IdRef::Deferred(reference)
    }
}

/// Serializes as the plain id; an unresolved reference cannot go on the wire.
impl Serialize for IdRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            IdRef::Id(id) => serializer.serialize_i64(*id),
            IdRef::Deferred(reference) => Err(serde::ser::Error::custom(format!(
                "unresolved reference to {}",
                reference
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for IdRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        i64::deserialize(deserializer).map(IdRef::Id)
    }
}

/// Query parameter value, literal or an id to look up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Literal(String),
    Deferred(EntityRef),
}

impl ParamValue {
    pub async fn resolve(self, resolver: &dyn Resolver) -> Result<String> {
        match self {
            ParamValue::Literal(value) => Ok(value),
            ParamValue::Deferred(reference) => Ok(resolver.resolve(&reference).await?.to_string()),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Literal(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Literal(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Literal(value.to_string())
    }
}

impl From<EntityRef> for ParamValue {
    fn from(reference: EntityRef) -> Self {
        ParamValue::Deferred(reference)
    }
}

/// Request bodies that carry references the engine must resolve
pub trait Resolve {
    fn references(&mut self) -> Vec<&mut IdRef>;
}

impl Resolve for () {
    fn references(&mut self) -> Vec<&mut IdRef> {
        Vec::new()
    }
}

/// Resolve every reference a body carries
pub async fn resolve_body<B: Resolve + ?Sized>(body: &mut B, resolver: &dyn Resolver) -> Result<()> {
    for reference in body.references() {
        reference.resolve(resolver).await?;
    }
    Ok(())
}
