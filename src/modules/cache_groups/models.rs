use serde::{Deserialize, Serialize};

use crate::harness::{EntityRef, IdRef, Resolve};

/// Cache group as returned by the API (and as written in fixture files)
///
/// Every field is optional: the harness asserts on presence separately from
/// value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheGroup {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(rename = "parentCachegroupName")]
    pub parent_name: Option<String>,
    #[serde(rename = "parentCachegroupId")]
    pub parent_id: Option<i64>,
    #[serde(rename = "secondaryParentCachegroupName")]
    pub secondary_parent_name: Option<String>,
    #[serde(rename = "secondaryParentCachegroupId")]
    pub secondary_parent_id: Option<i64>,
    pub fallback_to_closest: Option<bool>,
    pub localization_methods: Option<Vec<String>>,
    pub type_name: Option<String>,
    pub type_id: Option<i64>,
    pub fallbacks: Option<Vec<String>>,
    pub last_updated: Option<String>,
}

impl CacheGroup {
    pub fn has_parent(&self) -> bool {
        self.parent_id.is_some() || self.secondary_parent_id.is_some()
    }
}

/// Create/update payload; unset fields are not sent
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheGroupRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<IdRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(rename = "parentCachegroupId", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<IdRef>,
    #[serde(rename = "secondaryParentCachegroupId", skip_serializing_if = "Option::is_none")]
    pub secondary_parent_id: Option<IdRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_to_closest: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localization_methods: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_id: Option<IdRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallbacks: Option<Vec<String>>,
}

impl CacheGroupRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request for a fixture entry, joining names to ids the way the
    /// client library does: type, parent and secondary parent are looked up
    /// by name unless the fixture carries ids.
    pub fn from_fixture(cg: &CacheGroup) -> Self {
        let by_name = |id: Option<i64>, name: &Option<String>, make: fn(String) -> EntityRef| {
            id.map(IdRef::Id)
                .or_else(|| name.clone().map(|n| IdRef::Deferred(make(n))))
        };

        Self {
            id: None,
            name: cg.name.clone(),
            short_name: cg.short_name.clone(),
            latitude: cg.latitude,
            longitude: cg.longitude,
            parent_id: by_name(cg.parent_id, &cg.parent_name, EntityRef::CacheGroup),
            secondary_parent_id: by_name(
                cg.secondary_parent_id,
                &cg.secondary_parent_name,
                EntityRef::CacheGroup,
            ),
            fallback_to_closest: cg.fallback_to_closest,
            localization_methods: cg.localization_methods.clone(),
            type_name: cg.type_name.clone(),
            type_id: by_name(cg.type_id, &cg.type_name, EntityRef::Type),
            fallbacks: cg.fallbacks.clone(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn short_name(mut self, short_name: impl Into<String>) -> Self {
        self.short_name = Some(short_name.into());
        self
    }

    pub fn coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Set the type by name; the id is resolved before dispatch
    pub fn type_name(mut self, type_name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        self.type_id = Some(IdRef::Deferred(EntityRef::Type(type_name.clone())));
        self.type_name = Some(type_name);
        self
    }

    pub fn parent(mut self, name: impl Into<String>) -> Self {
        self.parent_id = Some(IdRef::Deferred(EntityRef::CacheGroup(name.into())));
        self
    }

    pub fn secondary_parent(mut self, name: impl Into<String>) -> Self {
        self.secondary_parent_id = Some(IdRef::Deferred(EntityRef::CacheGroup(name.into())));
        self
    }

    pub fn localization_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.localization_methods = Some(methods.into_iter().map(Into::into).collect());
        self
    }

    pub fn fallbacks<I, S>(mut self, fallbacks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fallbacks = Some(fallbacks.into_iter().map(Into::into).collect());
        self
    }

    /// Echo the entity's own id in the body
    pub fn with_id(mut self, id: impl Into<IdRef>) -> Self {
        self.id = Some(id.into());
        self
    }
}

impl Resolve for CacheGroupRequest {
    fn references(&mut self) -> Vec<&mut IdRef> {
        self.id
            .iter_mut()
            .chain(self.parent_id.iter_mut())
            .chain(self.secondary_parent_id.iter_mut())
            .chain(self.type_id.iter_mut())
            .collect()
    }
}
