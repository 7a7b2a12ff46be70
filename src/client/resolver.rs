use async_trait::async_trait;

use super::TrafficOpsClient;
use crate::core::Result;
use crate::harness::{EntityRef, Resolver};
use crate::modules::{cache_groups, delivery_services, ds_regexes, types};

/// Look references up against the API this session talks to
#[async_trait]
impl Resolver for TrafficOpsClient {
    async fn resolve(&self, reference: &EntityRef) -> Result<i64> {
        let id = match reference {
            EntityRef::Type(name) => types::type_id_by_name(self, name).await?,
            EntityRef::CacheGroup(name) => cache_groups::cache_group_id(self, name).await?,
            EntityRef::DeliveryService(xml_id) => {
                delivery_services::delivery_service_id(self, xml_id).await?
            }
            EntityRef::DeliveryServiceRegex(xml_id) => {
                let ds = delivery_services::delivery_service_id(self, xml_id).await?;
                ds_regexes::first_regex_id(self, ds, xml_id).await?
            }
        };

        tracing::trace!(reference = %reference, id, "Resolved reference");
        Ok(id)
    }
}
