use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::codec::{LookupDescriptor, encode_job};
use crate::error::TriggerError;
use crate::health::{HealthMonitor, HealthStatus};
use crate::store::ResourceStore;
use crate::template::Template;

/// Resolves a lookup descriptor into an encoded Job built from the named
/// CronJob.
#[derive(Clone)]
pub struct ResourceFetcher {
    store: Arc<dyn ResourceStore>,
    health: Arc<HealthMonitor>,
}

impl ResourceFetcher {
    pub fn new(
        store: Arc<dyn ResourceStore>,
        health: Arc<HealthMonitor>,
    ) -> Self {
        Self { store, health }
    }

    #[instrument(level = "debug", skip_all)]
    pub async fn fetch(
        &self,
        descriptor: &[u8],
    ) -> Result<Vec<u8>, TriggerError> {
        let descriptor = LookupDescriptor::decode(descriptor)
            .map_err(TriggerError::DescriptorDecode)?;
        // Empty names are not rejected here; the store reports them.
        let namespace = descriptor.namespace();
        let name = descriptor.cronjob();
        info!(name, namespace, "fetching cronjob");

        let payload = match self.store.get_template(namespace, name).await {
            Ok(payload) => payload,
            Err(source) => {
                error!(
                    name,
                    namespace,
                    error = %source,
                    "cronjob lookup failed"
                );
                self.health.set(HealthStatus::NotServing);
                return Err(TriggerError::TemplateLookup {
                    namespace: namespace.to_string(),
                    name: name.to_string(),
                    source,
                });
            }
        };

        let template = Template::decode(&payload)?;
        let job = template.instantiate(namespace);
        encode_job(&job).map_err(TriggerError::Serialization)
    }
}
