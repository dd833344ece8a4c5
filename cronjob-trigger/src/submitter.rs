use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::codec::decode_job;
use crate::error::TriggerError;
use crate::health::{HealthMonitor, HealthStatus};
use crate::store::ResourceStore;

/// Marker returned to the caller once a Job was accepted by the store.
pub const SUCCESS_RESPONSE: &[u8] = b"success";

/// Creates the Job produced by [`crate::fetcher::ResourceFetcher`].
#[derive(Clone)]
pub struct JobSubmitter {
    store: Arc<dyn ResourceStore>,
    health: Arc<HealthMonitor>,
}

impl JobSubmitter {
    pub fn new(
        store: Arc<dyn ResourceStore>,
        health: Arc<HealthMonitor>,
    ) -> Self {
        Self { store, health }
    }

    #[instrument(level = "debug", skip_all)]
    pub async fn submit(
        &self,
        resource: &[u8],
    ) -> Result<Vec<u8>, TriggerError> {
        let job = decode_job(resource).map_err(TriggerError::JobDecode)?;
        let namespace = job.metadata.namespace.clone().unwrap_or_default();
        let generate_name =
            job.metadata.generate_name.as_deref().unwrap_or_default();
        info!(namespace = %namespace, generate_name, "creating job");

        if let Err(source) = self.store.create_job(&namespace, &job).await {
            error!(
                namespace = %namespace,
                generate_name,
                error = %source,
                "job creation failed"
            );
            self.health.set(HealthStatus::NotServing);
            return Err(TriggerError::Submission { namespace, source });
        }
        Ok(SUCCESS_RESPONSE.to_vec())
    }
}
