mod grpc;

use std::sync::Arc;

use tonic::service::Routes;
use trigger_pb::health::health_server::HealthServer;
use trigger_pb::trigger::trigger_server::TriggerServer;

use crate::error::TriggerError;
use crate::fetcher::ResourceFetcher;
use crate::health::{HealthMonitor, HealthSvc};
use crate::policy::{AcceptAll, Policy, PolicyVerdict};
use crate::store::ResourceStore;
use crate::submitter::JobSubmitter;

/// The three-phase trigger protocol: fetch a Job built from a CronJob,
/// execute it, then evaluate the outcome.
#[derive(Clone)]
pub struct CronJobTrigger {
    fetcher: ResourceFetcher,
    submitter: JobSubmitter,
    policy: Arc<dyn Policy>,
}

impl CronJobTrigger {
    pub fn new(
        store: Arc<dyn ResourceStore>,
        health: Arc<HealthMonitor>,
    ) -> Self {
        Self {
            fetcher: ResourceFetcher::new(store.clone(), health.clone()),
            submitter: JobSubmitter::new(store, health),
            policy: Arc::new(AcceptAll),
        }
    }

    pub fn with_policy(mut self, policy: Arc<dyn Policy>) -> Self {
        self.policy = policy;
        self
    }

    pub async fn fetch_resource(
        &self,
        descriptor: &[u8],
    ) -> Result<Vec<u8>, TriggerError> {
        self.fetcher.fetch(descriptor).await
    }

    pub async fn execute(
        &self,
        resource: &[u8],
    ) -> Result<Vec<u8>, TriggerError> {
        self.submitter.submit(resource).await
    }

    pub async fn apply_policy(&self, result: &[u8]) -> PolicyVerdict {
        self.policy.evaluate(result).await
    }
}

/// gRPC routes serving the trigger protocol, the health service and server
/// reflection.
pub fn build_routes(
    trigger: CronJobTrigger,
    health: Arc<HealthMonitor>,
) -> Result<Routes, tonic_reflection::server::Error> {
    let reflection_server_v1a = tonic_reflection::server::Builder::configure()
        .register_encoded_file_descriptor_set(trigger_pb::FILE_DESCRIPTOR_SET)
        .build_v1alpha()?;
    let reflection_server_v1 = tonic_reflection::server::Builder::configure()
        .register_encoded_file_descriptor_set(trigger_pb::FILE_DESCRIPTOR_SET)
        .build_v1()?;

    let mut route_builder = Routes::builder();
    route_builder
        .add_service(TriggerServer::new(trigger))
        .add_service(HealthServer::new(HealthSvc::new(health)))
        .add_service(reflection_server_v1a)
        .add_service(reflection_server_v1);
    Ok(route_builder.routes())
}
