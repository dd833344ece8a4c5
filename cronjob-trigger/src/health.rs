use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tokio_stream::{Stream, StreamExt};
use tonic::{Request, Response, Status};
use tracing::{debug, warn};
use trigger_pb::ServingStatus;
use trigger_pb::health::health_server::Health;
use trigger_pb::health::{HealthCheckRequest, HealthCheckResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Serving,
    NotServing,
}

impl From<HealthStatus> for ServingStatus {
    fn from(value: HealthStatus) -> Self {
        match value {
            HealthStatus::Serving => ServingStatus::Serving,
            HealthStatus::NotServing => ServingStatus::NotServing,
        }
    }
}

/// Process-wide serving status. Starts as [`HealthStatus::Serving`]; the
/// trigger only ever degrades it, recovery needs a restart.
#[derive(Debug)]
pub struct HealthMonitor {
    tx: watch::Sender<HealthStatus>,
}

impl Default for HealthMonitor {
    fn default() -> Self {
        let (tx, _rx) = watch::channel(HealthStatus::Serving);
        Self { tx }
    }
}

impl HealthMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> HealthStatus {
        *self.tx.borrow()
    }

    pub fn set(&self, status: HealthStatus) {
        let changed = self.tx.send_if_modified(|current| {
            if *current == status {
                false
            } else {
                *current = status;
                true
            }
        });
        if changed {
            match status {
                HealthStatus::NotServing => {
                    warn!("health status changed to NOT_SERVING")
                }
                HealthStatus::Serving => {
                    debug!("health status changed to SERVING")
                }
            }
        }
    }

    /// Receiver yielding the current status and every later change.
    pub fn subscribe(&self) -> watch::Receiver<HealthStatus> {
        self.tx.subscribe()
    }
}

/// `grpc.health.v1.Health` backed by a [`HealthMonitor`]. Only the unnamed
/// service scope `""` is known.
pub struct HealthSvc {
    monitor: Arc<HealthMonitor>,
}

impl HealthSvc {
    pub fn new(monitor: Arc<HealthMonitor>) -> Self {
        Self { monitor }
    }
}

fn response(status: ServingStatus) -> HealthCheckResponse {
    HealthCheckResponse {
        status: status as i32,
    }
}

#[tonic::async_trait]
impl Health for HealthSvc {
    async fn check(
        &self,
        request: Request<HealthCheckRequest>,
    ) -> Result<Response<HealthCheckResponse>, Status> {
        let service = request.into_inner().service;
        if !service.is_empty() {
            return Err(Status::not_found(format!(
                "unknown service '{service}'"
            )));
        }
        Ok(Response::new(response(self.monitor.get().into())))
    }

    type WatchStream = Pin<
        Box<dyn Stream<Item = Result<HealthCheckResponse, Status>> + Send>,
    >;

    async fn watch(
        &self,
        request: Request<HealthCheckRequest>,
    ) -> Result<Response<Self::WatchStream>, Status> {
        let service = request.into_inner().service;
        if !service.is_empty() {
            let unknown = tokio_stream::once(Ok(response(
                ServingStatus::ServiceUnknown,
            )));
            return Ok(Response::new(
                Box::pin(unknown) as Self::WatchStream
            ));
        }
        let stream = WatchStream::new(self.monitor.subscribe())
            .map(|status| Ok(response(status.into())));
        Ok(Response::new(Box::pin(stream) as Self::WatchStream))
    }
}
