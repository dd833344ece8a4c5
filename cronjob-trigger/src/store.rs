use async_trait::async_trait;
use k8s_openapi::api::batch::v1::{CronJob, Job};
use kube::Client;
use kube::api::{Api, ApiResource, DynamicObject, PostParams};
use tonic::Code;
use tracing::trace;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{kind} {namespace}/{name} not found")]
    NotFound {
        kind: &'static str,
        namespace: String,
        name: String,
    },

    #[error("kubernetes api error: {0}")]
    Api(#[from] kube::Error),
}

impl StoreError {
    /// gRPC code reported to the caller when this error ends a call.
    pub fn code(&self) -> Code {
        match self {
            StoreError::NotFound { .. } => Code::NotFound,
            StoreError::Api(kube::Error::Api(resp)) => match resp.code {
                400 | 422 => Code::InvalidArgument,
                401 => Code::Unauthenticated,
                403 => Code::PermissionDenied,
                404 => Code::NotFound,
                409 => Code::AlreadyExists,
                429 => Code::ResourceExhausted,
                _ => Code::Unavailable,
            },
            StoreError::Api(_) => Code::Unavailable,
        }
    }
}

/// Backing resource store holding the CronJob templates and receiving the
/// Job instances built from them.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// Reads the raw CronJob object `namespace/name`.
    async fn get_template(
        &self,
        namespace: &str,
        name: &str,
    ) -> StoreResult<DynamicObject>;

    /// Creates `job` in `namespace`. The write is all-or-nothing.
    async fn create_job(&self, namespace: &str, job: &Job) -> StoreResult<()>;
}

/// [`ResourceStore`] backed by the Kubernetes API server.
#[derive(Clone)]
pub struct KubeStore {
    client: Client,
}

impl KubeStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceStore for KubeStore {
    async fn get_template(
        &self,
        namespace: &str,
        name: &str,
    ) -> StoreResult<DynamicObject> {
        // Read untyped so a payload that does not parse as a CronJob is
        // reported as a decode failure rather than a lookup failure.
        let resource = ApiResource::erase::<CronJob>(&());
        let api: Api<DynamicObject> =
            Api::namespaced_with(self.client.clone(), namespace, &resource);
        trace!(namespace, name, "get cronjob");
        match api.get(name).await {
            Ok(obj) => Ok(obj),
            Err(kube::Error::Api(resp)) if resp.code == 404 => {
                Err(StoreError::NotFound {
                    kind: "CronJob",
                    namespace: namespace.to_string(),
                    name: name.to_string(),
                })
            }
            Err(e) => Err(StoreError::Api(e)),
        }
    }

    async fn create_job(&self, namespace: &str, job: &Job) -> StoreResult<()> {
        let api: Api<Job> = Api::namespaced(self.client.clone(), namespace);
        let created = api.create(&PostParams::default(), job).await?;
        trace!(
            namespace,
            name = created.metadata.name.as_deref().unwrap_or_default(),
            "job created"
        );
        Ok(())
    }
}
