use k8s_openapi::Resource;
use k8s_openapi::api::batch::v1::{CronJob, Job, JobSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{
    ObjectMeta, OwnerReference,
};
use kube::api::DynamicObject;

/// Appended to the CronJob name to form the `generateName` of every Job.
pub const GENERATE_NAME_SUFFIX: &str = "-argo-events-";

// Typed clients do not always populate TypeMeta on fetched objects, so the
// owner reference identity is pinned to batch/v1 CronJob instead of being
// read from the payload.
pub const OWNER_API_VERSION: &str = <CronJob as Resource>::API_VERSION;
pub const OWNER_KIND: &str = <CronJob as Resource>::KIND;

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("malformed cronjob payload: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("cronjob payload is missing {0}")]
    MissingField(&'static str),
}

/// A recurring job definition read from the resource store.
#[derive(Debug, Clone)]
pub struct Template {
    pub name: String,
    pub uid: String,
    pub job_spec: JobSpec,
}

impl Template {
    /// Parses the raw store payload as a `batch/v1` CronJob.
    pub fn decode(payload: &DynamicObject) -> Result<Self, TemplateError> {
        let cronjob: CronJob =
            serde_json::from_value(serde_json::to_value(payload)?)?;

        let metadata = cronjob.metadata;
        let name = metadata
            .name
            .ok_or(TemplateError::MissingField("metadata.name"))?;
        let uid = metadata
            .uid
            .ok_or(TemplateError::MissingField("metadata.uid"))?;
        let job_spec = cronjob
            .spec
            .and_then(|s| s.job_template.spec)
            .ok_or(TemplateError::MissingField("spec.jobTemplate.spec"))?;

        Ok(Self {
            name,
            uid,
            job_spec,
        })
    }

    pub fn generate_name(&self) -> String {
        format!("{}{}", self.name, GENERATE_NAME_SUFFIX)
    }

    /// Builds a one-off Job in `namespace` running this template's job spec
    /// and owned by the template.
    pub fn instantiate(&self, namespace: &str) -> Job {
        let owner = OwnerReference {
            api_version: OWNER_API_VERSION.to_string(),
            kind: OWNER_KIND.to_string(),
            name: self.name.clone(),
            uid: self.uid.clone(),
            ..Default::default()
        };
        Job {
            metadata: ObjectMeta {
                namespace: Some(namespace.to_string()),
                generate_name: Some(self.generate_name()),
                owner_references: Some(vec![owner]),
                ..Default::default()
            },
            spec: Some(self.job_spec.clone()),
            status: None,
        }
    }
}
