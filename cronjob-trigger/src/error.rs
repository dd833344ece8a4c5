use tonic::Status;

use crate::codec::DescriptorError;
use crate::store::StoreError;
use crate::template::TemplateError;

#[derive(thiserror::Error, Debug)]
pub enum TriggerError {
    #[error("failed to decode trigger descriptor: {0}")]
    DescriptorDecode(#[source] DescriptorError),
    #[error(
        "failed to fetch cronjob '{name}' in namespace '{namespace}': {source}"
    )]
    TemplateLookup {
        namespace: String,
        name: String,
        #[source]
        source: StoreError,
    },
    #[error("failed to decode cronjob: {0}")]
    TemplateDecode(#[from] TemplateError),
    #[error("failed to serialize job: {0}")]
    Serialization(#[source] serde_yaml::Error),
    #[error("failed to decode job: {0}")]
    JobDecode(#[source] serde_yaml::Error),
    #[error("failed to create job in namespace '{namespace}': {source}")]
    Submission {
        namespace: String,
        #[source]
        source: StoreError,
    },
}

impl From<TriggerError> for Status {
    fn from(value: TriggerError) -> Self {
        match &value {
            TriggerError::DescriptorDecode(_)
            | TriggerError::TemplateDecode(_)
            | TriggerError::JobDecode(_) => {
                Status::invalid_argument(value.to_string())
            }
            TriggerError::TemplateLookup { source, .. }
            | TriggerError::Submission { source, .. } => {
                Status::new(source.code(), value.to_string())
            }
            TriggerError::Serialization(_) => {
                Status::internal(value.to_string())
            }
        }
    }
}
