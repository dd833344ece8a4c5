//! YAML encoding of the payloads exchanged with the trigger caller.

use std::collections::BTreeMap;

use k8s_openapi::api::batch::v1::Job;
use serde_yaml::Value;

pub const NAMESPACE_KEY: &str = "namespace";
pub const CRONJOB_KEY: &str = "cronjob";

#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    #[error("{0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("value of '{key}' must be a string")]
    NonString { key: String },
}

/// Flat key-value map naming the CronJob to fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupDescriptor {
    entries: BTreeMap<String, String>,
}

impl LookupDescriptor {
    /// Decodes a YAML (or JSON) mapping of strings to strings. An empty or
    /// null document yields an empty descriptor, a null value reads as an
    /// empty string and any other non-string value is rejected.
    pub fn decode(bytes: &[u8]) -> Result<Self, DescriptorError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        let raw: Option<BTreeMap<String, Value>> =
            serde_yaml::from_slice(bytes)?;
        let entries = raw
            .unwrap_or_default()
            .into_iter()
            .map(|(key, value)| match value {
                Value::String(s) => Ok((key, s)),
                Value::Null => Ok((key, String::new())),
                _ => Err(DescriptorError::NonString { key }),
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { entries })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Target namespace, empty when absent.
    pub fn namespace(&self) -> &str {
        self.get(NAMESPACE_KEY).unwrap_or_default()
    }

    /// CronJob name, empty when absent.
    pub fn cronjob(&self) -> &str {
        self.get(CRONJOB_KEY).unwrap_or_default()
    }
}

pub fn encode_job(job: &Job) -> Result<Vec<u8>, serde_yaml::Error> {
    serde_yaml::to_string(job).map(String::into_bytes)
}

pub fn decode_job(bytes: &[u8]) -> Result<Job, serde_yaml::Error> {
    serde_yaml::from_slice(bytes)
}
