#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use cronjob_trigger::store::{ResourceStore, StoreError, StoreResult};
use k8s_openapi::api::batch::v1::Job;
use kube::api::DynamicObject;
use kube::error::ErrorResponse;
use serde_json::json;
use tokio::sync::RwLock;

/// In-memory [`ResourceStore`] counting every call it receives.
#[derive(Default)]
pub struct MemoryStore {
    templates: RwLock<HashMap<(String, String), DynamicObject>>,
    created: RwLock<Vec<Job>>,
    get_calls: AtomicUsize,
    create_calls: AtomicUsize,
    reject_creates: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(
        &self,
        namespace: &str,
        name: &str,
        obj: DynamicObject,
    ) {
        self.templates
            .write()
            .await
            .insert((namespace.to_string(), name.to_string()), obj);
    }

    pub fn reject_creates(&self, reject: bool) {
        self.reject_creates.store(reject, Ordering::SeqCst);
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub async fn created(&self) -> Vec<Job> {
        self.created.read().await.clone()
    }
}

#[async_trait]
impl ResourceStore for MemoryStore {
    async fn get_template(
        &self,
        namespace: &str,
        name: &str,
    ) -> StoreResult<DynamicObject> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.templates
            .read()
            .await
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                kind: "CronJob",
                namespace: namespace.to_string(),
                name: name.to_string(),
            })
    }

    async fn create_job(&self, namespace: &str, job: &Job) -> StoreResult<()> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.reject_creates.load(Ordering::SeqCst) {
            return Err(StoreError::Api(kube::Error::Api(ErrorResponse {
                status: "Failure".into(),
                message: format!(
                    "jobs.batch is forbidden: exceeded quota in {namespace}"
                ),
                reason: "Forbidden".into(),
                code: 403,
            })));
        }
        self.created.write().await.push(job.clone());
        Ok(())
    }
}

pub fn cronjob(namespace: &str, name: &str, uid: &str) -> DynamicObject {
    serde_json::from_value(json!({
        "apiVersion": "batch/v1",
        "kind": "CronJob",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "uid": uid
        },
        "spec": {
            "schedule": "0 3 * * *",
            "jobTemplate": {
                "spec": {
                    "backoffLimit": 1,
                    "template": {
                        "spec": {
                            "restartPolicy": "OnFailure",
                            "containers": [{
                                "name": "worker",
                                "image": "busybox:1.36",
                                "args": ["echo", name]
                            }]
                        }
                    }
                }
            }
        }
    }))
    .unwrap()
}

pub fn descriptor(namespace: &str, name: &str) -> Vec<u8> {
    format!("namespace: {namespace}\ncronjob: {name}\n").into_bytes()
}
