use async_trait::async_trait;

pub const SUCCESS_MESSAGE: &str = "success";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyVerdict {
    pub success: bool,
    pub message: String,
}

impl PolicyVerdict {
    pub fn success() -> Self {
        Self {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
        }
    }
}

/// Decides whether a trigger execution succeeded, given the bytes returned
/// by `Execute`.
#[async_trait]
pub trait Policy: Send + Sync {
    async fn evaluate(&self, result: &[u8]) -> PolicyVerdict;
}

/// Accepts every execution result.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAll;

#[async_trait]
impl Policy for AcceptAll {
    async fn evaluate(&self, _result: &[u8]) -> PolicyVerdict {
        PolicyVerdict::success()
    }
}
