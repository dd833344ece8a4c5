use tonic::{Request, Response, Status};
use tracing::debug;
use trigger_pb::trigger::trigger_server::Trigger;
use trigger_pb::{
    ApplyPolicyRequest, ApplyPolicyResponse, ExecuteRequest, ExecuteResponse,
    FetchResourceRequest, FetchResourceResponse,
};

use super::CronJobTrigger;

#[tonic::async_trait]
impl Trigger for CronJobTrigger {
    async fn fetch_resource(
        &self,
        request: Request<FetchResourceRequest>,
    ) -> Result<Response<FetchResourceResponse>, Status> {
        let req = request.into_inner();
        let resource = CronJobTrigger::fetch_resource(self, &req.resource)
            .await
            .map_err(Status::from)?;
        Ok(Response::new(FetchResourceResponse { resource }))
    }

    async fn execute(
        &self,
        request: Request<ExecuteRequest>,
    ) -> Result<Response<ExecuteResponse>, Status> {
        let req = request.into_inner();
        let response = CronJobTrigger::execute(self, &req.resource)
            .await
            .map_err(Status::from)?;
        Ok(Response::new(ExecuteResponse { response }))
    }

    async fn apply_policy(
        &self,
        request: Request<ApplyPolicyRequest>,
    ) -> Result<Response<ApplyPolicyResponse>, Status> {
        let req = request.into_inner();
        let verdict = CronJobTrigger::apply_policy(self, &req.request).await;
        debug!(
            success = verdict.success,
            message = %verdict.message,
            "policy applied"
        );
        Ok(Response::new(ApplyPolicyResponse {
            success: verdict.success,
            message: verdict.message,
        }))
    }
}
