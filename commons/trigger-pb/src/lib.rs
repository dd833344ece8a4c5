pub mod trigger {
    tonic::include_proto!("trigger");
}

pub mod health {
    tonic::include_proto!("grpc.health.v1");
}

pub use health::health_check_response::ServingStatus;
pub use trigger::*;

#[allow(dead_code)]
pub const FILE_DESCRIPTOR_SET: &[u8] =
    tonic::include_file_descriptor_set!("trigger_descriptor");
