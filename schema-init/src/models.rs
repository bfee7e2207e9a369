use serde::{Deserialize, Serialize};

/// Fixed physical resource identifier echoed back to the provisioning
/// system; it never changes across deployments so updates are in-place.
pub const PHYSICAL_RESOURCE_ID: &str = "users-backend-schema";

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestType {
    Create,
    Update,
    Delete,
}

/// Provisioning lifecycle event, in the CloudFormation custom-resource shape.
/// Unknown fields (ResponseURL, ResourceProperties, ...) are ignored.
#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct LifecycleEvent {
    pub request_type: RequestType,
    pub stack_id: String,
    pub request_id: String,
    pub logical_resource_id: String,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseStatus {
    Success,
    Failed,
}

/// The one response every lifecycle event gets, success or failure. The
/// provisioning system blocks on this, so the identifiers must be echoed
/// back unchanged.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct LifecycleResponse {
    pub status: ResponseStatus,
    pub reason: String,
    pub physical_resource_id: String,
    pub stack_id: String,
    pub request_id: String,
    pub logical_resource_id: String,
    pub no_echo: bool,
}

impl LifecycleResponse {
    pub fn success(event: &LifecycleEvent, reason: impl Into<String>) -> Self {
        Self::build(event, ResponseStatus::Success, reason.into())
    }

    pub fn failed(event: &LifecycleEvent, reason: impl Into<String>) -> Self {
        Self::build(event, ResponseStatus::Failed, reason.into())
    }

    fn build(event: &LifecycleEvent, status: ResponseStatus, reason: String) -> Self {
        LifecycleResponse {
            status,
            reason,
            physical_resource_id: PHYSICAL_RESOURCE_ID.to_string(),
            stack_id: event.stack_id.clone(),
            request_id: event.request_id.clone(),
            logical_resource_id: event.logical_resource_id.clone(),
            no_echo: false,
        }
    }
}
