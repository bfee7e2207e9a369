use serde_json::{json, Value};

use users_backend_shared::error::ServiceError;
use users_backend_shared::test_utils::mock_schema_store::MockSchemaStore;
use users_backend_shared::test_utils::test_logging::init_test_logging;

use crate::handlers::handle_event;
use crate::models::{
    LifecycleEvent, LifecycleResponse, RequestType, ResponseStatus, PHYSICAL_RESOURCE_ID,
};

fn event(request_type: RequestType) -> LifecycleEvent {
    LifecycleEvent {
        request_type,
        stack_id: "arn:aws:cloudformation:eu-west-2:123456789012:stack/users-backend/guid".into(),
        request_id: "req-7f3a".into(),
        logical_resource_id: "UsersSchemaInit".into(),
    }
}

fn assert_identifiers_echoed(response: &LifecycleResponse, event: &LifecycleEvent) {
    assert_eq!(response.request_id, event.request_id);
    assert_eq!(response.stack_id, event.stack_id);
    assert_eq!(response.logical_resource_id, event.logical_resource_id);
    assert_eq!(response.physical_resource_id, PHYSICAL_RESOURCE_ID);
    assert!(!response.no_echo);
}

#[tokio::test]
async fn test_create_event_applies_schema_and_succeeds() {
    init_test_logging();
    let store = MockSchemaStore::new();
    let event = event(RequestType::Create);

    let response = handle_event(&event, &store).await;

    assert_eq!(response.status, ResponseStatus::Success);
    assert_identifiers_echoed(&response, &event);
    assert_eq!(store.call_count(), 1);
}

#[tokio::test]
async fn test_update_event_reapplies_schema() {
    init_test_logging();
    let store = MockSchemaStore::new();

    let response = handle_event(&event(RequestType::Update), &store).await;

    assert_eq!(response.status, ResponseStatus::Success);
    assert_eq!(store.call_count(), 1);
}

#[tokio::test]
async fn test_delete_event_is_acknowledged_without_ddl() {
    init_test_logging();
    let store = MockSchemaStore::new();
    let event = event(RequestType::Delete);

    let response = handle_event(&event, &store).await;

    assert_eq!(response.status, ResponseStatus::Success);
    assert_identifiers_echoed(&response, &event);
    assert_eq!(store.call_count(), 0);
}

#[tokio::test]
async fn test_failure_becomes_failed_response_with_reason() {
    init_test_logging();
    let store = MockSchemaStore::failing(ServiceError::ConnectionUnavailable(
        "error connecting to server: Connection refused".into(),
    ));
    let event = event(RequestType::Create);

    let response = handle_event(&event, &store).await;

    assert_eq!(response.status, ResponseStatus::Failed);
    assert_identifiers_echoed(&response, &event);
    assert!(!response.reason.is_empty());
}

#[test]
fn test_event_deserializes_from_cloudformation_shape() {
    let raw = json!({
        "RequestType": "Create",
        "ResponseURL": "https://cloudformation-custom-resource-response.example/callback",
        "StackId": "arn:aws:cloudformation:eu-west-2:123456789012:stack/users-backend/guid",
        "RequestId": "req-7f3a",
        "LogicalResourceId": "UsersSchemaInit",
        "ResourceType": "Custom::UsersSchema",
        "ResourceProperties": { "ServiceToken": "arn:aws:lambda:..." }
    });

    let event: LifecycleEvent = serde_json::from_value(raw).unwrap();
    assert_eq!(event.request_type, RequestType::Create);
    assert_eq!(event.request_id, "req-7f3a");
}

#[test]
fn test_response_serializes_with_cloudformation_field_names() {
    let event = event(RequestType::Create);
    let response = LifecycleResponse::success(&event, "Schema setup complete");

    let value: Value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["Status"], "SUCCESS");
    assert_eq!(value["Reason"], "Schema setup complete");
    assert_eq!(value["PhysicalResourceId"], PHYSICAL_RESOURCE_ID);
    assert_eq!(value["StackId"], event.stack_id);
    assert_eq!(value["RequestId"], "req-7f3a");
    assert_eq!(value["LogicalResourceId"], "UsersSchemaInit");
    assert_eq!(value["NoEcho"], false);

    let failed = LifecycleResponse::failed(&event, "boom");
    assert_eq!(serde_json::to_value(&failed).unwrap()["Status"], "FAILED");
}
