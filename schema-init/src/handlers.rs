use tracing::{error, info};

use users_backend_shared::store::SchemaStore;

use crate::models::{LifecycleEvent, LifecycleResponse, RequestType};

/// Runs the schema setup for one lifecycle event and always produces exactly
/// one response, echoing the event identifiers on every branch. Failures are
/// folded into a FAILED response; nothing propagates past here.
pub async fn handle_event<S>(event: &LifecycleEvent, store: &S) -> LifecycleResponse
where
    S: SchemaStore,
{
    info!(
        "Processing {:?} lifecycle event for {} (stack {})",
        event.request_type, event.logical_resource_id, event.stack_id
    );

    // Stack deletion keeps the schema and its data; acknowledge without DDL
    if event.request_type == RequestType::Delete {
        return LifecycleResponse::success(event, "Delete acknowledged; schema retained");
    }

    match store.apply_schema().await {
        Ok(()) => LifecycleResponse::success(event, "Schema setup complete"),
        Err(err) => {
            error!("Schema setup failed ({}): {}", err.kind(), err);
            LifecycleResponse::failed(event, err.to_string())
        }
    }
}
