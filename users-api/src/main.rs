use aws_lambda_events::event::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use std::env;
use tracing::info;

use users_backend_shared::config::DbConfig;
use users_backend_shared::credentials::SecretsManagerStore;
use users_backend_shared::store::postgres::PgUserStore;

// Import the handlers module
mod handlers;


#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    info!("Starting Users API Lambda");

    run(service_fn(function_handler)).await?;
    Ok(())
}

async fn function_handler(
    event: LambdaEvent<ApiGatewayProxyRequest>,
) -> Result<ApiGatewayProxyResponse, Error> {
    let (request, _context) = event.into_parts();

    // Unsupported methods are rejected before configuration is read or any
    // AWS client is constructed.
    if let Some(response) = handlers::reject_unsupported_method(&request) {
        return Ok(response);
    }

    // Configuration and clients are built per invocation, not at module
    // scope; nothing is shared between requests.
    let config = match DbConfig::from_env() {
        Ok(config) => config,
        Err(err) => return Ok(handlers::error_response(&err)),
    };
    let secrets = SecretsManagerStore::new().await;
    let store = PgUserStore::new(config, secrets);

    Ok(handlers::handle_request(&request, &store).await)
}
