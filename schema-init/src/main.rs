use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use std::env;
use tracing::{error, info};

use users_backend_shared::config::{self, DbConfig};
use users_backend_shared::credentials::SecretsManagerStore;
use users_backend_shared::store::postgres::PgSchemaStore;

// Import the handlers module
mod handlers;
mod models;

#[cfg(test)]
mod tests;

use models::{LifecycleEvent, LifecycleResponse};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    info!("Starting schema initializer Lambda");

    run(service_fn(function_handler)).await?;
    Ok(())
}

async fn function_handler(
    event: LambdaEvent<LifecycleEvent>,
) -> Result<LifecycleResponse, Error> {
    let event = event.payload;

    // Every path below ends in a well-formed response; the provisioning
    // system blocks on it, so even a configuration failure must not bubble
    // out as an uncaught error.
    let response = match DbConfig::from_env() {
        Ok(db_config) => {
            let secrets = SecretsManagerStore::new().await;
            let store = PgSchemaStore::new(db_config, secrets, config::rls_enabled());
            handlers::handle_event(&event, &store).await
        }
        Err(err) => {
            error!("Configuration error: {}", err);
            LifecycleResponse::failed(&event, err.to_string())
        }
    };

    Ok(response)
}
