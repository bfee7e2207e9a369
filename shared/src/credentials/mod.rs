use std::fmt;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::error;

use crate::error::{Result, ServiceError};

/// Database credentials resolved from the secret store. Held only for the
/// duration of connection establishment, never persisted.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

// Keep the password out of debug logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// SecretStore trait defining the interface to the external secret service
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Fetches the raw string payload for a secret, or `None` if the secret
    /// exists but carries no string value.
    async fn secret_string(&self, secret_id: &str) -> Result<Option<String>>;
}

/// AWS Secrets Manager implementation of `SecretStore`
pub struct SecretsManagerStore {
    client: aws_sdk_secretsmanager::Client,
}

impl SecretsManagerStore {
    /// Creates a store from the ambient AWS configuration. Constructed inside
    /// the invocation entry point, not at module scope.
    pub async fn new() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self {
            client: aws_sdk_secretsmanager::Client::new(&config),
        }
    }

    pub fn with_client(client: aws_sdk_secretsmanager::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SecretStore for SecretsManagerStore {
    async fn secret_string(&self, secret_id: &str) -> Result<Option<String>> {
        let output = self
            .client
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
            .map_err(|err| {
                // Full SDK error detail goes to the log; the caller only sees
                // a resolution failure.
                error!("Secrets Manager get_secret_value failed: {:?}", err);
                ServiceError::CredentialsNotFound(format!(
                    "secret store request failed for {}",
                    secret_id
                ))
            })?;

        Ok(output.secret_string().map(|s| s.to_string()))
    }
}

/// Resolves and validates credentials for the given secret identifier.
/// Single attempt, no retries.
pub async fn resolve_credentials<S: SecretStore + ?Sized>(
    store: &S,
    secret_id: &str,
) -> Result<Credentials> {
    let payload = store.secret_string(secret_id).await?.ok_or_else(|| {
        ServiceError::CredentialsNotFound(format!("secret {} has no string payload", secret_id))
    })?;

    let credentials: Credentials = serde_json::from_str(&payload).map_err(|err| {
        error!("Secret payload for {} is not valid JSON: {}", secret_id, err);
        ServiceError::InvalidCredentials("secret payload is not a valid credentials object".into())
    })?;

    if credentials.username.is_empty() || credentials.password.is_empty() {
        return Err(ServiceError::InvalidCredentials(
            "secret payload is missing username or password".into(),
        ));
    }

    Ok(credentials)
}
