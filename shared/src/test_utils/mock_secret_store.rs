use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::credentials::SecretStore;
use crate::error::{Result, ServiceError};

/// MockSecretStore is a canned-response implementation of SecretStore for
/// testing. It counts calls so tests can assert the fast-path branches never
/// touch the secret store.
pub struct MockSecretStore {
    payload: Option<String>,
    error: Option<ServiceError>,
    calls: AtomicUsize,
}

impl MockSecretStore {
    /// Store that returns the given string payload
    pub fn with_payload(payload: &str) -> Self {
        Self {
            payload: Some(payload.to_string()),
            error: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Store whose secret exists but has no string payload
    pub fn empty() -> Self {
        Self {
            payload: None,
            error: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Store where every fetch fails with the given error
    pub fn failing(error: ServiceError) -> Self {
        Self {
            payload: None,
            error: Some(error),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SecretStore for MockSecretStore {
    async fn secret_string(&self, _secret_id: &str) -> Result<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        Ok(self.payload.clone())
    }
}
