use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::{Result, ServiceError};
use crate::store::SchemaStore;

/// MockSchemaStore records schema-setup attempts and can be put in error
/// mode to exercise the initializer's failure branch.
pub struct MockSchemaStore {
    error: Option<ServiceError>,
    calls: AtomicUsize,
}

impl MockSchemaStore {
    /// Create a MockSchemaStore where setup always succeeds
    pub fn new() -> Self {
        Self {
            error: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a MockSchemaStore where setup fails with the given error
    pub fn failing(error: ServiceError) -> Self {
        Self {
            error: Some(error),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockSchemaStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SchemaStore for MockSchemaStore {
    async fn apply_schema(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}
