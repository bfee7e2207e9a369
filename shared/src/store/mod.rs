use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Page, User};

// Expose the Postgres store module
pub mod postgres;

/// UserStore trait defining the read interface over the users table
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Lists non-deleted users within the given pagination window.
    async fn list_users(&self, page: &Page) -> Result<Vec<User>>;
}

/// SchemaStore trait defining the one-shot schema setup interface
#[async_trait]
pub trait SchemaStore: Send + Sync + 'static {
    /// Creates the users table and its supporting schema objects.
    /// Idempotent: safe to run on every deployment.
    async fn apply_schema(&self) -> Result<()>;
}
