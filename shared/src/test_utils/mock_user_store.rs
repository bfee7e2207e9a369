use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{Result, ServiceError};
use crate::models::{Page, User};
use crate::store::UserStore;

/// MockUserStore is a simple in-memory implementation of UserStore for
/// testing. It records call counts and the last pagination window it was
/// asked for.
pub struct MockUserStore {
    users: Vec<User>,
    error: Option<ServiceError>,
    calls: AtomicUsize,
    last_page: Mutex<Option<Page>>,
}

impl MockUserStore {
    /// Create a new empty MockUserStore
    pub fn new() -> Self {
        Self::with_users(vec![])
    }

    /// Create a MockUserStore with initial test data
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users,
            error: None,
            calls: AtomicUsize::new(0),
            last_page: Mutex::new(None),
        }
    }

    /// Create a MockUserStore where every query fails with the given error
    pub fn failing(error: ServiceError) -> Self {
        Self {
            users: vec![],
            error: Some(error),
            calls: AtomicUsize::new(0),
            last_page: Mutex::new(None),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The pagination window passed to the most recent `list_users` call
    pub fn last_page(&self) -> Option<Page> {
        *self.last_page.lock().unwrap()
    }
}

impl Default for MockUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MockUserStore {
    async fn list_users(&self, page: &Page) -> Result<Vec<User>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_page.lock().unwrap() = Some(*page);

        if let Some(err) = &self.error {
            return Err(err.clone());
        }

        let start = (page.offset.max(0) as usize).min(self.users.len());
        let end = (start + page.limit.max(0) as usize).min(self.users.len());
        Ok(self.users[start..end].to_vec())
    }
}
