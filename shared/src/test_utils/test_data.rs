use chrono::{TimeZone, Utc};
use uuid::Uuid;

use crate::models::{User, UserStatus};

/// Builds a user row with a fixed timestamp so response bodies are stable
/// across test runs.
pub fn test_user(id: Uuid, name: &str, email: &str) -> User {
    let created = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
    User {
        id,
        name: name.to_string(),
        email: email.to_string(),
        status: UserStatus::Active,
        created_at: created,
        updated_at: created,
        deleted_at: None,
        last_login_at: None,
    }
}
