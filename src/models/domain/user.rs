use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Registration always produces a regular user. Admin promotion happens
    /// out of band, directly against the store.
    pub fn new(username: &str, password_hash: &str) -> Self {
        User {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            is_admin: false,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
impl User {
    pub fn test_user(username: &str) -> Self {
        User::new(username, "$argon2id$test-hash")
    }

    pub fn test_admin(username: &str) -> Self {
        let mut user = User::new(username, "$argon2id$test-hash");
        user.is_admin = true;
        user
    }
}
