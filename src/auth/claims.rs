use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user id)
    pub username: String,
    pub is_admin: bool,
    pub iat: usize, // Issued at (as UTC timestamp)
    pub exp: usize, // Expiration time (as UTC timestamp)
}

impl Claims {
    pub fn new(user: &User, expiration_hours: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours);

        Self {
            sub: user.id.clone(),
            username: user.username.clone(),
            is_admin: user.is_admin,
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }
}
