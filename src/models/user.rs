use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::auth::password::{hash_password, verify_password};
use crate::error::AppError;

/// A registered user.
///
/// `password` only ever holds a bcrypt hash and is never serialized.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl User {
    /// Creates a user, hashing `password` with the given bcrypt cost.
    ///
    /// Fails with `AppError::Validation` if any field is empty.
    pub fn with_cost(name: &str, email: &str, password: &str, cost: u32) -> Result<Self, AppError> {
        UserInput {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
        .validate()?;

        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            password: hash_password(password, cost)?,
        })
    }

    /// Checks `candidate` against the stored hash.
    pub fn validate_password(&self, candidate: &str) -> bool {
        match verify_password(candidate, &self.password) {
            Ok(matches) => matches,
            Err(e) => {
                log::warn!("Stored password hash for user {} is unusable: {}", self.id, e);
                false
            }
        }
    }
}

/// Request body for registering a user.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UserInput {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}
