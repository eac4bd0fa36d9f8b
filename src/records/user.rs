use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{LoanError, Result};
use crate::types::UserId;

/// request to register a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
}

impl NewUser {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(LoanError::InvalidInput {
                message: "username must not be blank".to_string(),
            });
        }
        if !is_valid_email(&self.email) {
            return Err(LoanError::InvalidInput {
                message: format!("not a valid email address: {}", self.email),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// true if either unique field collides with `other`
    pub fn conflicts_with(&self, other: &NewUser) -> bool {
        self.username == other.username || self.email == other.email
    }
}

/// local@domain.tld, no whitespace
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, _)| !host.is_empty())
        && !domain.ends_with('.')
}
