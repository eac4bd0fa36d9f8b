use thiserror::Error;

use crate::types::{LoanId, UserId};

/// coarse grouping a transport layer can map onto its own status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// request is missing a parameter or has one of the wrong type
    RequestShape,
    /// request is well formed but its values are rejected
    InvalidInput,
    NotFound,
    Conflict,
    Internal,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoanError {
    #[error("invalid term: {term_months} months, term must be positive")]
    InvalidTerm {
        term_months: i64,
    },

    #[error("month {month} out of range: must be between 0 and {term_months}")]
    MonthOutOfRange {
        month: i64,
        term_months: u32,
    },

    #[error("decimal overflow while computing {operation}")]
    CalculationOverflow {
        operation: &'static str,
    },

    #[error("user not found: {id}")]
    UserNotFound {
        id: UserId,
    },

    #[error("loan not found: {id}")]
    LoanNotFound {
        id: LoanId,
    },

    #[error("username or email already exists: {username} / {email}")]
    DuplicateUser {
        username: String,
        email: String,
    },

    #[error("owner already has access to loan {loan_id}")]
    ShareWithOwner {
        loan_id: LoanId,
    },

    #[error("loan {loan_id} already shared with user {user_id}")]
    AlreadyShared {
        loan_id: LoanId,
        user_id: UserId,
    },

    #[error("invalid input: {message}")]
    InvalidInput {
        message: String,
    },

    #[error("invalid request: {message}")]
    InvalidRequest {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },
}

impl LoanError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LoanError::InvalidRequest { .. } => ErrorCategory::RequestShape,
            LoanError::InvalidTerm { .. }
            | LoanError::MonthOutOfRange { .. }
            | LoanError::InvalidInput { .. } => ErrorCategory::InvalidInput,
            LoanError::UserNotFound { .. } | LoanError::LoanNotFound { .. } => {
                ErrorCategory::NotFound
            }
            LoanError::DuplicateUser { .. }
            | LoanError::ShareWithOwner { .. }
            | LoanError::AlreadyShared { .. } => ErrorCategory::Conflict,
            LoanError::CalculationOverflow { .. } | LoanError::InvalidConfiguration { .. } => {
                ErrorCategory::Internal
            }
        }
    }

    /// true when the caller, not the system, must change something
    pub fn is_client_error(&self) -> bool {
        self.category() != ErrorCategory::Internal
    }
}

pub type Result<T> = std::result::Result<T, LoanError>;
