use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{LoanError, Result};
use crate::types::{LoanId, LoanTerms, UserId};

/// request to open a loan for an existing user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLoan {
    pub user_id: UserId,
    pub amount: Decimal,
    /// annual percentage, 6.0 for 6%
    pub annual_interest_rate: Decimal,
    pub loan_term_in_months: i64,
}

impl NewLoan {
    /// amounts must be non-negative; the term is only checked when a schedule is asked for
    pub fn validate(&self) -> Result<()> {
        if self.amount.is_sign_negative() && !self.amount.is_zero() {
            return Err(LoanError::InvalidInput {
                message: format!("loan amount must not be negative, got {}", self.amount),
            });
        }
        if self.annual_interest_rate.is_sign_negative() && !self.annual_interest_rate.is_zero() {
            return Err(LoanError::InvalidInput {
                message: format!(
                    "annual interest rate must not be negative, got {}",
                    self.annual_interest_rate
                ),
            });
        }
        Ok(())
    }
}

/// stored loan record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub id: LoanId,
    pub owner_id: UserId,
    pub amount: Decimal,
    pub annual_interest_rate: Decimal,
    pub loan_term_in_months: i64,
    pub shared_user_ids: Vec<UserId>,
    pub created_at: DateTime<Utc>,
}

impl Loan {
    /// engine inputs; fails with `InvalidTerm` for a non-positive term
    pub fn terms(&self) -> Result<LoanTerms> {
        LoanTerms::new(self.amount, self.annual_interest_rate, self.loan_term_in_months)
    }

    pub fn is_shared_with(&self, user_id: UserId) -> bool {
        self.shared_user_ids.contains(&user_id)
    }

    /// owner or a user the loan was shared with
    pub fn can_view(&self, user_id: UserId) -> bool {
        self.owner_id == user_id || self.is_shared_with(user_id)
    }
}
