use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};

/// unique identifier for a user
pub type UserId = Uuid;

/// unique identifier for a loan
pub type LoanId = Uuid;

/// Validated inputs to the amortization engine.
///
/// The term is positive and both principal and rate are non-negative once a
/// value of this type exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    pub annual_rate: Rate,
    pub term_months: u32,
}

impl LoanTerms {
    /// validate raw loan record fields; `annual_rate_percent` is 6.0 for 6%
    pub fn new(principal: Decimal, annual_rate_percent: Decimal, term_months: i64) -> Result<Self> {
        let term_months = validate_term(term_months)?;

        if principal.is_sign_negative() && !principal.is_zero() {
            return Err(LoanError::InvalidInput {
                message: format!("principal must not be negative, got {}", principal),
            });
        }
        if annual_rate_percent.is_sign_negative() && !annual_rate_percent.is_zero() {
            return Err(LoanError::InvalidInput {
                message: format!(
                    "annual interest rate must not be negative, got {}",
                    annual_rate_percent
                ),
            });
        }

        Ok(Self {
            principal: Money::from_decimal(principal),
            annual_rate: Rate::from_percentage(annual_rate_percent),
            term_months,
        })
    }

    pub fn monthly_rate(&self) -> Rate {
        self.annual_rate.monthly_rate()
    }
}

/// reject non-positive terms before any division by the term happens
pub(crate) fn validate_term(term_months: i64) -> Result<u32> {
    if term_months <= 0 {
        return Err(LoanError::InvalidTerm { term_months });
    }
    u32::try_from(term_months).map_err(|_| LoanError::InvalidTerm { term_months })
}
