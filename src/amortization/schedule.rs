use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};

use super::replay::{AmortizationState, ScheduledPayment};

/// fixed-payment amortization schedule, one entry per month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub principal: Money,
    pub monthly_rate: Rate,
    pub term_months: u32,
    pub monthly_payment: Money,
    pub payments: Vec<ScheduledPayment>,
    pub total_interest: Money,
    pub total_payment: Money,
}

impl AmortizationSchedule {
    pub(crate) fn from_payments(
        principal: Money,
        monthly_rate: Rate,
        term_months: u32,
        monthly_payment: Money,
        payments: Vec<ScheduledPayment>,
    ) -> Self {
        let total_interest: Money = payments.iter().map(|p| p.interest_portion).sum();
        let total_payment: Money = payments
            .iter()
            .map(|p| p.principal_portion + p.interest_portion)
            .sum();

        Self {
            principal,
            monthly_rate,
            term_months,
            monthly_payment,
            payments,
            total_interest,
            total_payment,
        }
    }

    /// get payment for specific month (1-based)
    pub fn get_payment(&self, month: u32) -> Option<&ScheduledPayment> {
        month
            .checked_sub(1)
            .and_then(|index| self.payments.get(index as usize))
    }

    /// remaining balance after `month` payments; month 0 is the principal
    pub fn balance_after_payment(&self, month: u32) -> Option<Money> {
        if month == 0 {
            return Some(self.principal);
        }
        self.get_payment(month).map(|p| p.remaining_balance)
    }

    /// balances after `month` payments, read off the schedule
    pub fn state_at(&self, month: u32) -> Result<AmortizationState> {
        if month == 0 {
            return Ok(AmortizationState::initial(self.principal));
        }
        self.get_payment(month)
            .map(AmortizationState::from)
            .ok_or(LoanError::MonthOutOfRange {
                month: i64::from(month),
                term_months: self.term_months,
            })
    }

    pub fn len(&self) -> usize {
        self.payments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }

    /// true when no month ends with a higher balance than the month before
    pub fn is_non_increasing(&self) -> bool {
        let mut previous = self.principal;
        self.payments.iter().all(|p| {
            let ok = p.remaining_balance <= previous;
            previous = p.remaining_balance;
            ok
        })
    }

    pub fn final_balance(&self) -> Money {
        self.payments
            .last()
            .map(|p| p.remaining_balance)
            .unwrap_or(self.principal)
    }
}
