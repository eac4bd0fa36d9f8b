//! serializable views handed to a transport layer

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amortization::{AmortizationState, ScheduledPayment};
use crate::decimal::Money;
use crate::types::{LoanId, UserId};

use super::loan::Loan;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanView {
    pub id: LoanId,
    pub user_id: UserId,
    pub amount: Decimal,
    pub annual_interest_rate: Decimal,
    pub loan_term_in_months: i64,
    pub shared_user_ids: Vec<UserId>,
}

impl From<&Loan> for LoanView {
    fn from(loan: &Loan) -> Self {
        Self {
            id: loan.id,
            user_id: loan.owner_id,
            amount: loan.amount,
            annual_interest_rate: loan.annual_interest_rate,
            loan_term_in_months: loan.loan_term_in_months,
            shared_user_ids: loan.shared_user_ids.clone(),
        }
    }
}

/// one row of a loan schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleItemView {
    pub month: u32,
    pub remaining_balance: Money,
    pub monthly_payment: Money,
}

impl From<&ScheduledPayment> for ScheduleItemView {
    fn from(payment: &ScheduledPayment) -> Self {
        Self {
            month: payment.month,
            remaining_balance: payment.remaining_balance,
            monthly_payment: payment.monthly_payment,
        }
    }
}

/// balances of a loan as of a given month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanSummaryView {
    pub current_principal_balance: Money,
    pub total_principal_paid: Money,
    pub total_interest_paid: Money,
}

impl From<AmortizationState> for LoanSummaryView {
    fn from(state: AmortizationState) -> Self {
        Self {
            current_principal_balance: state.remaining_balance,
            total_principal_paid: state.total_principal_paid,
            total_interest_paid: state.total_interest_paid,
        }
    }
}
