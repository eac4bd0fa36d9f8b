pub mod payment;
pub mod replay;
pub mod schedule;

use log::debug;

use crate::config::EngineConfig;
use crate::decimal::{Money, Rate, RoundingPolicy};
use crate::errors::{LoanError, Result};
use crate::types::{validate_term, LoanTerms};

pub use replay::{AmortizationState, ScheduledPayment};
pub use schedule::AmortizationSchedule;

use payment::fixed_payment;
use replay::Periods;

/// Fixed-payment amortization engine.
///
/// Every call is a pure function of its arguments and the engine's
/// configuration; nothing is cached between calls.
#[derive(Debug, Clone, Default)]
pub struct AmortizationEngine {
    config: EngineConfig,
}

impl AmortizationEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// cents, round half up
    pub fn standard() -> Self {
        Self {
            config: EngineConfig::standard(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn policy(&self) -> &RoundingPolicy {
        &self.config.rounding
    }

    fn check_term(&self, term_months: i64) -> Result<u32> {
        let term = validate_term(term_months)?;
        match self.config.max_term_months {
            Some(max) if term > max => Err(LoanError::InvalidTerm { term_months }),
            _ => Ok(term),
        }
    }

    /// fixed monthly payment, held constant for every period
    pub fn compute_monthly_payment(
        &self,
        principal: Money,
        monthly_rate: Rate,
        term_months: i64,
    ) -> Result<Money> {
        let term = self.check_term(term_months)?;
        fixed_payment(self.policy(), principal, monthly_rate, term)
    }

    /// balances after `through_month` payments, `0 <= through_month <= term_months`
    pub fn replay(
        &self,
        principal: Money,
        monthly_rate: Rate,
        term_months: i64,
        through_month: i64,
    ) -> Result<AmortizationState> {
        let term = self.check_term(term_months)?;
        let month = u32::try_from(through_month)
            .ok()
            .filter(|m| *m <= term)
            .ok_or(LoanError::MonthOutOfRange {
                month: through_month,
                term_months: term,
            })?;

        if month == 0 {
            return Ok(AmortizationState::initial(principal));
        }

        let payment = fixed_payment(self.policy(), principal, monthly_rate, term)?;
        let state = Periods::new(*self.policy(), principal, monthly_rate, payment, term)
            .take(month as usize)
            .last()
            .map(|p| AmortizationState::from(&p))
            .unwrap_or_else(|| AmortizationState::initial(principal));

        debug!(
            "replayed {} of {} months: remaining {}, principal paid {}, interest paid {}",
            month,
            term,
            state.remaining_balance,
            state.total_principal_paid,
            state.total_interest_paid
        );
        Ok(state.realized(self.policy()))
    }

    /// full schedule, one entry per month
    pub fn schedule(
        &self,
        principal: Money,
        monthly_rate: Rate,
        term_months: i64,
    ) -> Result<AmortizationSchedule> {
        let term = self.check_term(term_months)?;
        let payment = fixed_payment(self.policy(), principal, monthly_rate, term)?;
        let payments =
            Periods::new(*self.policy(), principal, monthly_rate, payment, term).collect();

        Ok(AmortizationSchedule::from_payments(
            principal,
            monthly_rate,
            term,
            payment,
            payments,
        ))
    }

    pub fn monthly_payment_for(&self, terms: &LoanTerms) -> Result<Money> {
        self.compute_monthly_payment(
            terms.principal,
            terms.monthly_rate(),
            i64::from(terms.term_months),
        )
    }

    pub fn state_for(&self, terms: &LoanTerms, month: i64) -> Result<AmortizationState> {
        self.replay(terms.principal, terms.monthly_rate(), i64::from(terms.term_months), month)
    }

    pub fn schedule_for(&self, terms: &LoanTerms) -> Result<AmortizationSchedule> {
        self.schedule(terms.principal, terms.monthly_rate(), i64::from(terms.term_months))
    }
}

/// fixed monthly payment with cent, half-up rounding
pub fn compute_monthly_payment(
    principal: Money,
    monthly_rate: Rate,
    term_months: i64,
) -> Result<Money> {
    AmortizationEngine::standard().compute_monthly_payment(principal, monthly_rate, term_months)
}

/// balances after `through_month` payments with cent, half-up rounding
pub fn replay(
    principal: Money,
    monthly_rate: Rate,
    term_months: i64,
    through_month: i64,
) -> Result<AmortizationState> {
    AmortizationEngine::standard().replay(principal, monthly_rate, term_months, through_month)
}

/// full schedule with cent, half-up rounding
pub fn schedule(
    principal: Money,
    monthly_rate: Rate,
    term_months: i64,
) -> Result<AmortizationSchedule> {
    AmortizationEngine::standard().schedule(principal, monthly_rate, term_months)
}
