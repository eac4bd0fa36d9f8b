use log::trace;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate, RoundingPolicy};

/// one realized period of a fixed-payment schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledPayment {
    pub month: u32,
    pub beginning_balance: Money,
    pub monthly_payment: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub remaining_balance: Money,
    pub cumulative_principal: Money,
    pub cumulative_interest: Money,
}

/// balances after exactly `month` payments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationState {
    pub month: u32,
    pub remaining_balance: Money,
    pub total_principal_paid: Money,
    pub total_interest_paid: Money,
}

impl AmortizationState {
    /// state before the first payment
    pub fn initial(principal: Money) -> Self {
        Self {
            month: 0,
            remaining_balance: principal,
            total_principal_paid: Money::ZERO,
            total_interest_paid: Money::ZERO,
        }
    }

    /// re-realize every field; a no-op for sums of already rounded periods
    pub(crate) fn realized(self, policy: &RoundingPolicy) -> Self {
        Self {
            month: self.month,
            remaining_balance: policy.round(self.remaining_balance.as_decimal()),
            total_principal_paid: policy.round(self.total_principal_paid.as_decimal()),
            total_interest_paid: policy.round(self.total_interest_paid.as_decimal()),
        }
    }
}

impl From<&ScheduledPayment> for AmortizationState {
    fn from(payment: &ScheduledPayment) -> Self {
        Self {
            month: payment.month,
            remaining_balance: payment.remaining_balance,
            total_principal_paid: payment.cumulative_principal,
            total_interest_paid: payment.cumulative_interest,
        }
    }
}

/// Walks the loan one period at a time.
///
/// Interest is charged on the balance carried from the previous period, which
/// is already rounded, so rounding drift compounds and is only settled in the
/// final period.
pub(crate) struct Periods {
    policy: RoundingPolicy,
    monthly_rate: Decimal,
    payment: Money,
    term_months: u32,
    month: u32,
    remaining: Money,
    total_principal: Money,
    total_interest: Money,
}

impl Periods {
    pub(crate) fn new(
        policy: RoundingPolicy,
        principal: Money,
        monthly_rate: Rate,
        payment: Money,
        term_months: u32,
    ) -> Self {
        Self {
            policy,
            monthly_rate: monthly_rate.as_decimal(),
            payment,
            term_months,
            month: 0,
            remaining: principal,
            total_principal: Money::ZERO,
            total_interest: Money::ZERO,
        }
    }
}

impl Iterator for Periods {
    type Item = ScheduledPayment;

    fn next(&mut self) -> Option<ScheduledPayment> {
        if self.month >= self.term_months {
            return None;
        }
        self.month += 1;

        let beginning_balance = self.remaining;
        let zero_rate = self.monthly_rate.is_zero();

        // the balance never grows past principal, and principal * rate has
        // already been computed without overflow when deriving the payment
        let mut interest = if zero_rate {
            Money::ZERO
        } else {
            self.policy.round(self.remaining.as_decimal() * self.monthly_rate)
        };
        let mut principal = self.payment - interest;

        if self.month == self.term_months {
            // final period retires the balance; accumulated drift lands in interest
            principal = self.remaining;
            // zero-rate: the split residual (1000.00 / 3 leaves 333.34) goes to principal
            if !zero_rate {
                interest = self.payment - principal;
            }
        }

        if principal > self.remaining {
            principal = self.remaining;
        }

        self.remaining -= principal;
        self.total_principal += principal;
        self.total_interest += interest;

        trace!(
            "period {}/{}: interest {}, principal {}, remaining {}",
            self.month, self.term_months, interest, principal, self.remaining
        );

        Some(ScheduledPayment {
            month: self.month,
            beginning_balance,
            monthly_payment: self.payment,
            principal_portion: principal,
            interest_portion: interest,
            remaining_balance: self.remaining,
            cumulative_principal: self.total_principal,
            cumulative_interest: self.total_interest,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.term_months - self.month) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Periods {}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn periods(principal: i64, percent: Decimal, payment: Decimal, term: u32) -> Periods {
        Periods::new(
            RoundingPolicy::CENTS,
            Money::from_major(principal),
            Rate::from_percentage(percent).monthly_rate(),
            Money::from_decimal(payment),
            term,
        )
    }

    #[test]
    fn test_first_period_split() {
        let first = periods(10_000, dec!(6.0), dec!(443.21), 24).next().unwrap();
        assert_eq!(first.month, 1);
        assert_eq!(first.beginning_balance, Money::from_major(10_000));
        assert_eq!(first.interest_portion.as_decimal(), dec!(50.00));
        assert_eq!(first.principal_portion.as_decimal(), dec!(393.21));
        assert_eq!(first.remaining_balance.as_decimal(), dec!(9606.79));
    }

    #[test]
    fn test_interest_uses_rounded_carried_balance() {
        let mut walk = periods(1_000, dec!(12.0), dec!(105.58), 10);
        let first = walk.next().unwrap();
        assert_eq!(first.interest_portion.as_decimal(), dec!(10.00));
        assert_eq!(first.remaining_balance.as_decimal(), dec!(904.42));

        // 904.42 * 0.01 = 9.0442 -> 9.04
        let second = walk.next().unwrap();
        assert_eq!(second.interest_portion.as_decimal(), dec!(9.04));
        assert_eq!(second.principal_portion.as_decimal(), dec!(96.54));
        assert_eq!(second.remaining_balance.as_decimal(), dec!(807.88));
    }

    #[test]
    fn test_final_period_reconciles_payment() {
        let last = periods(1_000, dec!(12.0), dec!(105.58), 10).last().unwrap();
        assert_eq!(last.remaining_balance, Money::ZERO);
        assert_eq!(last.principal_portion, last.beginning_balance);
        assert_eq!(last.principal_portion + last.interest_portion, last.monthly_payment);
        assert_eq!(last.cumulative_principal, Money::from_major(1_000));
    }

    #[test]
    fn test_zero_rate_residual_goes_to_principal() {
        let walk: Vec<_> = periods(1_000, dec!(0), dec!(333.33), 3).collect();
        assert_eq!(walk[0].principal_portion.as_decimal(), dec!(333.33));
        assert_eq!(walk[1].remaining_balance.as_decimal(), dec!(333.34));
        assert_eq!(walk[2].principal_portion.as_decimal(), dec!(333.34));
        assert!(walk.iter().all(|p| p.interest_portion.is_zero()));
        assert_eq!(walk[2].remaining_balance, Money::ZERO);
        assert_eq!(walk[2].cumulative_interest, Money::ZERO);
    }

    #[test]
    fn test_overshoot_is_clamped_before_final_period() {
        // a payment larger than needed retires the loan early and never goes negative
        let walk: Vec<_> = periods(100, dec!(0), dec!(60.00), 3).collect();
        assert_eq!(walk[0].remaining_balance.as_decimal(), dec!(40.00));
        assert_eq!(walk[1].principal_portion.as_decimal(), dec!(40.00));
        assert_eq!(walk[1].remaining_balance, Money::ZERO);
        assert_eq!(walk[2].principal_portion, Money::ZERO);
        assert!(walk.iter().all(|p| !p.remaining_balance.is_negative()));
    }

    #[test]
    fn test_exact_size() {
        let mut walk = periods(1_000, dec!(12.0), dec!(105.58), 10);
        assert_eq!(walk.len(), 10);
        walk.next();
        assert_eq!(walk.len(), 9);
        assert_eq!(walk.count(), 9);
    }

    #[test]
    fn test_state_from_payment() {
        let first = periods(10_000, dec!(6.0), dec!(443.21), 24).next().unwrap();
        let state = AmortizationState::from(&first);
        assert_eq!(state.month, 1);
        assert_eq!(state.remaining_balance + state.total_principal_paid, Money::from_major(10_000));
        assert_eq!(state.total_interest_paid.as_decimal(), dec!(50.00));
    }
}
