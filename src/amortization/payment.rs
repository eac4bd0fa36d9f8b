use log::debug;
use rust_decimal::Decimal;

use crate::decimal::{Money, Rate, RoundingPolicy};
use crate::errors::{LoanError, Result};

fn overflow(operation: &'static str) -> LoanError {
    LoanError::CalculationOverflow { operation }
}

/// v^n for the one-period discount factor `v = 1 / (1 + r)`
///
/// `v < 1` for any positive rate, so the power shrinks toward zero and
/// underflows to 0 instead of overflowing on long terms or steep rates.
fn discount_factor(monthly_rate: Decimal, term_months: u32) -> Result<Decimal> {
    let v = Decimal::ONE
        .checked_add(monthly_rate)
        .and_then(|base| Decimal::ONE.checked_div(base))
        .ok_or_else(|| overflow("discount factor"))?;

    let mut factor = Decimal::ONE;
    for _ in 0..term_months {
        factor = factor
            .checked_mul(v)
            .ok_or_else(|| overflow("discount factor"))?;
    }
    Ok(factor)
}

/// Fixed payment that retires `principal` over `term_months` periods.
///
/// Zero-rate loans split the principal evenly; everything else uses the
/// annuity formula in its discounted form `P * r / (1 - (1+r)^-n)`. The
/// result is realized through `policy` once and reused for every period.
/// `term_months` must already be validated as positive.
pub(crate) fn fixed_payment(
    policy: &RoundingPolicy,
    principal: Money,
    monthly_rate: Rate,
    term_months: u32,
) -> Result<Money> {
    let p = principal.as_decimal();
    let r = monthly_rate.as_decimal();

    let raw = if r.is_zero() {
        p.checked_div(Decimal::from(term_months))
            .ok_or_else(|| overflow("monthly payment"))?
    } else {
        let interest = p.checked_mul(r).ok_or_else(|| overflow("monthly payment"))?;
        // a rate too small to move v^n at 28 digits leaves nothing to divide by
        interest
            .checked_div(Decimal::ONE - discount_factor(r, term_months)?)
            .ok_or_else(|| overflow("monthly payment"))?
    };

    let payment = policy.round(raw);
    debug!(
        "derived monthly payment {} for principal {} at monthly rate {} over {} months",
        payment, principal, r, term_months
    );
    Ok(payment)
}
