//! quick start - payment, balance at a month, and the full schedule
use loan_amortization_rs::{compute_monthly_payment, replay, schedule, Decimal, Money, Rate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // $10,000 at 6% over two years
    let principal = Money::from_major(10_000);
    let monthly_rate = Rate::from_percentage(Decimal::new(60, 1)).monthly_rate();

    let payment = compute_monthly_payment(principal, monthly_rate, 24)?;
    println!("monthly payment: ${}", payment);

    let state = replay(principal, monthly_rate, 24, 12)?;
    println!("after 12 payments:");
    println!("  remaining balance:    ${}", state.remaining_balance);
    println!("  total principal paid: ${}", state.total_principal_paid);
    println!("  total interest paid:  ${}", state.total_interest_paid);

    let full = schedule(principal, monthly_rate, 24)?;
    for entry in &full.payments {
        println!(
            "month {:>2}: interest {:>7} principal {:>7} balance {:>9}",
            entry.month, entry.interest_portion, entry.principal_portion, entry.remaining_balance
        );
    }
    println!("total interest over the term: ${}", full.total_interest);

    Ok(())
}
