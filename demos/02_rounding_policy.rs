//! rounding policy - the same loan under two configurations
use loan_amortization_rs::{AmortizationEngine, Decimal, EngineConfig, LoanTerms};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let terms = LoanTerms::new(Decimal::new(250_000, 0), Decimal::new(55, 1), 360)?;

    let config = EngineConfig::from_json(r#"{"rounding": {"scale": 2, "mode": "half_even"}}"#)?;
    let engines = [
        ("half up", AmortizationEngine::standard()),
        ("half even", AmortizationEngine::new(config)?),
    ];

    for (label, engine) in &engines {
        let schedule = engine.schedule_for(&terms)?;
        let last = schedule.payments[schedule.len() - 1];
        println!(
            "{:>9}: payment {}, total interest {}, final interest {}, final balance {}",
            label,
            schedule.monthly_payment,
            schedule.total_interest,
            last.interest_portion,
            last.remaining_balance
        );
    }

    Ok(())
}
