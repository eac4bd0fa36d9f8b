//! loan book - users, loans, sharing, and the schedule/summary views
use loan_amortization_rs::{
    AmortizationEngine, Decimal, LoanBook, LoanService, NewLoan, NewUser,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut service =
        LoanService::new(LoanBook::with_system_time(), AmortizationEngine::standard());

    let owner = service.book_mut().create_user(NewUser::new("owner", "owner@example.com"))?;
    let viewer = service.book_mut().create_user(NewUser::new("viewer", "viewer@example.com"))?;

    let loan = service.book_mut().create_loan(NewLoan {
        user_id: owner.id,
        amount: Decimal::new(54_321, 0),
        annual_interest_rate: Decimal::new(725, 2),
        loan_term_in_months: 36,
    })?;
    service.book_mut().share_loan(loan.id, viewer.id)?;

    println!("{}", serde_json::to_string_pretty(&service.loan_view(loan.id)?)?);

    let schedule = service.schedule(loan.id)?;
    println!("first entry: {}", serde_json::to_string(&schedule[0])?);
    println!("last entry:  {}", serde_json::to_string(&schedule[schedule.len() - 1])?);

    for month in ["0", "12", "36"] {
        let summary = service.summary_from_query(loan.id, Some(month))?;
        println!("month {:>2}: {}", month, serde_json::to_string(&summary)?);
    }

    // malformed and out-of-range months are reported differently
    for raw in ["abc", "999"] {
        if let Err(e) = service.summary_from_query(loan.id, Some(raw)) {
            println!("month {:?}: {:?} ({})", raw, e.category(), e);
        }
    }

    println!("events recorded: {}", service.book().events().len());
    Ok(())
}
