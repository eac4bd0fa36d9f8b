pub mod amortization;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod records;
pub mod service;
pub mod types;

// re-export key types
pub use amortization::{
    compute_monthly_payment, replay, schedule, AmortizationEngine, AmortizationSchedule,
    AmortizationState, ScheduledPayment,
};
pub use config::EngineConfig;
pub use decimal::{Money, Rate, RoundingMode, RoundingPolicy};
pub use errors::{ErrorCategory, LoanError, Result};
pub use events::{Event, EventStore};
pub use records::{
    Loan, LoanBook, LoanSummaryView, LoanView, NewLoan, NewUser, ScheduleItemView, User,
};
pub use service::LoanService;
pub use types::{LoanId, LoanTerms, UserId};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
