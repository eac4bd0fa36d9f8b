use log::{debug, warn};

use crate::amortization::AmortizationEngine;
use crate::errors::{LoanError, Result};
use crate::records::{LoanBook, LoanSummaryView, LoanView, ScheduleItemView};
use crate::types::LoanId;

/// Looks up loans in a [`LoanBook`] and presents engine results for them.
pub struct LoanService {
    book: LoanBook,
    engine: AmortizationEngine,
}

impl LoanService {
    pub fn new(book: LoanBook, engine: AmortizationEngine) -> Self {
        Self { book, engine }
    }

    pub fn book(&self) -> &LoanBook {
        &self.book
    }

    pub fn book_mut(&mut self) -> &mut LoanBook {
        &mut self.book
    }

    pub fn engine(&self) -> &AmortizationEngine {
        &self.engine
    }

    pub fn loan_view(&self, loan_id: LoanId) -> Result<LoanView> {
        self.book.loan(loan_id).map(LoanView::from)
    }

    /// month-by-month remaining balance and the fixed payment
    pub fn schedule(&self, loan_id: LoanId) -> Result<Vec<ScheduleItemView>> {
        let terms = self.book.loan(loan_id)?.terms().inspect_err(|e| {
            warn!("schedule for loan {} rejected: {}", loan_id, e);
        })?;

        let schedule = self.engine.schedule_for(&terms)?;
        debug!(
            "schedule for loan {}: {} months at {}",
            loan_id,
            schedule.len(),
            schedule.monthly_payment
        );
        Ok(schedule.payments.iter().map(ScheduleItemView::from).collect())
    }

    /// balances after `month` payments, `0 <= month <= term`
    pub fn summary(&self, loan_id: LoanId, month: i64) -> Result<LoanSummaryView> {
        let terms = self.book.loan(loan_id)?.terms()?;
        let state = self.engine.state_for(&terms, month).inspect_err(|e| {
            warn!("summary for loan {} rejected: {}", loan_id, e);
        })?;
        Ok(LoanSummaryView::from(state))
    }

    /// Summary for a raw query parameter.
    ///
    /// A missing or non-integer month is a malformed request and is reported
    /// before the loan is looked up; an integer outside the term is a range
    /// error from [`LoanService::summary`].
    pub fn summary_from_query(
        &self,
        loan_id: LoanId,
        raw_month: Option<&str>,
    ) -> Result<LoanSummaryView> {
        let month = parse_month(raw_month)?;
        self.summary(loan_id, month)
    }
}

fn parse_month(raw_month: Option<&str>) -> Result<i64> {
    let raw = raw_month.ok_or_else(|| LoanError::InvalidRequest {
        message: "month is required".to_string(),
    })?;
    raw.trim().parse::<i64>().map_err(|_| LoanError::InvalidRequest {
        message: format!("month must be an integer, got {:?}", raw),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Money;
    use crate::errors::ErrorCategory;
    use crate::records::{NewLoan, NewUser};
    use crate::types::UserId;
    use chrono::{TimeZone, Utc};
    use hourglass_rs::{SafeTimeProvider, TimeSource};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn service() -> (LoanService, UserId) {
        let time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        ));
        let mut service = LoanService::new(LoanBook::new(time), AmortizationEngine::standard());
        let owner = service
            .book_mut()
            .create_user(NewUser::new("owner", "owner@example.com"))
            .unwrap();
        (service, owner.id)
    }

    fn open_loan(
        service: &mut LoanService,
        owner: UserId,
        amount: Decimal,
        rate: Decimal,
        term: i64,
    ) -> LoanId {
        service
            .book_mut()
            .create_loan(NewLoan {
                user_id: owner,
                amount,
                annual_interest_rate: rate,
                loan_term_in_months: term,
            })
            .unwrap()
            .id
    }

    #[test]
    fn test_schedule_length_and_fields() {
        let (mut service, owner) = service();
        let loan_id = open_loan(&mut service, owner, dec!(1200.0), dec!(0.0), 12);

        let schedule = service.schedule(loan_id).unwrap();
        assert_eq!(schedule.len(), 12);
        assert_eq!(schedule[0].month, 1);
        assert_eq!(schedule[0].monthly_payment, Money::from_major(100));
        assert_eq!(schedule[0].remaining_balance, Money::from_major(1100));
        assert_eq!(schedule[11].remaining_balance, Money::ZERO);

        let json = serde_json::to_value(&schedule[0]).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 3);
        assert!(keys.contains(&"remaining_balance".to_string()));
    }

    #[test]
    fn test_schedule_monotonic_and_constant_payment() {
        let (mut service, owner) = service();
        let loan_id = open_loan(&mut service, owner, dec!(10000.0), dec!(6.0), 24);

        let schedule = service.schedule(loan_id).unwrap();
        assert_eq!(schedule.len(), 24);
        let payment = schedule[0].monthly_payment;
        assert!(schedule.iter().all(|item| item.monthly_payment == payment));
        assert!(schedule
            .windows(2)
            .all(|pair| pair[1].remaining_balance <= pair[0].remaining_balance));
        assert_eq!(schedule.last().unwrap().remaining_balance, Money::ZERO);
    }

    #[test]
    fn test_zero_term_rejected_on_request() {
        let (mut service, owner) = service();
        let loan_id = open_loan(&mut service, owner, dec!(1000.0), dec!(5.0), 0);

        let err = service.schedule(loan_id).unwrap_err();
        assert_eq!(err, LoanError::InvalidTerm { term_months: 0 });
        assert_eq!(err.category(), ErrorCategory::InvalidInput);

        assert_eq!(
            service.summary(loan_id, 0),
            Err(LoanError::InvalidTerm { term_months: 0 })
        );
    }

    #[test]
    fn test_summary_values() {
        let (mut service, owner) = service();
        let loan_id = open_loan(&mut service, owner, dec!(1000.0), dec!(12.0), 10);

        let start = service.summary(loan_id, 0).unwrap();
        assert_eq!(start.current_principal_balance, Money::from_major(1000));
        assert_eq!(start.total_principal_paid, Money::ZERO);
        assert_eq!(start.total_interest_paid, Money::ZERO);

        let first = service.summary(loan_id, 1).unwrap();
        assert_eq!(first.current_principal_balance.as_decimal(), dec!(904.42));
        assert_eq!(first.total_interest_paid.as_decimal(), dec!(10.00));

        let mid = service.summary(loan_id, 5).unwrap();
        assert!(!mid.current_principal_balance.is_negative());
        assert_eq!(
            mid.current_principal_balance + mid.total_principal_paid,
            Money::from_major(1000)
        );
    }

    #[test]
    fn test_zero_interest_summary_is_linear() {
        let (mut service, owner) = service();
        let loan_id = open_loan(&mut service, owner, dec!(1200.0), dec!(0.0), 12);

        let summary = service.summary(loan_id, 6).unwrap();
        assert_eq!(summary.total_principal_paid.as_decimal(), dec!(600.00));
        assert_eq!(summary.current_principal_balance.as_decimal(), dec!(600.00));
        assert_eq!(summary.total_interest_paid, Money::ZERO);
    }

    #[test]
    fn test_summary_query_validation() {
        let (mut service, owner) = service();
        let loan_id = open_loan(&mut service, owner, dec!(5000.0), dec!(5.0), 24);

        let missing = service.summary_from_query(loan_id, None).unwrap_err();
        assert_eq!(missing.category(), ErrorCategory::RequestShape);

        let not_a_number = service.summary_from_query(loan_id, Some("abc")).unwrap_err();
        assert_eq!(not_a_number.category(), ErrorCategory::RequestShape);

        let fractional = service.summary_from_query(loan_id, Some("1.5")).unwrap_err();
        assert_eq!(fractional.category(), ErrorCategory::RequestShape);

        assert_eq!(
            service.summary_from_query(loan_id, Some("-1")),
            Err(LoanError::MonthOutOfRange { month: -1, term_months: 24 })
        );
        assert_eq!(
            service.summary_from_query(loan_id, Some("25")),
            Err(LoanError::MonthOutOfRange { month: 25, term_months: 24 })
        );
        assert!(service.summary_from_query(loan_id, Some("24")).is_ok());
        assert!(service.summary_from_query(loan_id, Some(" 12 ")).is_ok());
    }

    #[test]
    fn test_month_far_out_of_range() {
        let (mut service, owner) = service();
        let loan_id = open_loan(&mut service, owner, dec!(1000.0), dec!(12.0), 10);

        let err = service.summary(loan_id, 999).unwrap_err();
        assert_eq!(err, LoanError::MonthOutOfRange { month: 999, term_months: 10 });
        assert_eq!(err.category(), ErrorCategory::InvalidInput);
    }

    #[test]
    fn test_unknown_loan() {
        let (service, _) = service();
        let missing = Uuid::new_v4();

        assert_eq!(
            service.schedule(missing),
            Err(LoanError::LoanNotFound { id: missing })
        );
        assert_eq!(
            service.summary(missing, 0),
            Err(LoanError::LoanNotFound { id: missing })
        );
        // shape errors win over lookups
        assert_eq!(
            service.summary_from_query(missing, Some("x")).unwrap_err().category(),
            ErrorCategory::RequestShape
        );
    }

    #[test]
    fn test_loan_view_lists_shared_users() {
        let (mut service, owner) = service();
        let viewer = service
            .book_mut()
            .create_user(NewUser::new("viewer", "viewer@example.com"))
            .unwrap();
        let loan_id = open_loan(&mut service, owner, dec!(10000.0), dec!(6.0), 12);
        service.book_mut().share_loan(loan_id, viewer.id).unwrap();

        let view = service.loan_view(loan_id).unwrap();
        assert_eq!(view.user_id, owner);
        assert_eq!(view.shared_user_ids, vec![viewer.id]);
        assert_eq!(view.loan_term_in_months, 12);
    }
}
