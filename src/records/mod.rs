pub mod loan;
pub mod serialization;
pub mod user;

use hourglass_rs::{SafeTimeProvider, TimeSource};
use log::{info, warn};
use uuid::Uuid;

use crate::errors::{LoanError, Result};
use crate::events::{Event, EventStore};
use crate::types::{LoanId, UserId};

pub use loan::{Loan, NewLoan};
pub use serialization::{LoanSummaryView, LoanView, ScheduleItemView};
pub use user::{NewUser, User};

/// In-memory book of users, their loans, and who each loan is shared with.
///
/// Records are kept in insertion order.
pub struct LoanBook {
    users: Vec<User>,
    loans: Vec<Loan>,
    events: EventStore,
    time: SafeTimeProvider,
}

impl LoanBook {
    pub fn new(time: SafeTimeProvider) -> Self {
        Self {
            users: Vec::new(),
            loans: Vec::new(),
            events: EventStore::new(),
            time,
        }
    }

    /// book stamped with wall-clock time
    pub fn with_system_time() -> Self {
        Self::new(SafeTimeProvider::new(TimeSource::System))
    }

    /// register a user with a unique username and email
    pub fn create_user(&mut self, request: NewUser) -> Result<User> {
        request.validate()?;

        if self.users.iter().any(|u| u.conflicts_with(&request)) {
            warn!("rejected duplicate user {} <{}>", request.username, request.email);
            return Err(LoanError::DuplicateUser {
                username: request.username,
                email: request.email,
            });
        }

        let now = self.time.now();
        let user = User {
            id: Uuid::new_v4(),
            username: request.username,
            email: request.email,
            created_at: now,
        };

        self.events.emit(Event::UserRegistered {
            user_id: user.id,
            username: user.username.clone(),
            timestamp: now,
        });
        info!("registered user {} ({})", user.username, user.id);

        self.users.push(user.clone());
        Ok(user)
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn user(&self, user_id: UserId) -> Result<&User> {
        self.users
            .iter()
            .find(|u| u.id == user_id)
            .ok_or(LoanError::UserNotFound { id: user_id })
    }

    /// open a loan owned by an existing user
    pub fn create_loan(&mut self, request: NewLoan) -> Result<Loan> {
        self.user(request.user_id)?;
        request.validate()?;

        let now = self.time.now();
        let loan = Loan {
            id: Uuid::new_v4(),
            owner_id: request.user_id,
            amount: request.amount,
            annual_interest_rate: request.annual_interest_rate,
            loan_term_in_months: request.loan_term_in_months,
            shared_user_ids: Vec::new(),
            created_at: now,
        };

        self.events.emit(Event::LoanCreated {
            loan_id: loan.id,
            owner_id: loan.owner_id,
            amount: loan.amount,
            annual_interest_rate: loan.annual_interest_rate,
            loan_term_in_months: loan.loan_term_in_months,
            timestamp: now,
        });
        info!(
            "created loan {} for user {}: {} at {}% over {} months",
            loan.id, loan.owner_id, loan.amount, loan.annual_interest_rate, loan.loan_term_in_months
        );

        self.loans.push(loan.clone());
        Ok(loan)
    }

    pub fn loans(&self) -> &[Loan] {
        &self.loans
    }

    pub fn loan(&self, loan_id: LoanId) -> Result<&Loan> {
        self.loans
            .iter()
            .find(|l| l.id == loan_id)
            .ok_or(LoanError::LoanNotFound { id: loan_id })
    }

    /// loans owned by `user_id`
    pub fn loans_for_user(&self, user_id: UserId) -> Result<Vec<&Loan>> {
        self.user(user_id)?;
        Ok(self.loans.iter().filter(|l| l.owner_id == user_id).collect())
    }

    /// loans owned by or shared with `user_id`
    pub fn accessible_loans(&self, user_id: UserId) -> Result<Vec<&Loan>> {
        self.user(user_id)?;
        Ok(self.loans.iter().filter(|l| l.can_view(user_id)).collect())
    }

    /// grant another user read access to a loan
    pub fn share_loan(&mut self, loan_id: LoanId, user_id: UserId) -> Result<Loan> {
        let index = self
            .loans
            .iter()
            .position(|l| l.id == loan_id)
            .ok_or(LoanError::LoanNotFound { id: loan_id })?;
        self.user(user_id)?;

        let loan = &mut self.loans[index];
        if loan.owner_id == user_id {
            warn!("rejected sharing loan {} with its owner", loan_id);
            return Err(LoanError::ShareWithOwner { loan_id });
        }
        if loan.is_shared_with(user_id) {
            warn!("loan {} already shared with user {}", loan_id, user_id);
            return Err(LoanError::AlreadyShared { loan_id, user_id });
        }

        loan.shared_user_ids.push(user_id);
        let now = self.time.now();
        self.events.emit(Event::LoanShared {
            loan_id,
            owner_id: loan.owner_id,
            shared_with: user_id,
            timestamp: now,
        });
        info!("shared loan {} with user {}", loan_id, user_id);

        Ok(loan.clone())
    }

    pub fn events(&self) -> &EventStore {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }
}
