use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{LoanId, UserId};

/// all events that can be emitted by the loan book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    UserRegistered {
        user_id: UserId,
        username: String,
        timestamp: DateTime<Utc>,
    },
    LoanCreated {
        loan_id: LoanId,
        owner_id: UserId,
        amount: Decimal,
        annual_interest_rate: Decimal,
        loan_term_in_months: i64,
        timestamp: DateTime<Utc>,
    },
    LoanShared {
        loan_id: LoanId,
        owner_id: UserId,
        shared_with: UserId,
        timestamp: DateTime<Utc>,
    },
}

impl Event {
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Event::UserRegistered { timestamp, .. }
            | Event::LoanCreated { timestamp, .. }
            | Event::LoanShared { timestamp, .. } => *timestamp,
        }
    }
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    #[test]
    fn test_take_drains_store() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut store = EventStore::new();
        store.emit(Event::UserRegistered {
            user_id: Uuid::new_v4(),
            username: "owner".to_string(),
            timestamp: at,
        });

        assert_eq!(store.len(), 1);
        assert_eq!(store.events()[0].timestamp(), at);

        let taken = store.take_events();
        assert_eq!(taken.len(), 1);
        assert!(store.is_empty());
    }
}
