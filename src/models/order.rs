use crate::models::Money;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// A customer order; lines live in the store next to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,

    /// Minute precision
    pub ordered_at: NaiveDateTime,

    pub client_id: u64,

    /// Delivery address
    pub address: String,

    /// Sum of line subtotals
    pub total: Money,
}

impl Order {
    /// New orders always start with a zero total.
    pub fn from_draft(id: u64, draft: OrderDraft) -> Self {
        Self {
            id,
            ordered_at: draft.ordered_at,
            client_id: draft.client_id,
            address: draft.address,
            total: Money::ZERO,
        }
    }

    pub fn apply(&mut self, draft: OrderDraft) {
        self.ordered_at = draft.ordered_at;
        self.client_id = draft.client_id;
        self.address = draft.address;
    }
}

/// Order fields as submitted; a posted total is never read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct OrderDraft {
    #[validate(custom(function = "validate_not_after_horizon"))]
    pub ordered_at: NaiveDateTime,

    #[validate(range(min = 1, message = "client id must be 1 or greater"))]
    pub client_id: u64,

    #[validate(length(min = 7, max = 350, message = "address must be 7 to 350 characters"))]
    pub address: String,
}

impl OrderDraft {
    /// Trim the address and drop seconds from the date.
    pub fn trimmed(self) -> Self {
        Self {
            ordered_at: truncate_to_minute(self.ordered_at),
            client_id: self.client_id,
            address: self.address.trim().to_string(),
        }
    }
}

/// Latest accepted order date: 2100-12-31 23:59.
pub fn order_date_horizon() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2100, 12, 31)
        .and_then(|date| date.and_hms_opt(23, 59, 0))
        .unwrap_or(NaiveDateTime::MAX)
}

/// Earliest accepted order date for a given day: that day at 00:00.
pub fn order_date_floor(today: NaiveDate) -> NaiveDateTime {
    today.and_time(NaiveTime::MIN)
}

pub fn truncate_to_minute(at: NaiveDateTime) -> NaiveDateTime {
    at.with_second(0)
        .and_then(|at| at.with_nanosecond(0))
        .unwrap_or(at)
}

fn validate_not_after_horizon(at: &NaiveDateTime) -> Result<(), ValidationError> {
    if *at <= order_date_horizon() {
        Ok(())
    } else {
        let mut error = ValidationError::new("date_range");
        error.message = Some("order date must not be after 2100-12-31 23:59".into());
        Err(error)
    }
}
