use chrono::{DateTime, Local, Utc};

use crate::validation::{ValidationError, validate_amount};

/// Immutable record of a single balance change.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    amount: f64,
    date: DateTime<Local>,
}

impl Transaction {
    /// Creates a transaction dated now.
    pub fn new(amount: f64) -> Result<Self, ValidationError> {
        Self::with_date(amount, Local::now())
    }

    pub fn with_date(amount: f64, date: DateTime<Local>) -> Result<Self, ValidationError> {
        Ok(Self {
            amount: validate_amount(amount)?,
            date,
        })
    }

    /// Creates a transaction from milliseconds since the Unix epoch.
    pub fn from_timestamp_millis(amount: f64, millis: i64) -> Result<Self, ValidationError> {
        let date = DateTime::<Utc>::from_timestamp_millis(millis).ok_or(ValidationError::InvalidDate)?;
        Self::with_date(amount, date.with_timezone(&Local))
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn date(&self) -> DateTime<Local> {
        self.date
    }
}
