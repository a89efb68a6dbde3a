use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

use tracing::{debug, info};

use crate::{
    transaction::Transaction,
    validation::{ValidationError, validate_amount, validate_name},
};

/// Positive customer identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CustomerId(u64);

impl CustomerId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl TryFrom<i64> for CustomerId {
    type Error = ValidationError;

    fn try_from(id: i64) -> Result<Self, Self::Error> {
        if id > 0 {
            Ok(Self(id as u64))
        } else {
            Err(ValidationError::InvalidCustomerId)
        }
    }
}

impl TryFrom<u64> for CustomerId {
    type Error = ValidationError;

    fn try_from(id: u64) -> Result<Self, Self::Error> {
        if id > 0 {
            Ok(Self(id))
        } else {
            Err(ValidationError::InvalidCustomerId)
        }
    }
}

impl TryFrom<f64> for CustomerId {
    type Error = ValidationError;

    fn try_from(id: f64) -> Result<Self, Self::Error> {
        // `u64::MAX as f64` rounds up to 2^64, which is itself out of range
        if id.is_finite() && id.fract() == 0.0 && id >= 1.0 && id < u64::MAX as f64 {
            Ok(Self(id as u64))
        } else {
            Err(ValidationError::InvalidCustomerId)
        }
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identity of a [`Customer`], shared by all of its clones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CustomerKey(u64);

impl CustomerKey {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone)]
pub struct Customer {
    key: CustomerKey,
    name: String,
    id: CustomerId,
    transactions: Vec<Transaction>,
}

impl Customer {
    pub fn new(name: impl Into<String>, id: i64) -> Result<Self, ValidationError> {
        let name = validate_name(name.into(), "customer")?;
        Ok(Self::with_id(name, CustomerId::try_from(id)?))
    }

    fn with_id(name: String, id: CustomerId) -> Self {
        Self {
            key: CustomerKey::next(),
            name,
            id,
            transactions: Vec::new(),
        }
    }

    /// Same as [`Customer::new`], for ids that are already validated.
    pub fn from_id(name: impl Into<String>, id: CustomerId) -> Result<Self, ValidationError> {
        Ok(Self::with_id(validate_name(name.into(), "customer")?, id))
    }

    pub fn key(&self) -> CustomerKey {
        self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn balance(&self) -> f64 {
        self.transactions.iter().map(Transaction::amount).sum()
    }

    /// Records a transaction dated now.
    ///
    /// Returns `Ok(false)` without recording anything when the resulting
    /// balance would be negative.
    pub fn add_transaction(&mut self, amount: f64) -> Result<bool, ValidationError> {
        let amount = validate_amount(amount)?;
        let new_balance = self.balance() + amount;
        if new_balance < 0.0 {
            info!(customer = %self.id, amount, balance = self.balance(), "overdraft rejected");
            return Ok(false);
        }
        self.transactions.push(Transaction::new(amount)?);
        debug!(customer = %self.id, amount, balance = new_balance, "transaction recorded");
        Ok(true)
    }
}
