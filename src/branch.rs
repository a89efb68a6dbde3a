use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, info};

use crate::{
    customer::{Customer, CustomerId},
    validation::{ValidationError, validate_amount, validate_name},
};

/// Identity of a [`Branch`], shared by all of its clones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BranchKey(u64);

impl BranchKey {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Result of routing a transaction request to a customer of a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionOutcome {
    Applied,
    /// The balance would have become negative, nothing was recorded.
    Overdraft,
    CustomerNotFound,
}

impl TransactionOutcome {
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }
}

#[derive(Debug, Clone)]
pub struct Branch {
    key: BranchKey,
    name: String,
    customers: Vec<Customer>,
}

impl Branch {
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            key: BranchKey::next(),
            name: validate_name(name.into(), "branch")?,
            customers: Vec::new(),
        })
    }

    pub fn key(&self) -> BranchKey {
        self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn customer(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id() == id)
    }

    /// Checks that `customer` is neither already a member nor sharing an id
    /// with a member.
    pub fn accepts(&self, customer: &Customer) -> bool {
        !self
            .customers
            .iter()
            .any(|c| c.key() == customer.key() || c.id() == customer.id())
    }

    pub fn add_customer(&mut self, customer: Customer) -> bool {
        if !self.accepts(&customer) {
            info!(branch = %self.name, customer = %customer.id(), "customer rejected as duplicate");
            return false;
        }
        debug!(branch = %self.name, customer = %customer.id(), "customer added");
        self.customers.push(customer);
        true
    }

    pub fn add_customer_transaction(
        &mut self,
        customer_id: CustomerId,
        amount: f64,
    ) -> Result<TransactionOutcome, ValidationError> {
        let amount = validate_amount(amount)?;
        let Some(customer) = self.customers.iter_mut().find(|c| c.id() == customer_id) else {
            info!(branch = %self.name, customer = %customer_id, "customer not found");
            return Ok(TransactionOutcome::CustomerNotFound);
        };
        if customer.add_transaction(amount)? {
            Ok(TransactionOutcome::Applied)
        } else {
            Ok(TransactionOutcome::Overdraft)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(id: u64) -> CustomerId {
        CustomerId::try_from(id).unwrap()
    }

    #[test]
    fn construction_guards() {
        assert_eq!(
            Branch::new(" ").unwrap_err(),
            ValidationError::InvalidName { entity: "branch" }
        );
        let branch = Branch::new("Main").unwrap();
        assert_eq!(branch.name(), "Main");
        assert!(branch.customers().is_empty());
    }

    #[test]
    fn add_customers() {
        let mut branch = Branch::new("Main").unwrap();
        let alice = Customer::new("Alice", 1).unwrap();

        assert!(branch.add_customer(alice.clone()));
        // same customer twice
        assert!(!branch.add_customer(alice));
        assert_eq!(branch.customers().len(), 1);

        // distinct customer reusing an id
        assert!(!branch.add_customer(Customer::new("Mallory", 1).unwrap()));
        assert_eq!(branch.customers().len(), 1);

        assert!(branch.add_customer(Customer::new("Bob", 2).unwrap()));
        let names: Vec<&str> = branch.customers().iter().map(Customer::name).collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
        assert_eq!(branch.customer(id(2)).unwrap().name(), "Bob");
        assert!(branch.customer(id(3)).is_none());
    }

    #[test]
    fn route_transactions() {
        let mut branch = Branch::new("Main").unwrap();
        branch.add_customer(Customer::new("Alice", 1).unwrap());

        assert_eq!(
            branch.add_customer_transaction(id(1), 30.0).unwrap(),
            TransactionOutcome::Applied
        );
        assert_eq!(
            branch.add_customer_transaction(id(1), -31.0).unwrap(),
            TransactionOutcome::Overdraft
        );
        assert_eq!(
            branch.add_customer_transaction(id(9), 5.0).unwrap(),
            TransactionOutcome::CustomerNotFound
        );
        assert!(matches!(
            branch.add_customer_transaction(id(1), f64::NAN),
            Err(ValidationError::InvalidAmount { .. })
        ));
        assert_eq!(branch.customer(id(1)).unwrap().balance(), 30.0);
    }
}
