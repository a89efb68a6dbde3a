use std::io::Stdout;

use tracing::{debug, info};

use crate::{
    branch::{Branch, BranchKey, TransactionOutcome},
    customer::{Customer, CustomerId},
    report::{Reporter, TextReporter},
    validation::{ValidationError, validate_name},
};

/// Result of a transaction request addressed to a [`Bank`].
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome {
    /// The owning branch handled the request.
    Routed(TransactionOutcome),
    UnknownBranch,
    Invalid(ValidationError),
}

impl RequestOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Routed(outcome) if outcome.is_applied())
    }
}

/// Aggregate root owning every branch, and through them every customer.
///
/// Branches are addressed by their [`BranchKey`]; all customer mutations are
/// routed through the owning [`Branch`].
#[derive(Debug)]
pub struct Bank<R = TextReporter<Stdout>> {
    name: String,
    branches: Vec<Branch>,
    reporter: R,
}

impl Bank {
    /// Creates a bank printing its reports to stdout.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        Self::with_reporter(name, TextReporter::stdout())
    }
}

impl<R> Bank<R>
where
    R: Reporter,
{
    pub fn with_reporter(name: impl Into<String>, reporter: R) -> Result<Self, ValidationError> {
        Ok(Self {
            name: validate_name(name.into(), "bank")?,
            branches: Vec::new(),
            reporter,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    pub fn branch(&self, key: BranchKey) -> Option<&Branch> {
        self.branches.iter().find(|b| b.key() == key)
    }

    /// Exact, case-sensitive lookup.
    pub fn branch_by_name(&self, name: &str) -> Option<&Branch> {
        self.branches.iter().find(|b| b.name() == name)
    }

    fn branch_mut(&mut self, key: BranchKey) -> Option<&mut Branch> {
        self.branches.iter_mut().find(|b| b.key() == key)
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn into_reporter(self) -> R {
        self.reporter
    }

    pub fn add_branch(&mut self, branch: Branch) -> bool {
        if self.check_branch(branch.key()) {
            info!(bank = %self.name, branch = %branch.name(), "branch rejected as duplicate");
            return false;
        }
        debug!(bank = %self.name, branch = %branch.name(), "branch added");
        self.branches.push(branch);
        true
    }

    pub fn add_customer(&mut self, branch: BranchKey, customer: Customer) -> bool {
        match self.branch_mut(branch) {
            Some(branch) => branch.add_customer(customer),
            None => {
                info!(bank = %self.name, customer = %customer.id(), "customer added to unknown branch");
                false
            }
        }
    }

    /// Routes a transaction to a customer of a member branch.
    ///
    /// Unlike [`Branch::add_customer_transaction`], malformed amounts are
    /// reported as [`RequestOutcome::Invalid`] rather than errors.
    pub fn add_customer_transaction(
        &mut self,
        branch: BranchKey,
        customer_id: CustomerId,
        amount: f64,
    ) -> RequestOutcome {
        let Some(branch) = self.branch_mut(branch) else {
            info!(bank = %self.name, customer = %customer_id, "transaction for unknown branch");
            return RequestOutcome::UnknownBranch;
        };
        match branch.add_customer_transaction(customer_id, amount) {
            Ok(outcome) => RequestOutcome::Routed(outcome),
            Err(err) => {
                info!(branch = %branch.name(), customer = %customer_id, "transaction request refused: {err}");
                RequestOutcome::Invalid(err)
            }
        }
    }

    /// Case-insensitive substring search, returning the first matching
    /// branch name.
    pub fn find_branch_by_name(&mut self, query: &str) -> Result<Option<String>, ValidationError> {
        if query.trim().is_empty() {
            return Err(ValidationError::InvalidQuery);
        }
        let needle = query.to_lowercase();
        let found = self
            .branches
            .iter()
            .find(|b| b.name().to_lowercase().contains(&needle));
        self.reporter.branch_search(query, found);
        Ok(found.map(|b| b.name().to_string()))
    }

    pub fn check_branch(&self, branch: BranchKey) -> bool {
        self.branches.iter().any(|b| b.key() == branch)
    }

    pub fn list_customers(
        &mut self,
        branch: BranchKey,
        include_transactions: bool,
    ) -> Result<(), ValidationError> {
        let branch = self
            .branches
            .iter()
            .find(|b| b.key() == branch)
            .ok_or(ValidationError::UnknownBranch)?;
        self.reporter.customer_listing(branch, include_transactions);
        Ok(())
    }
}
