/// Validation errors shared by every entity constructor.
pub mod validation;

/// Immutable amount and date records kept by customers.
pub mod transaction;

/// Customers and their transaction history. The balance is always derived
/// from the recorded transactions and never goes negative.
pub mod customer;

/// Branches own customers and route transaction requests to them by id.
pub mod branch;

/// The aggregate root. Every mutation of the hierarchy goes through here.
pub mod bank;

/// Output of the bank's query operations, decoupled from the model so it can
/// be captured in tests.
pub mod report;

/// Operations read from external input, applied to a [`bank::Bank`].
pub mod operation;

/// Bootstraps the CSV driver. It lives in the library so the integration
/// tests can drive it.
pub mod bin_utils;

pub use bank::{Bank, RequestOutcome};
pub use branch::{Branch, BranchKey, TransactionOutcome};
pub use customer::{Customer, CustomerId, CustomerKey};
pub use report::{Reporter, TextReporter};
pub use transaction::Transaction;
pub use validation::ValidationError;
