use serde::Deserialize;
use thiserror::Error;

use crate::{
    bank::{Bank, RequestOutcome},
    branch::{Branch, BranchKey, TransactionOutcome},
    customer::{Customer, CustomerId},
    report::Reporter,
    validation::ValidationError,
};

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Branch,
    Customer,
    Transaction,
}

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("Malformed row: {0}")]
    Parse(#[from] csv::Error),
    #[error("`{field}` is required for {kind:?}")]
    FieldRequired {
        kind: OperationKind,
        field: &'static str,
    },
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("There is no branch named `{name}`")]
    UnknownBranch { name: String },
    #[error("{kind:?} was rejected as a duplicate")]
    Duplicate { kind: OperationKind },
    #[error("Transaction was not applied: {outcome:?}")]
    NotApplied { outcome: TransactionOutcome },
}

impl OperationError {
    /// Business-rule rejections, as opposed to malformed input.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Duplicate { .. } | Self::NotApplied { .. })
    }
}

/// A single request against a [`Bank`], with branches referred to by name.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    OpenBranch {
        branch: String,
    },
    AddCustomer {
        branch: String,
        id: CustomerId,
        name: String,
    },
    AddTransaction {
        branch: String,
        customer: CustomerId,
        amount: f64,
    },
}

impl Operation {
    pub fn parse(
        kind: OperationKind,
        branch: String,
        customer: Option<i64>,
        name: Option<String>,
        amount: Option<f64>,
    ) -> Result<Self, OperationError> {
        let required = |field| OperationError::FieldRequired { kind, field };
        match kind {
            OperationKind::Branch => Ok(Self::OpenBranch { branch }),
            OperationKind::Customer => Ok(Self::AddCustomer {
                branch,
                id: CustomerId::try_from(customer.ok_or_else(|| required("customer"))?)?,
                name: name.ok_or_else(|| required("name"))?,
            }),
            OperationKind::Transaction => Ok(Self::AddTransaction {
                branch,
                customer: CustomerId::try_from(customer.ok_or_else(|| required("customer"))?)?,
                amount: amount.ok_or_else(|| required("amount"))?,
            }),
        }
    }

    pub fn apply<R>(self, bank: &mut Bank<R>) -> Result<(), OperationError>
    where
        R: Reporter,
    {
        match self {
            Self::OpenBranch { branch } => {
                if bank.branch_by_name(&branch).is_some() {
                    return Err(OperationError::Duplicate {
                        kind: OperationKind::Branch,
                    });
                }
                bank.add_branch(Branch::new(branch)?);
                Ok(())
            }
            Self::AddCustomer { branch, id, name } => {
                let key = Self::branch_key(bank, &branch)?;
                let customer = Customer::from_id(name, id)?;
                if bank.add_customer(key, customer) {
                    Ok(())
                } else {
                    Err(OperationError::Duplicate {
                        kind: OperationKind::Customer,
                    })
                }
            }
            Self::AddTransaction {
                branch,
                customer,
                amount,
            } => {
                let key = Self::branch_key(bank, &branch)?;
                match bank.add_customer_transaction(key, customer, amount) {
                    RequestOutcome::Routed(TransactionOutcome::Applied) => Ok(()),
                    RequestOutcome::Routed(outcome) => Err(OperationError::NotApplied { outcome }),
                    RequestOutcome::UnknownBranch => {
                        Err(OperationError::UnknownBranch { name: branch })
                    }
                    RequestOutcome::Invalid(err) => Err(err.into()),
                }
            }
        }
    }

    fn branch_key<R>(bank: &Bank<R>, name: &str) -> Result<BranchKey, OperationError>
    where
        R: Reporter,
    {
        bank.branch_by_name(name)
            .map(Branch::key)
            .ok_or_else(|| OperationError::UnknownBranch {
                name: name.to_string(),
            })
    }
}
