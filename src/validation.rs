use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Invalid {entity} name")]
    InvalidName { entity: &'static str },
    #[error("Invalid customer ID")]
    InvalidCustomerId,
    #[error("Invalid transaction amount: {amount}")]
    InvalidAmount { amount: f64 },
    #[error("Invalid transaction date")]
    InvalidDate,
    #[error("Invalid search query, expected a non-empty string")]
    InvalidQuery,
    #[error("Invalid branch, it is not a member of this bank")]
    UnknownBranch,
}

/// Returns the name unchanged when it contains something besides whitespace.
pub(crate) fn validate_name(name: String, entity: &'static str) -> Result<String, ValidationError> {
    if name.trim().is_empty() {
        Err(ValidationError::InvalidName { entity })
    } else {
        Ok(name)
    }
}

pub(crate) fn validate_amount(amount: f64) -> Result<f64, ValidationError> {
    if amount.is_finite() {
        Ok(amount)
    } else {
        Err(ValidationError::InvalidAmount { amount })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_names_are_rejected() {
        assert!(validate_name("Main".to_string(), "branch").is_ok());
        // surrounding whitespace is kept, only emptiness matters
        assert_eq!(
            validate_name("  Main ".to_string(), "branch").unwrap(),
            "  Main "
        );
        let err = validate_name(" \t\n".to_string(), "branch").unwrap_err();
        assert_eq!(err, ValidationError::InvalidName { entity: "branch" });
        assert_eq!(err.to_string(), "Invalid branch name");
    }

    #[test]
    fn non_finite_amounts_are_rejected() {
        assert_eq!(validate_amount(-12.5).unwrap(), -12.5);
        assert!(validate_amount(f64::NAN).is_err());
        assert!(validate_amount(f64::INFINITY).is_err());
        assert!(matches!(
            validate_amount(f64::NEG_INFINITY),
            Err(ValidationError::InvalidAmount { .. })
        ));
    }
}
