//! Database constraint violations organized by table.

mod accounts;
mod submissions;

use std::fmt;

pub use accounts::AccountConstraints;
use serde::{Deserialize, Serialize};
pub use submissions::SubmissionConstraints;

/// Unified constraint violation enum that can represent any known database constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ConstraintViolation {
    Account(AccountConstraints),
    Submission(SubmissionConstraints),
}

/// Categories of database constraint violations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintCategory {
    /// Data validation constraints (format, length, range checks).
    Validation,
    /// Chronological integrity constraints (timestamp relationships).
    Chronological,
    /// Uniqueness constraints (primary keys, unique indexes).
    Uniqueness,
}

impl ConstraintViolation {
    /// Creates a new [`ConstraintViolation`] from the constraint name.
    ///
    /// Returns `None` if the constraint name is not recognized.
    ///
    /// ```
    /// use posconf_postgres::types::ConstraintViolation;
    ///
    /// assert!(ConstraintViolation::new("accounts_username_unique_idx").is_some());
    /// assert!(ConstraintViolation::new("unknown_constraint").is_none());
    /// ```
    pub fn new(constraint: &str) -> Option<Self> {
        if constraint.starts_with("accounts_") {
            AccountConstraints::new(constraint).map(ConstraintViolation::Account)
        } else if constraint.starts_with("submissions_") {
            SubmissionConstraints::new(constraint).map(ConstraintViolation::Submission)
        } else {
            None
        }
    }

    /// Returns the table name associated with this constraint.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConstraintViolation::Account(_) => "accounts",
            ConstraintViolation::Submission(_) => "submissions",
        }
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            ConstraintViolation::Account(c) => c.categorize(),
            ConstraintViolation::Submission(c) => c.categorize(),
        }
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintViolation::Account(c) => write!(f, "{c}"),
            ConstraintViolation::Submission(c) => write!(f, "{c}"),
        }
    }
}

impl From<ConstraintViolation> for String {
    #[inline]
    fn from(val: ConstraintViolation) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for ConstraintViolation {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ConstraintViolation::new(&value).ok_or(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_by_table_prefix() {
        let violation = ConstraintViolation::new("accounts_username_unique_idx");
        assert_eq!(
            violation,
            Some(ConstraintViolation::Account(AccountConstraints::UsernameUnique))
        );

        let violation = ConstraintViolation::new("submissions_credentials_not_empty");
        assert_eq!(
            violation.map(|v| v.table_name()),
            Some("submissions")
        );
    }

    #[test]
    fn categorizes_violations() {
        let unique = ConstraintViolation::Account(AccountConstraints::UsernameUnique);
        assert_eq!(unique.categorize(), ConstraintCategory::Uniqueness);

        let blank = ConstraintViolation::Submission(SubmissionConstraints::OutletNameNotEmpty);
        assert_eq!(blank.categorize(), ConstraintCategory::Validation);
        assert_eq!(blank.to_string(), "submissions_outlet_name_not_empty");
    }
}
