//! Submissions table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Submission table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum SubmissionConstraints {
    #[strum(serialize = "submissions_restaurant_name_not_empty")]
    RestaurantNameNotEmpty,
    #[strum(serialize = "submissions_outlet_name_not_empty")]
    OutletNameNotEmpty,
    #[strum(serialize = "submissions_sa_password_not_empty")]
    SaPasswordNotEmpty,
    #[strum(serialize = "submissions_credentials_not_empty")]
    CredentialsNotEmpty,

    #[strum(serialize = "submissions_updated_after_created")]
    UpdatedAfterCreated,
}

impl SubmissionConstraints {
    /// Creates a new [`SubmissionConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            SubmissionConstraints::UpdatedAfterCreated => ConstraintCategory::Chronological,
            _ => ConstraintCategory::Validation,
        }
    }
}

impl From<SubmissionConstraints> for String {
    #[inline]
    fn from(val: SubmissionConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for SubmissionConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
