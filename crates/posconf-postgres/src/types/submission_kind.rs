//! Submission kind enumeration.

use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Distinguishes the two checklist shapes stored in the `submissions` table.
///
/// Corresponds to the `SUBMISSION_KIND` PostgreSQL enum. Both kinds share one
/// row layout; they differ only in how many non-SA credentials are expected
/// and whether client metadata is captured.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::SubmissionKind"]
pub enum SubmissionKind {
    /// Single non-SA credential, no client metadata.
    #[db_rename = "configuration"]
    #[serde(rename = "configuration")]
    #[strum(serialize = "configuration")]
    Configuration,

    /// One or more non-SA credentials, remarks and client metadata.
    #[db_rename = "form"]
    #[serde(rename = "form")]
    #[strum(serialize = "form")]
    Form,
}

impl SubmissionKind {
    /// Returns whether submissions of this kind accept more than one credential.
    #[inline]
    pub fn allows_multiple_credentials(self) -> bool {
        matches!(self, SubmissionKind::Form)
    }

    /// Returns whether submissions of this kind record the client's address and user agent.
    #[inline]
    pub fn captures_client_metadata(self) -> bool {
        matches!(self, SubmissionKind::Form)
    }
}
