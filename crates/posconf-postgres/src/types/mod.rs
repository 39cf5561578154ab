//! Domain types shared between the database layer and its callers.

pub mod constraints;
mod credential;
mod pagination;
mod submission_kind;

pub use constraints::{ConstraintCategory, ConstraintViolation};
pub use credential::NonSaCredential;
pub use pagination::{MAX_LIMIT, OffsetPage, OffsetPagination};
pub use submission_kind::SubmissionKind;
