//! Repository traits implemented on [`PgConnection`].
//!
//! [`PgConnection`]: crate::PgConnection

pub mod account;
pub mod submission;

pub use account::AccountRepository;
pub use submission::SubmissionRepository;
