//! Database models for all entities in the system.

mod account;
mod submission;

pub use account::{Account, NewAccount};
pub use submission::{NewSubmission, Submission};
