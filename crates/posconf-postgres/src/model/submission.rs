//! Checklist submission model.
//!
//! Configuration and form checklists share one table and are told apart by
//! [`SubmissionKind`]. A configuration carries exactly one non-SA credential,
//! a form carries one or more.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::submissions;
use crate::types::{NonSaCredential, SubmissionKind};
use crate::{PgError, PgResult};

/// A persisted restaurant/outlet checklist.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = submissions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Submission {
    /// Unique submission identifier.
    pub id: Uuid,
    /// Account that created the submission.
    pub owner_id: Uuid,
    /// Username of the owner at submission time.
    pub owner_username: String,
    /// Checklist shape.
    pub kind: SubmissionKind,

    pub restaurant_name: String,
    pub outlet_name: String,
    pub sa_password: String,
    /// JSONB array of `{username, password}` objects.
    pub non_sa_credentials: serde_json::Value,

    pub anydesk_username: String,
    pub anydesk_password: String,
    pub ultraviewer_username: String,
    pub ultraviewer_password: String,

    pub sa_pass_change: bool,
    pub synced_user_pass_change: bool,
    pub non_sa_pass_change: bool,
    pub windows_auth_disable: bool,
    pub sql_custom_port: bool,
    pub firewall_on_all_pcs: bool,
    pub anydesk_uninstall: bool,
    pub ultraviewer_pass_and_id: bool,
    pub pos_admin_pass_change: bool,

    /// Free-text notes from the operator.
    pub remarks: Option<String>,
    /// User agent reported by the submitting client.
    pub user_agent: Option<String>,
    /// Best-effort client address taken from forwarding headers.
    pub ip_address: Option<String>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Data for creating a new submission.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = submissions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewSubmission {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub owner_username: String,
    pub kind: SubmissionKind,

    pub restaurant_name: String,
    pub outlet_name: String,
    pub sa_password: String,
    pub non_sa_credentials: serde_json::Value,

    pub anydesk_username: String,
    pub anydesk_password: String,
    pub ultraviewer_username: String,
    pub ultraviewer_password: String,

    pub sa_pass_change: bool,
    pub synced_user_pass_change: bool,
    pub non_sa_pass_change: bool,
    pub windows_auth_disable: bool,
    pub sql_custom_port: bool,
    pub firewall_on_all_pcs: bool,
    pub anydesk_uninstall: bool,
    pub ultraviewer_pass_and_id: bool,
    pub pos_admin_pass_change: bool,

    pub remarks: Option<String>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}

impl NewSubmission {
    /// Creates an insertable submission with all optional fields empty and
    /// every task flag cleared.
    ///
    /// The id is a time-ordered UUIDv7 so rows created within the same
    /// microsecond still sort newest first.
    pub fn new(
        owner_id: Uuid,
        owner_username: impl Into<String>,
        kind: SubmissionKind,
        credentials: &[NonSaCredential],
    ) -> PgResult<Self> {
        Ok(Self {
            id: Uuid::now_v7(),
            owner_id,
            owner_username: owner_username.into(),
            kind,
            restaurant_name: String::new(),
            outlet_name: String::new(),
            sa_password: String::new(),
            non_sa_credentials: NonSaCredential::to_json(credentials)?,
            anydesk_username: String::new(),
            anydesk_password: String::new(),
            ultraviewer_username: String::new(),
            ultraviewer_password: String::new(),
            sa_pass_change: false,
            synced_user_pass_change: false,
            non_sa_pass_change: false,
            windows_auth_disable: false,
            sql_custom_port: false,
            firewall_on_all_pcs: false,
            anydesk_uninstall: false,
            ultraviewer_pass_and_id: false,
            pos_admin_pass_change: false,
            remarks: None,
            user_agent: None,
            ip_address: None,
        })
    }
}

impl Submission {
    /// Returns the decoded non-SA credentials.
    pub fn credentials(&self) -> PgResult<Vec<NonSaCredential>> {
        NonSaCredential::from_json(&self.non_sa_credentials)
    }

    /// Returns the first non-SA credential, which is the only one for
    /// configuration submissions.
    ///
    /// A stored row without credentials is reported as an error, never as an
    /// empty credential.
    pub fn primary_credential(&self) -> PgResult<NonSaCredential> {
        self.credentials()?.into_iter().next().ok_or_else(|| {
            PgError::Unexpected(format!("submission {} has no non-SA credential", self.id).into())
        })
    }

    /// Returns the creation time as a [`jiff::Timestamp`].
    #[inline]
    pub fn created_at(&self) -> jiff::Timestamp {
        self.created_at.into()
    }

    /// Returns the last update time as a [`jiff::Timestamp`].
    #[inline]
    pub fn updated_at(&self) -> jiff::Timestamp {
        self.updated_at.into()
    }
}
