//! Submission response types.
//!
//! Listing items expose every stored field in camelCase. Configuration items
//! flatten their single credential into `nonSaUsername`/`nonSaPassword`; form
//! items carry the full `nonSaCredentials` list together with the client
//! metadata recorded at submission time.

use jiff::Timestamp;
use posconf_postgres::PgError;
use posconf_postgres::model::Submission;
use posconf_postgres::types::NonSaCredential;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PageInfo;
use crate::handler::request::{RemoteAccess, TaskFlags};

/// Summary of a freshly stored submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionSummary {
    pub id: Uuid,
    pub restaurant_name: String,
    pub outlet_name: String,
    pub created_at: Timestamp,
}

impl From<&Submission> for SubmissionSummary {
    fn from(submission: &Submission) -> Self {
        Self {
            id: submission.id,
            restaurant_name: submission.restaurant_name.clone(),
            outlet_name: submission.outlet_name.clone(),
            created_at: submission.created_at(),
        }
    }
}

/// Response returned after a configuration is stored.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigurationCreated {
    pub message: String,
    pub configuration: SubmissionSummary,
}

impl From<&Submission> for ConfigurationCreated {
    fn from(submission: &Submission) -> Self {
        Self {
            message: "Configuration submitted successfully".to_owned(),
            configuration: submission.into(),
        }
    }
}

/// Response returned after a form is stored.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormCreated {
    pub message: String,
    pub form: SubmissionSummary,
}

impl From<&Submission> for FormCreated {
    fn from(submission: &Submission) -> Self {
        Self {
            message: "Form submitted successfully".to_owned(),
            form: submission.into(),
        }
    }
}

fn remote_access(submission: &Submission) -> RemoteAccess {
    RemoteAccess {
        anydesk_username: Some(submission.anydesk_username.clone()),
        anydesk_password: Some(submission.anydesk_password.clone()),
        ultraviewer_username: Some(submission.ultraviewer_username.clone()),
        ultraviewer_password: Some(submission.ultraviewer_password.clone()),
    }
}

fn task_flags(submission: &Submission) -> TaskFlags {
    TaskFlags {
        sa_pass_change: submission.sa_pass_change,
        synced_user_pass_change: submission.synced_user_pass_change,
        non_sa_pass_change: submission.non_sa_pass_change,
        windows_auth_disable: submission.windows_auth_disable,
        sql_custom_port: submission.sql_custom_port,
        firewall_on_all_pcs: submission.firewall_on_all_pcs,
        anydesk_uninstall: submission.anydesk_uninstall,
        ultraviewer_pass_and_id: submission.ultraviewer_pass_and_id,
        pos_admin_pass_change: submission.pos_admin_pass_change,
    }
}

/// Stored configuration checklist.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub restaurant_name: String,
    pub outlet_name: String,
    pub sa_password: String,
    pub non_sa_username: String,
    pub non_sa_password: String,
    #[serde(flatten)]
    pub remote_access: RemoteAccess,
    #[serde(flatten)]
    pub tasks: TaskFlags,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<Submission> for Configuration {
    type Error = PgError;

    fn try_from(submission: Submission) -> Result<Self, Self::Error> {
        let credential = submission.primary_credential()?;

        Ok(Self {
            id: submission.id,
            user_id: submission.owner_id,
            remote_access: remote_access(&submission),
            tasks: task_flags(&submission),
            created_at: submission.created_at(),
            updated_at: submission.updated_at(),
            username: submission.owner_username,
            restaurant_name: submission.restaurant_name,
            outlet_name: submission.outlet_name,
            sa_password: submission.sa_password,
            non_sa_username: credential.username,
            non_sa_password: credential.password,
        })
    }
}

/// Stored form checklist.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub restaurant_name: String,
    pub outlet_name: String,
    pub sa_password: String,
    pub non_sa_credentials: Vec<NonSaCredential>,
    #[serde(flatten)]
    pub remote_access: RemoteAccess,
    #[serde(flatten)]
    pub tasks: TaskFlags,
    pub remarks: String,
    pub user_agent: String,
    pub ip_address: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<Submission> for Form {
    type Error = PgError;

    fn try_from(submission: Submission) -> Result<Self, Self::Error> {
        Ok(Self {
            id: submission.id,
            user_id: submission.owner_id,
            non_sa_credentials: submission.credentials()?,
            remote_access: remote_access(&submission),
            tasks: task_flags(&submission),
            created_at: submission.created_at(),
            updated_at: submission.updated_at(),
            username: submission.owner_username,
            restaurant_name: submission.restaurant_name,
            outlet_name: submission.outlet_name,
            sa_password: submission.sa_password,
            remarks: submission.remarks.unwrap_or_default(),
            user_agent: submission.user_agent.unwrap_or_default(),
            ip_address: submission.ip_address.unwrap_or_default(),
        })
    }
}

/// A page of the caller's configurations.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigurationsPage {
    pub configurations: Vec<Configuration>,
    pub pagination: PageInfo,
}

/// A page of the caller's forms.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormsPage {
    pub forms: Vec<Form>,
    pub pagination: PageInfo,
}

#[cfg(test)]
mod tests {
    use posconf_postgres::types::SubmissionKind;

    use super::*;

    fn stored(kind: SubmissionKind, credentials: serde_json::Value) -> Submission {
        let now = Timestamp::now();
        Submission {
            id: Uuid::now_v7(),
            owner_id: Uuid::new_v4(),
            owner_username: "cashier".into(),
            kind,
            restaurant_name: "Harbor Grill".into(),
            outlet_name: "Pier 4".into(),
            sa_password: "sa-pass".into(),
            non_sa_credentials: credentials,
            anydesk_username: String::new(),
            anydesk_password: String::new(),
            ultraviewer_username: "uv".into(),
            ultraviewer_password: String::new(),
            sa_pass_change: true,
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
            ip_address: Some("203.0.113.7".into()),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[test]
    fn configuration_flattens_single_credential() -> anyhow::Result<()> {
        let submission = stored(
            SubmissionKind::Configuration,
            serde_json::json!([{ "username": "pos_reader", "password": "r3ad" }]),
        );
        let value = serde_json::to_value(Configuration::try_from(submission)?)?;

        assert_eq!(value["nonSaUsername"], "pos_reader");
        assert_eq!(value["nonSaPassword"], "r3ad");
        assert_eq!(value["ultraviewerUsername"], "uv");
        assert_eq!(value["saPassChange"], true);
        assert_eq!(value["username"], "cashier");
        assert!(value.get("nonSaCredentials").is_none());
        assert!(value["createdAt"].is_string());
        Ok(())
    }

    #[test]
    fn form_defaults_missing_metadata() -> anyhow::Result<()> {
        let submission = stored(
            SubmissionKind::Form,
            serde_json::json!([
                { "username": "a", "password": "b" },
                { "username": "c", "password": "d" },
            ]),
        );
        let value = serde_json::to_value(Form::try_from(submission)?)?;

        assert_eq!(value["nonSaCredentials"][1]["username"], "c");
        assert_eq!(value["remarks"], "");
        assert_eq!(value["userAgent"], "");
        assert_eq!(value["ipAddress"], "203.0.113.7");
        Ok(())
    }

    #[test]
    fn created_responses_carry_summary_only() -> anyhow::Result<()> {
        let submission = stored(SubmissionKind::Form, serde_json::json!([]));
        let value = serde_json::to_value(FormCreated::from(&submission))?;

        assert_eq!(value["message"], "Form submitted successfully");
        assert_eq!(value["form"]["restaurantName"], "Harbor Grill");
        assert!(value["form"].get("saPassword").is_none());
        Ok(())
    }

    #[test]
    fn corrupt_credentials_fail_instead_of_listing_blanks() {
        let submission = stored(
            SubmissionKind::Configuration,
            serde_json::json!([{ "password": "r3ad" }]),
        );
        assert!(matches!(
            Configuration::try_from(submission),
            Err(PgError::Decode(_))
        ));

        let submission = stored(SubmissionKind::Configuration, serde_json::json!([]));
        assert!(Configuration::try_from(submission).is_err());

        let submission = stored(
            SubmissionKind::Form,
            serde_json::json!([{ "username": "a", "password": "b" }, "garbage"]),
        );
        assert!(matches!(Form::try_from(submission), Err(PgError::Decode(_))));
    }
}
