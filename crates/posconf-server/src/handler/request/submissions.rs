//! Checklist submission payloads.
//!
//! Names and usernames are trimmed before they are stored; passwords are kept
//! as entered. Absent optional text is stored as an empty string and absent
//! task flags as `false`.

use posconf_postgres::PgResult;
use posconf_postgres::model::NewSubmission;
use posconf_postgres::types::{NonSaCredential, SubmissionKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use super::validations::{is_blank, rejection, require};

/// Maintenance tasks ticked off on a checklist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskFlags {
    pub sa_pass_change: bool,
    pub synced_user_pass_change: bool,
    pub non_sa_pass_change: bool,
    pub windows_auth_disable: bool,
    pub sql_custom_port: bool,
    pub firewall_on_all_pcs: bool,
    pub anydesk_uninstall: bool,
    pub ultraviewer_pass_and_id: bool,
    pub pos_admin_pass_change: bool,
}

impl TaskFlags {
    fn apply(self, submission: &mut NewSubmission) {
        submission.sa_pass_change = self.sa_pass_change;
        submission.synced_user_pass_change = self.synced_user_pass_change;
        submission.non_sa_pass_change = self.non_sa_pass_change;
        submission.windows_auth_disable = self.windows_auth_disable;
        submission.sql_custom_port = self.sql_custom_port;
        submission.firewall_on_all_pcs = self.firewall_on_all_pcs;
        submission.anydesk_uninstall = self.anydesk_uninstall;
        submission.ultraviewer_pass_and_id = self.ultraviewer_pass_and_id;
        submission.pos_admin_pass_change = self.pos_admin_pass_change;
    }
}

/// Remote access tool credentials, all optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoteAccess {
    pub anydesk_username: Option<String>,
    pub anydesk_password: Option<String>,
    pub ultraviewer_username: Option<String>,
    pub ultraviewer_password: Option<String>,
}

impl RemoteAccess {
    fn apply(self, submission: &mut NewSubmission) {
        submission.anydesk_username = trimmed(self.anydesk_username);
        submission.anydesk_password = self.anydesk_password.unwrap_or_default();
        submission.ultraviewer_username = trimmed(self.ultraviewer_username);
        submission.ultraviewer_password = self.ultraviewer_password.unwrap_or_default();
    }
}

fn trimmed(value: Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or_default().to_owned()
}

/// Request payload for a configuration checklist.
///
/// Carries exactly one non-SA credential.
#[must_use]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationRequest {
    pub restaurant_name: Option<String>,
    pub outlet_name: Option<String>,
    pub sa_password: Option<String>,
    pub non_sa_username: Option<String>,
    pub non_sa_password: Option<String>,

    #[serde(flatten)]
    pub remote_access: RemoteAccess,
    #[serde(flatten)]
    pub tasks: TaskFlags,
}

impl ConfigurationRequest {
    /// Converts the validated payload into an insertable row.
    pub fn into_model(self, owner_id: Uuid, owner_username: &str) -> PgResult<NewSubmission> {
        let credential = NonSaCredential::new(
            trimmed(self.non_sa_username),
            self.non_sa_password.unwrap_or_default(),
        );

        let mut submission = NewSubmission::new(
            owner_id,
            owner_username,
            SubmissionKind::Configuration,
            &[credential],
        )?;
        submission.restaurant_name = trimmed(self.restaurant_name);
        submission.outlet_name = trimmed(self.outlet_name);
        submission.sa_password = self.sa_password.unwrap_or_default();
        self.remote_access.apply(&mut submission);
        self.tasks.apply(&mut submission);
        Ok(submission)
    }
}

impl Validate for ConfigurationRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        require("restaurantName", self.restaurant_name.as_deref())?;
        require("outletName", self.outlet_name.as_deref())?;
        require("saPassword", self.sa_password.as_deref())?;
        require("nonSaUsername", self.non_sa_username.as_deref())?;
        require("nonSaPassword", self.non_sa_password.as_deref())?;
        Ok(())
    }
}

/// One non-SA credential entry of a form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl CredentialRequest {
    /// Creates a credential entry.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }
}

/// Request payload for a form checklist.
///
/// Carries one or more non-SA credentials plus free-text remarks.
#[must_use]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormRequest {
    pub restaurant_name: Option<String>,
    pub outlet_name: Option<String>,
    pub sa_password: Option<String>,
    pub non_sa_credentials: Option<Vec<CredentialRequest>>,

    #[serde(flatten)]
    pub remote_access: RemoteAccess,
    #[serde(flatten)]
    pub tasks: TaskFlags,

    pub remarks: Option<String>,
    /// Browser user agent as reported by the client.
    pub user_agent: Option<String>,
}

impl FormRequest {
    /// Message returned when the credential list is missing or empty.
    pub const CREDENTIALS_REQUIRED: &str = "At least one Non-SA credential is required";

    /// Converts the validated payload into an insertable row.
    ///
    /// `fallback_user_agent` is recorded when the payload carries none.
    pub fn into_model(
        self,
        owner_id: Uuid,
        owner_username: &str,
        ip_address: String,
        fallback_user_agent: Option<String>,
    ) -> PgResult<NewSubmission> {
        let credentials: Vec<_> = self
            .non_sa_credentials
            .unwrap_or_default()
            .into_iter()
            .map(|c| NonSaCredential::new(trimmed(c.username), c.password.unwrap_or_default()))
            .collect();

        let mut submission =
            NewSubmission::new(owner_id, owner_username, SubmissionKind::Form, &credentials)?;
        submission.restaurant_name = trimmed(self.restaurant_name);
        submission.outlet_name = trimmed(self.outlet_name);
        submission.sa_password = self.sa_password.unwrap_or_default();
        self.remote_access.apply(&mut submission);
        self.tasks.apply(&mut submission);
        submission.remarks = Some(self.remarks.unwrap_or_default());
        submission.user_agent = Some(trimmed(self.user_agent.or(fallback_user_agent)));
        submission.ip_address = Some(ip_address.trim().to_owned());
        Ok(submission)
    }
}

impl Validate for FormRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        require("restaurantName", self.restaurant_name.as_deref())?;
        require("outletName", self.outlet_name.as_deref())?;
        require("saPassword", self.sa_password.as_deref())?;

        let credentials = self.non_sa_credentials.as_deref().unwrap_or_default();
        if credentials.is_empty() {
            return Err(rejection("nonSaCredentials", Self::CREDENTIALS_REQUIRED));
        }

        for (i, credential) in credentials.iter().enumerate() {
            if is_blank(credential.username.as_deref()) {
                return Err(rejection(
                    "nonSaCredentials",
                    format!("Non-SA credential #{}: Username is required", i + 1),
                ));
            }

            if is_blank(credential.password.as_deref()) {
                return Err(rejection(
                    "nonSaCredentials",
                    format!("Non-SA credential #{}: Password is required", i + 1),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(errors: ValidationErrors) -> Option<String> {
        errors
            .field_errors()
            .into_values()
            .flat_map(|errors| errors.iter())
            .find_map(|error| error.message.as_ref().map(ToString::to_string))
    }

    fn form() -> FormRequest {
        FormRequest {
            restaurant_name: Some("Harbor Grill".into()),
            outlet_name: Some("Pier 4".into()),
            sa_password: Some("sa-pass".into()),
            non_sa_credentials: Some(vec![CredentialRequest::new("pos_reader", "r3ad")]),
            ..FormRequest::default()
        }
    }

    #[test]
    fn configuration_reports_first_missing_field() {
        let request = ConfigurationRequest {
            restaurant_name: Some("Harbor Grill".into()),
            outlet_name: Some("   ".into()),
            ..ConfigurationRequest::default()
        };
        let errors = request.validate().expect_err("outlet is blank");
        assert_eq!(message(errors).as_deref(), Some("outletName is required"));
    }

    #[test]
    fn configuration_requires_restaurant_first() {
        let errors = ConfigurationRequest::default()
            .validate()
            .expect_err("empty payload");
        assert_eq!(message(errors).as_deref(), Some("restaurantName is required"));
    }

    #[test]
    fn form_requires_credentials() {
        let request = FormRequest {
            non_sa_credentials: Some(Vec::new()),
            ..form()
        };
        let errors = request.validate().expect_err("no credentials");
        assert_eq!(
            message(errors).as_deref(),
            Some("At least one Non-SA credential is required")
        );
    }

    #[test]
    fn form_cites_credential_position() {
        let request = FormRequest {
            non_sa_credentials: Some(vec![CredentialRequest::new("a", "")]),
            ..form()
        };
        let errors = request.validate().expect_err("blank password");
        assert_eq!(
            message(errors).as_deref(),
            Some("Non-SA credential #1: Password is required")
        );

        let request = FormRequest {
            non_sa_credentials: Some(vec![
                CredentialRequest::new("a", "b"),
                CredentialRequest::new(" ", "c"),
            ]),
            ..form()
        };
        let errors = request.validate().expect_err("blank username");
        assert_eq!(
            message(errors).as_deref(),
            Some("Non-SA credential #2: Username is required")
        );
    }

    #[test]
    fn deserializes_camel_case_with_defaults() -> anyhow::Result<()> {
        let request: ConfigurationRequest = serde_json::from_value(serde_json::json!({
            "restaurantName": " Harbor Grill ",
            "outletName": "Pier 4",
            "saPassword": "sa-pass",
            "nonSaUsername": " pos_reader ",
            "nonSaPassword": " r3ad ",
            "anydeskUsername": "desk",
            "sqlCustomPort": true,
        }))?;
        request.validate()?;

        let owner_id = Uuid::new_v4();
        let model = request.into_model(owner_id, "cashier")?;
        assert_eq!(model.kind, SubmissionKind::Configuration);
        assert_eq!(model.restaurant_name, "Harbor Grill");
        assert_eq!(model.anydesk_username, "desk");
        assert_eq!(model.ultraviewer_password, "");
        assert!(model.sql_custom_port);
        assert!(!model.sa_pass_change);
        assert_eq!(
            model.non_sa_credentials,
            serde_json::json!([{ "username": "pos_reader", "password": " r3ad " }])
        );
        assert!(model.ip_address.is_none());
        Ok(())
    }

    #[test]
    fn form_model_records_client_metadata() -> anyhow::Result<()> {
        let model = form().into_model(
            Uuid::new_v4(),
            "cashier",
            "203.0.113.7".into(),
            Some("curl/8.0".into()),
        )?;

        assert_eq!(model.kind, SubmissionKind::Form);
        assert_eq!(model.ip_address.as_deref(), Some("203.0.113.7"));
        assert_eq!(model.user_agent.as_deref(), Some("curl/8.0"));
        assert_eq!(model.remarks.as_deref(), Some(""));
        Ok(())
    }
}
