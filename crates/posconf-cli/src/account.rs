//! The `create-account` subcommand.

use anyhow::{Context, bail};
use posconf_postgres::model::NewAccount;
use posconf_postgres::query::AccountRepository;
use posconf_postgres::types::ConstraintViolation;
use posconf_postgres::types::constraints::AccountConstraints;
use posconf_server::service::PasswordHasher;

use crate::TRACING_TARGET_ACCOUNT;
use crate::config::CreateAccountArgs;

/// Minimum username length after trimming.
const MIN_USERNAME_LENGTH: usize = 3;
/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Validates the arguments and returns the trimmed username.
fn validate(args: &CreateAccountArgs) -> anyhow::Result<&str> {
    let username = args.username.trim();
    if username.chars().count() < MIN_USERNAME_LENGTH {
        bail!("username must be at least {MIN_USERNAME_LENGTH} characters");
    }

    if args.password.chars().count() < MIN_PASSWORD_LENGTH {
        bail!("password must be at least {MIN_PASSWORD_LENGTH} characters");
    }

    Ok(username)
}

/// Hashes the password and inserts the account.
pub async fn create_account(args: CreateAccountArgs) -> anyhow::Result<()> {
    let username = validate(&args)?.to_owned();

    let pg_client = args
        .postgres
        .clone()
        .build()
        .context("failed to create database client")?;
    pg_client
        .run_pending_migrations()
        .await
        .context("failed to apply database migrations")?;

    let mut conn = pg_client.get_connection().await?;
    if conn.username_exists(&username).await? {
        bail!("account already exists");
    }

    let password_hash = PasswordHasher::new().hash_password(&args.password)?;
    let new_account = NewAccount {
        username,
        password_hash,
    };

    let account = match conn.create_account(new_account).await {
        Ok(account) => account,
        Err(err)
            if err.constraint_violation()
                == Some(ConstraintViolation::Account(AccountConstraints::UsernameUnique)) =>
        {
            bail!("account already exists");
        }
        Err(err) => return Err(err).context("failed to create account"),
    };

    tracing::info!(
        target: TRACING_TARGET_ACCOUNT,
        account_id = %account.id,
        username = %account.username,
        "account created"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use posconf_postgres::PgConfig;

    use super::*;

    fn args(username: &str, password: &str) -> CreateAccountArgs {
        CreateAccountArgs {
            username: username.to_owned(),
            password: password.to_owned(),
            postgres: PgConfig::new("postgresql://localhost/posconf_test"),
        }
    }

    #[test]
    fn username_is_trimmed_before_length_check() {
        assert!(validate(&args("  ab  ", "secret")).is_err());
        assert_eq!(validate(&args("  abc ", "secret")).ok(), Some("abc"));
    }

    #[test]
    fn password_needs_six_characters() {
        let error = validate(&args("cashier", "12345")).err().map(|e| e.to_string());
        assert_eq!(
            error.as_deref(),
            Some("password must be at least 6 characters")
        );
        assert!(validate(&args("cashier", "123456")).is_ok());
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn duplicate_username_is_rejected() -> anyhow::Result<()> {
        let url = std::env::var("POSTGRES_URL")?;
        let username = format!("dup-{}", std::process::id());
        let mut first = args(&username, "secret1");
        first.postgres = PgConfig::new(url);
        let second = first.clone();

        create_account(first).await?;
        let error = create_account(second).await.err().map(|e| e.to_string());
        assert_eq!(error.as_deref(), Some("account already exists"));
        Ok(())
    }
}
