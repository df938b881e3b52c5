//! Where the CLI gets credentials from.
//!
//! Order: `ROSTER_USERNAME`/`ROSTER_PASSWORD` from the environment (or a
//! `.env` file), then the last username plus the OS keychain, then a prompt.
//! Blank environment values count as unset.

use std::io::{self, Write};

use anyhow::{Context, Result};
use keyring::Entry;
use roster_core::Credentials;

use crate::config::APP_NAME;

pub const USERNAME_VAR: &str = "ROSTER_USERNAME";
pub const PASSWORD_VAR: &str = "ROSTER_PASSWORD";

/// The outside world as seen by credential lookup
pub trait CredentialSource {
    fn var(&self, name: &str) -> Option<String>;
    fn stored_password(&self, username: &str) -> Option<String>;
    fn store_password(&self, username: &str, password: &str) -> Result<()>;
    fn delete_password(&self, username: &str) -> Result<()>;
    fn prompt_username(&self) -> Result<String>;
    fn prompt_password(&self) -> Result<String>;
}

/// Process environment, OS keychain and the terminal
pub struct SystemCredentials;

impl CredentialSource for SystemCredentials {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn stored_password(&self, username: &str) -> Option<String> {
        Entry::new(APP_NAME, username)
            .and_then(|entry| entry.get_password())
            .ok()
    }

    fn store_password(&self, username: &str, password: &str) -> Result<()> {
        let entry = Entry::new(APP_NAME, username)
            .context("Failed to create keyring entry")?;
        entry
            .set_password(password)
            .context("Failed to store password in keychain")?;
        Ok(())
    }

    fn delete_password(&self, username: &str) -> Result<()> {
        let entry = Entry::new(APP_NAME, username)
            .context("Failed to create keyring entry")?;
        entry
            .delete_credential()
            .context("Failed to delete credential from keychain")?;
        Ok(())
    }

    fn prompt_username(&self) -> Result<String> {
        eprint!("Username: ");
        io::stderr().flush()?;

        let mut username = String::new();
        io::stdin().read_line(&mut username)?;
        Ok(username.trim().to_string())
    }

    fn prompt_password(&self) -> Result<String> {
        let password = rpassword::prompt_password("Password: ")?;
        Ok(password)
    }
}

fn non_empty_var(source: &impl CredentialSource, name: &str) -> Option<String> {
    source.var(name).filter(|v| !v.trim().is_empty())
}

/// Resolve credentials for this run
pub fn resolve(source: &impl CredentialSource, last_username: Option<&str>) -> Result<Credentials> {
    let username = match non_empty_var(source, USERNAME_VAR)
        .or_else(|| last_username.map(str::to_string))
    {
        Some(username) => username,
        None => source.prompt_username()?,
    };

    let password = match non_empty_var(source, PASSWORD_VAR) {
        Some(password) => password,
        None => match source.stored_password(&username) {
            Some(password) => password,
            None => source.prompt_password()?,
        },
    };

    Ok(Credentials::new(username, password))
}

/// `--remember`: keep the password for next time
pub fn remember(source: &impl CredentialSource, creds: &Credentials) -> Result<()> {
    source.store_password(&creds.username, &creds.password)
}

/// `--forget`: drop the saved password of the last username, returning that username
pub fn forget(source: &impl CredentialSource, last_username: Option<&str>) -> Result<String> {
    let username = last_username
        .ok_or_else(|| anyhow::anyhow!("No saved username to forget"))?;
    source.delete_password(username)?;
    Ok(username.to_string())
}
