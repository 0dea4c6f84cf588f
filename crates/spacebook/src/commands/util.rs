//! Shared helpers for command handlers.

use std::io::IsTerminal;

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::ConfirmationRequired {
            action: message.to_owned(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Prompt for a line of input when the flag was omitted.
pub fn prompt_or(value: Option<String>, prompt: &str) -> Result<String, CliError> {
    match value {
        Some(v) => Ok(v),
        None => dialoguer::Input::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(|e| CliError::Io(std::io::Error::other(e))),
    }
}

/// Prompt for a password without echo when the flag was omitted.
pub fn password_or(value: Option<String>, prompt: &str) -> Result<String, CliError> {
    match value {
        Some(v) => Ok(v),
        None => rpassword::prompt_password(format!("{prompt}: ")).map_err(CliError::Io),
    }
}

/// Parse a `HH:MM` time argument.
pub fn parse_time(raw: &str, field: &str) -> Result<chrono::NaiveTime, CliError> {
    chrono::NaiveTime::parse_from_str(raw, "%H:%M").map_err(|_| CliError::Validation {
        field: field.to_owned(),
        reason: format!("expected HH:MM, got '{raw}'"),
    })
}

/// Parse a `YYYY-MM-DD` date argument.
pub fn parse_date(raw: &str, field: &str) -> Result<chrono::NaiveDate, CliError> {
    raw.parse().map_err(|_| CliError::Validation {
        field: field.to_owned(),
        reason: format!("expected YYYY-MM-DD, got '{raw}'"),
    })
}
