use crate::error::{AppError, AppResult};
use regex::Regex;

pub fn validate_email(email: &str) -> AppResult<()> {
    let email_regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
        .map_err(|e| AppError::InternalError(format!("Bad email pattern: {e}")))?;

    if !email_regex.is_match(email) {
        return Err(AppError::ValidationError(
            "Invalid email address".to_string(),
        ));
    }

    Ok(())
}

pub fn validate_username(username: &str) -> AppResult<()> {
    let len = username.chars().count();
    if !(2..=20).contains(&len) {
        return Err(AppError::ValidationError(
            "Username length must be between 2 and 20 characters".to_string(),
        ));
    }

    Ok(())
}
