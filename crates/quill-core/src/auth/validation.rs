//! Sign-up and login payload validation.
//!
//! Produces per-field messages in the wording existing clients display.

use quill_types::error::FieldErrors;
use quill_types::user::{LoginRequest, RegisterRequest};

pub const REQUIRED: &str = "This field is required.";
pub const BLANK: &str = "This field may not be blank.";
pub const USERNAME_TAKEN: &str = "A user with that username already exists.";
pub const EMAIL_TAKEN: &str = "A user with that email already exists.";

const USERNAME_MAX_LEN: usize = 150;
const EMAIL_MAX_LEN: usize = 254;

/// A sign-up payload that passed field validation.
#[derive(Debug, Clone)]
pub struct ValidRegistration {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Validated login credentials.
#[derive(Debug, Clone)]
pub struct ValidLogin {
    pub username: String,
    pub password: String,
}

/// Pull a required field, recording "required"/"blank" errors.
///
/// Usernames and emails are trimmed. Passwords are returned untrimmed, but a
/// whitespace-only password is still rejected as blank.
fn required(errors: &mut FieldErrors, field: &str, value: Option<&str>, trim: bool) -> String {
    match value {
        None => {
            errors.add(field, REQUIRED);
            String::new()
        }
        Some(v) => {
            let v = if trim { v.trim() } else { v };
            if v.trim().is_empty() {
                errors.add(field, BLANK);
            }
            v.to_string()
        }
    }
}

fn is_valid_username(username: &str) -> bool {
    username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '_' | '@' | '.' | '+' | '-'))
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains("..")
}

/// Validate a sign-up payload (uniqueness is checked by the store).
pub fn validate_registration(req: &RegisterRequest) -> Result<ValidRegistration, FieldErrors> {
    let mut errors = FieldErrors::new();

    let username = required(&mut errors, "username", req.username.as_deref(), true);
    if !username.is_empty() {
        if username.chars().count() > USERNAME_MAX_LEN {
            errors.add(
                "username",
                format!("Ensure this field has no more than {USERNAME_MAX_LEN} characters."),
            );
        }
        if !is_valid_username(&username) {
            errors.add(
                "username",
                "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
            );
        }
    }

    let email = required(&mut errors, "email", req.email.as_deref(), true);
    if !email.is_empty() {
        if email.chars().count() > EMAIL_MAX_LEN {
            errors.add(
                "email",
                format!("Ensure this field has no more than {EMAIL_MAX_LEN} characters."),
            );
        }
        if !is_valid_email(&email) {
            errors.add("email", "Enter a valid email address.");
        }
    }

    let password = required(&mut errors, "password", req.password.as_deref(), false);

    if errors.is_empty() {
        Ok(ValidRegistration {
            username,
            email,
            password,
        })
    } else {
        Err(errors)
    }
}

/// Validate that login credentials are present.
pub fn validate_login(req: &LoginRequest) -> Result<ValidLogin, FieldErrors> {
    let mut errors = FieldErrors::new();
    let username = required(&mut errors, "username", req.username.as_deref(), true);
    let password = required(&mut errors, "password", req.password.as_deref(), false);

    if errors.is_empty() {
        Ok(ValidLogin { username, password })
    } else {
        Err(errors)
    }
}
