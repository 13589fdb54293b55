//! Credential service: registration, login, and token resolution.
//!
//! Generic over the user repository, password hasher, and token generator so
//! the same logic runs against SQLite in production and in-memory fakes in
//! tests.

use quill_types::error::{AuthError, FieldErrors, RepositoryError};
use quill_types::user::{AuthToken, LoginRequest, NewUser, RegisterRequest, User};
use tracing::{debug, info};

use crate::auth::hasher::{PasswordHasher, TokenGenerator};
use crate::auth::validation::{self, EMAIL_TAKEN, USERNAME_TAKEN, ValidRegistration};
use crate::repository::user::UserRepository;

/// Orchestrates account creation and token-based authentication.
pub struct AuthService<U: UserRepository, H: PasswordHasher, T: TokenGenerator> {
    user_repo: U,
    hasher: H,
    tokens: T,
}

fn storage(e: RepositoryError) -> AuthError {
    AuthError::Storage(e.to_string())
}

impl<U: UserRepository, H: PasswordHasher, T: TokenGenerator> AuthService<U, H, T> {
    pub fn new(user_repo: U, hasher: H, tokens: T) -> Self {
        Self {
            user_repo,
            hasher,
            tokens,
        }
    }

    /// Register a new account.
    ///
    /// Validates every field, rejects a taken username or email, and stores
    /// only the password hash.
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, AuthError> {
        let valid = validation::validate_registration(request).map_err(AuthError::Validation)?;

        let taken = self.taken_fields(&valid).await?;
        if !taken.is_empty() {
            return Err(AuthError::Validation(taken));
        }

        let password_hash = self.hasher.hash_password(&valid.password)?;
        let new_user = NewUser {
            username: valid.username,
            email: valid.email,
            password_hash,
        };

        // The unique indexes still guard against a concurrent sign-up racing the check above.
        let user = self
            .user_repo
            .create_user(&new_user)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(column) if column == "email" => {
                    AuthError::Validation(FieldErrors::single("email", EMAIL_TAKEN))
                }
                RepositoryError::Conflict(_) => {
                    AuthError::Validation(FieldErrors::single("username", USERNAME_TAKEN))
                }
                other => storage(other),
            })?;

        info!(user_id = user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Field errors for every unique field already claimed by another account.
    async fn taken_fields(&self, valid: &ValidRegistration) -> Result<FieldErrors, AuthError> {
        let mut errors = FieldErrors::new();
        if self
            .user_repo
            .get_by_username(&valid.username)
            .await
            .map_err(storage)?
            .is_some()
        {
            errors.add("username", USERNAME_TAKEN);
        }
        if self
            .user_repo
            .get_by_email(&valid.email)
            .await
            .map_err(storage)?
            .is_some()
        {
            errors.add("email", EMAIL_TAKEN);
        }
        Ok(errors)
    }

    /// Verify credentials and return the user's (possibly new) token.
    pub async fn authenticate(
        &self,
        request: &LoginRequest,
    ) -> Result<(User, AuthToken), AuthError> {
        let login = validation::validate_login(request).map_err(AuthError::Validation)?;

        let Some(user) = self
            .user_repo
            .get_by_username(&login.username)
            .await
            .map_err(storage)?
        else {
            debug!(username = %login.username, "Login for unknown user");
            return Err(AuthError::InvalidCredentials);
        };

        if !self
            .hasher
            .verify_password(&login.password, &user.password_hash)?
        {
            debug!(user_id = user.id, "Login with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let candidate = self.tokens.generate_token();
        let token = self
            .user_repo
            .get_or_create_token(user.id, &candidate)
            .await
            .map_err(storage)?;

        info!(user_id = user.id, "User logged in");
        Ok((user, token))
    }

    /// Resolve a bearer token to its user.
    pub async fn resolve(&self, token: &str) -> Result<User, AuthError> {
        if token.is_empty() {
            return Err(AuthError::Unauthenticated);
        }
        self.user_repo
            .get_user_by_token(token)
            .await
            .map_err(storage)?
            .ok_or(AuthError::Unauthenticated)
    }
}
