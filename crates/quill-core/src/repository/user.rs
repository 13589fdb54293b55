//! UserRepository trait definition.
//!
//! Persistence for accounts and their auth tokens. Uses the same RPITIT
//! pattern as `SessionRepository`.

use quill_types::error::RepositoryError;
use quill_types::user::{AuthToken, NewUser, User};

/// Repository trait for user and auth token persistence.
///
/// Implementations live in quill-infra (e.g., `SqliteUserRepository`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait UserRepository: Send + Sync {
    /// Insert a new user.
    ///
    /// Returns `RepositoryError::Conflict` naming the column (`username` or
    /// `email`) when either is already taken.
    fn create_user(
        &self,
        user: &NewUser,
    ) -> impl std::future::Future<Output = Result<User, RepositoryError>> + Send;

    /// Look up a user by exact username.
    fn get_by_username(
        &self,
        username: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    /// Look up a user by exact email address.
    fn get_by_email(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    /// Look up a user by id.
    fn get_by_id(
        &self,
        user_id: i64,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    /// Return the user's token, inserting `candidate_key` if none exists yet.
    ///
    /// A user has at most one token; an existing token is returned unchanged.
    fn get_or_create_token(
        &self,
        user_id: i64,
        candidate_key: &str,
    ) -> impl std::future::Future<Output = Result<AuthToken, RepositoryError>> + Send;

    /// Resolve a token key to its owning user.
    fn get_user_by_token(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;
}
