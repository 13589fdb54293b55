//! SessionRepository trait definition.
//!
//! Provides owner-scoped CRUD for chat sessions and their exchange log.
//! Every lookup takes the owning user's id; a session owned by someone else
//! is reported exactly like a missing one.

use quill_types::chat::{ChatSession, Exchange};
use quill_types::error::RepositoryError;

/// Repository trait for chat session persistence.
///
/// Implementations live in quill-infra (e.g., `SqliteSessionRepository`).
pub trait SessionRepository: Send + Sync {
    /// Create an empty session for `user_id`.
    fn create_session(
        &self,
        user_id: i64,
        title: &str,
    ) -> impl std::future::Future<Output = Result<ChatSession, RepositoryError>> + Send;

    /// Get a session by id, only if owned by `user_id`.
    fn get_session(
        &self,
        session_id: i64,
        user_id: i64,
    ) -> impl std::future::Future<Output = Result<Option<ChatSession>, RepositoryError>> + Send;

    /// List a user's sessions in creation order.
    fn list_sessions(
        &self,
        user_id: i64,
    ) -> impl std::future::Future<Output = Result<Vec<ChatSession>, RepositoryError>> + Send;

    /// Append one exchange to an owned session and bump `updated_at`.
    ///
    /// The read-modify-write of the log must happen atomically so that
    /// concurrent appends are never lost. Returns `RepositoryError::NotFound`
    /// if the session does not exist or belongs to another user.
    fn append_exchange(
        &self,
        session_id: i64,
        user_id: i64,
        exchange: &Exchange,
    ) -> impl std::future::Future<Output = Result<ChatSession, RepositoryError>> + Send;
}
