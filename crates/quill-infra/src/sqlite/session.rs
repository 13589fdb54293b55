//! SQLite chat session repository.
//!
//! Each session row carries its exchange log as a JSON array in the `messages`
//! column. Appends are a read-modify-write of that array inside a transaction
//! on the single-connection writer pool, which serializes concurrent appends.

use chrono::Utc;
use quill_core::chat::repository::SessionRepository;
use quill_types::chat::{ChatSession, Exchange};
use quill_types::error::RepositoryError;
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime};

/// SQLite-backed implementation of `SessionRepository`.
pub struct SqliteSessionRepository {
    pool: DatabasePool,
}

impl SqliteSessionRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain ChatSession.
struct SessionRow {
    id: i64,
    user_id: i64,
    title: String,
    messages: String,
    created_at: String,
    updated_at: String,
}

impl SessionRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            title: row.try_get("title")?,
            messages: row.try_get("messages")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_session(self) -> Result<ChatSession, RepositoryError> {
        Ok(ChatSession {
            id: self.id,
            user_id: self.user_id,
            title: self.title,
            messages: parse_log(&self.messages)?,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

fn parse_log(raw: &str) -> Result<Vec<Exchange>, RepositoryError> {
    serde_json::from_str(raw)
        .map_err(|e| RepositoryError::Query(format!("invalid exchange log: {e}")))
}

fn map_session_row(row: &sqlx::sqlite::SqliteRow) -> Result<ChatSession, RepositoryError> {
    SessionRow::from_row(row)
        .map_err(|e| RepositoryError::Query(e.to_string()))?
        .into_session()
}

impl SessionRepository for SqliteSessionRepository {
    async fn create_session(
        &self,
        user_id: i64,
        title: &str,
    ) -> Result<ChatSession, RepositoryError> {
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO chat_sessions (user_id, title, messages, created_at, updated_at)
             VALUES (?, ?, '[]', ?, ?)",
        )
        .bind(user_id)
        .bind(title)
        .bind(format_datetime(&now))
        .bind(format_datetime(&now))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(ChatSession {
            id: result.last_insert_rowid(),
            user_id,
            title: title.to_string(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    async fn get_session(
        &self,
        session_id: i64,
        user_id: i64,
    ) -> Result<Option<ChatSession>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM chat_sessions WHERE id = ? AND user_id = ?")
            .bind(session_id)
            .bind(user_id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref().map(map_session_row).transpose()
    }

    async fn list_sessions(&self, user_id: i64) -> Result<Vec<ChatSession>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM chat_sessions WHERE user_id = ? ORDER BY id ASC")
            .bind(user_id)
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter().map(map_session_row).collect()
    }

    async fn append_exchange(
        &self,
        session_id: i64,
        user_id: i64,
        exchange: &Exchange,
    ) -> Result<ChatSession, RepositoryError> {
        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let row = sqlx::query("SELECT * FROM chat_sessions WHERE id = ? AND user_id = ?")
            .bind(session_id)
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?
            .ok_or(RepositoryError::NotFound)?;

        let mut session = map_session_row(&row)?;
        session.messages.push(exchange.clone());
        session.updated_at = Utc::now();

        let log = serde_json::to_string(&session.messages)
            .map_err(|e| RepositoryError::Query(format!("failed to encode exchange log: {e}")))?;

        sqlx::query("UPDATE chat_sessions SET messages = ?, updated_at = ? WHERE id = ?")
            .bind(&log)
            .bind(format_datetime(&session.updated_at))
            .bind(session_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(session)
    }
}
