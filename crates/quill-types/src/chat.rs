//! Chat session and exchange log types for Quill.
//!
//! A session owns an append-only log of [`Exchange`]s. The log is stored as a
//! JSON array using the `{"user", "assistant", "time"}` shape, and presented to
//! clients either raw ([`SessionLog`]) or flattened into one display entry per
//! speaker ([`SessionSummary`]).

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Title given to sessions created without one.
pub const DEFAULT_SESSION_TITLE: &str = "New Chat";

/// Timestamp format stored alongside each exchange.
pub const EXCHANGE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Normalize a requested session title, falling back to [`DEFAULT_SESSION_TITLE`].
pub fn session_title(requested: Option<&str>) -> String {
    match requested.map(str::trim) {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => DEFAULT_SESSION_TITLE.to_string(),
    }
}

/// One user prompt and the assistant reply it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    #[serde(rename = "user")]
    pub user_text: String,
    #[serde(rename = "assistant", default)]
    pub assistant_text: String,
    #[serde(rename = "time")]
    pub timestamp: String,
}

impl Exchange {
    /// Build an exchange stamped with the current server time.
    pub fn new(user_text: impl Into<String>, assistant_text: impl Into<String>) -> Self {
        Self {
            user_text: user_text.into(),
            assistant_text: assistant_text.into(),
            timestamp: Local::now().format(EXCHANGE_TIME_FORMAT).to_string(),
        }
    }
}

/// A conversation thread owned by a single user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    /// Exchange log in insertion order.
    pub messages: Vec<Exchange>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChatSession {
    /// Expand the log into display entries: user then assistant, per exchange.
    pub fn display_messages(&self) -> Vec<DisplayMessage> {
        self.messages
            .iter()
            .flat_map(|exchange| {
                [
                    DisplayMessage::new(exchange.user_text.clone(), Sender::User),
                    DisplayMessage::new(exchange.assistant_text.clone(), Sender::Assistant),
                ]
            })
            .collect()
    }
}

/// Which side of an exchange a display entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// A single chat bubble as rendered by clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayMessage {
    /// Freshly generated timestamp string; not stable across requests.
    pub id: String,
    pub text: String,
    pub sender: Sender,
}

impl DisplayMessage {
    fn new(text: String, sender: Sender) -> Self {
        Self {
            id: Local::now().format("%Y-%m-%d %H:%M:%S%.6f").to_string(),
            text,
            sender,
        }
    }
}

/// Session list entry with the flattened message view.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub id: i64,
    pub title: String,
    pub messages: Vec<DisplayMessage>,
}

impl From<&ChatSession> for SessionSummary {
    fn from(session: &ChatSession) -> Self {
        Self {
            id: session.id,
            title: session.title.clone(),
            messages: session.display_messages(),
        }
    }
}

/// A single session with its raw exchange log.
#[derive(Debug, Clone, Serialize)]
pub struct SessionLog {
    pub id: i64,
    pub title: String,
    pub all_messages: Vec<Exchange>,
}

impl From<ChatSession> for SessionLog {
    fn from(session: ChatSession) -> Self {
        Self {
            id: session.id,
            title: session.title,
            all_messages: session.messages,
        }
    }
}
