//! Chat service orchestrating session lifecycle and the generate flow.
//!
//! ChatService coordinates the SessionRepository and the CompletionClient:
//! resolving or creating the caller's session, answering chart shortcuts
//! locally, calling upstream otherwise, and appending the resulting exchange.

use quill_types::chat::{ChatSession, Exchange, session_title};
use quill_types::error::{ChatError, RepositoryError, SessionError};
use tracing::{info, warn};

use crate::chat::repository::SessionRepository;
use crate::chat::shortcut::ChartShortcut;
use crate::llm::completion::CompletionClient;

/// Where the assistant text of a reply came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Shortcut(ChartShortcut),
    Completion,
}

/// Outcome of a successful generate call.
#[derive(Debug, Clone)]
pub struct Reply {
    pub session_id: i64,
    pub text: String,
    pub source: ReplySource,
}

/// Parameters of a generate call, already validated by the caller.
#[derive(Debug, Clone)]
pub struct GenerateRequest<'a> {
    pub session_id: Option<i64>,
    pub session_title: Option<&'a str>,
    pub input: &'a str,
}

/// Orchestrates chat sessions and the completion round trip.
///
/// Generic over `SessionRepository` so quill-core never depends on quill-infra.
pub struct ChatService<S: SessionRepository> {
    session_repo: S,
    completion: CompletionClient,
}

fn storage(e: RepositoryError) -> SessionError {
    match e {
        RepositoryError::NotFound => SessionError::NotFound,
        other => SessionError::Storage(other.to_string()),
    }
}

impl<S: SessionRepository> ChatService<S> {
    pub fn new(session_repo: S, completion: CompletionClient) -> Self {
        Self {
            session_repo,
            completion,
        }
    }

    // --- Session lifecycle ---

    /// Create an empty session; blank titles become "New Chat".
    pub async fn create_session(
        &self,
        user_id: i64,
        title: Option<&str>,
    ) -> Result<ChatSession, SessionError> {
        let title = session_title(title);
        let session = self
            .session_repo
            .create_session(user_id, &title)
            .await
            .map_err(storage)?;
        info!(session_id = session.id, user_id, "Session created");
        Ok(session)
    }

    /// Get one of the user's sessions.
    pub async fn get_session(
        &self,
        session_id: i64,
        user_id: i64,
    ) -> Result<ChatSession, SessionError> {
        self.session_repo
            .get_session(session_id, user_id)
            .await
            .map_err(storage)?
            .ok_or(SessionError::NotFound)
    }

    /// List the user's sessions in creation order.
    pub async fn list_sessions(&self, user_id: i64) -> Result<Vec<ChatSession>, SessionError> {
        self.session_repo.list_sessions(user_id).await.map_err(storage)
    }

    /// Append one exchange to an owned session.
    pub async fn append_exchange(
        &self,
        session_id: i64,
        user_id: i64,
        user_text: &str,
        assistant_text: &str,
    ) -> Result<ChatSession, SessionError> {
        let exchange = Exchange::new(user_text, assistant_text);
        self.session_repo
            .append_exchange(session_id, user_id, &exchange)
            .await
            .map_err(storage)
    }

    // --- Generate flow ---

    /// Produce a reply for `request.input` and record it in the session.
    ///
    /// An existing `session_id` is resolved (owner-scoped) before any upstream
    /// call. A new session is only created once a reply is in hand, so a
    /// failed completion leaves neither an exchange nor an empty session.
    pub async fn generate(
        &self,
        user_id: i64,
        request: GenerateRequest<'_>,
    ) -> Result<Reply, ChatError> {
        let existing = match request.session_id {
            Some(id) => Some(self.get_session(id, user_id).await?),
            None => None,
        };

        let (text, source) = match ChartShortcut::from_input(request.input) {
            Some(shortcut) => (shortcut.reply().to_string(), ReplySource::Shortcut(shortcut)),
            None => {
                let text = self.completion.complete(request.input).await.inspect_err(|e| {
                    warn!(user_id, session_id = ?request.session_id, error = %e, "Generate failed upstream");
                })?;
                (text, ReplySource::Completion)
            }
        };

        let session = match existing {
            Some(session) => session,
            None => self.create_session(user_id, request.session_title).await?,
        };

        let updated = self
            .append_exchange(session.id, user_id, request.input, &text)
            .await?;

        info!(
            session_id = updated.id,
            user_id,
            exchanges = updated.messages.len(),
            shortcut = matches!(source, ReplySource::Shortcut(_)),
            "Exchange appended"
        );

        Ok(Reply {
            session_id: updated.id,
            text,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    use chrono::Utc;
    use quill_types::error::CompletionError;
    use quill_types::llm::{CompletionRequest, CompletionResponse, LlmError, Usage};

    use crate::llm::box_provider::BoxLlmProvider;
    use crate::llm::provider::LlmProvider;

    #[derive(Default)]
    struct MemorySessions {
        sessions: Mutex<Vec<ChatSession>>,
    }

    impl SessionRepository for MemorySessions {
        async fn create_session(
            &self,
            user_id: i64,
            title: &str,
        ) -> Result<ChatSession, RepositoryError> {
            let mut sessions = self.sessions.lock().unwrap();
            let session = ChatSession {
                id: sessions.len() as i64 + 1,
                user_id,
                title: title.to_string(),
                messages: Vec::new(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            };
            sessions.push(session.clone());
            Ok(session)
        }

        async fn get_session(
            &self,
            session_id: i64,
            user_id: i64,
        ) -> Result<Option<ChatSession>, RepositoryError> {
            Ok(self
                .sessions
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.id == session_id && s.user_id == user_id)
                .cloned())
        }

        async fn list_sessions(&self, user_id: i64) -> Result<Vec<ChatSession>, RepositoryError> {
            Ok(self
                .sessions
                .lock()
                .unwrap()
                .iter()
                .filter(|s| s.user_id == user_id)
                .cloned()
                .collect())
        }

        async fn append_exchange(
            &self,
            session_id: i64,
            user_id: i64,
            exchange: &Exchange,
        ) -> Result<ChatSession, RepositoryError> {
            let mut sessions = self.sessions.lock().unwrap();
            let session = sessions
                .iter_mut()
                .find(|s| s.id == session_id && s.user_id == user_id)
                .ok_or(RepositoryError::NotFound)?;
            session.messages.push(exchange.clone());
            session.updated_at = Utc::now();
            Ok(session.clone())
        }
    }

    struct FixedProvider(Option<&'static str>);

    impl LlmProvider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            match self.0 {
                Some(text) => Ok(CompletionResponse {
                    id: "cmpl".to_string(),
                    content: Some(text.to_string()),
                    model: request.model.clone(),
                    usage: Usage::default(),
                }),
                None => Err(LlmError::AuthenticationFailed),
            }
        }
    }

    fn service(reply: Option<&'static str>) -> ChatService<MemorySessions> {
        let completion = CompletionClient::new(
            BoxLlmProvider::new(FixedProvider(reply)),
            "gpt-4o-mini",
            Duration::from_secs(5),
        );
        ChatService::new(MemorySessions::default(), completion)
    }

    fn request(session_id: Option<i64>, input: &str) -> GenerateRequest<'_> {
        GenerateRequest {
            session_id,
            session_title: None,
            input,
        }
    }

    #[tokio::test]
    async fn test_create_session_default_title() {
        let svc = service(None);
        let session = svc.create_session(1, None).await.unwrap();
        assert_eq!(session.title, "New Chat");
        assert!(session.messages.is_empty());

        let titled = svc.create_session(1, Some("Trip")).await.unwrap();
        assert_eq!(titled.title, "Trip");
    }

    #[tokio::test]
    async fn test_get_session_is_owner_scoped() {
        let svc = service(None);
        let session = svc.create_session(1, None).await.unwrap();
        assert!(svc.get_session(session.id, 1).await.is_ok());
        assert!(matches!(
            svc.get_session(session.id, 2).await,
            Err(SessionError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_generate_new_session_with_completion() {
        let svc = service(Some("The cat sat."));
        let reply = svc.generate(1, request(None, "cat")).await.unwrap();
        assert_eq!(reply.text, "The cat sat.");
        assert_eq!(reply.source, ReplySource::Completion);

        let session = svc.get_session(reply.session_id, 1).await.unwrap();
        assert_eq!(session.messages.len(), 1);
        assert_eq!(session.messages[0].user_text, "cat");
        assert_eq!(session.messages[0].assistant_text, "The cat sat.");
    }

    #[tokio::test]
    async fn test_generate_shortcut_skips_upstream() {
        // Provider always fails; shortcuts must still succeed.
        let svc = service(None);
        let reply = svc.generate(1, request(None, "Graph")).await.unwrap();
        assert_eq!(reply.text, "#");
        assert_eq!(reply.source, ReplySource::Shortcut(ChartShortcut::Graph));

        let session = svc.get_session(reply.session_id, 1).await.unwrap();
        assert_eq!(session.messages[0].assistant_text, "#");
    }

    #[tokio::test]
    async fn test_generate_continues_existing_session() {
        let svc = service(Some("ok"));
        let first = svc.generate(1, request(None, "BarPlot")).await.unwrap();
        let second = svc
            .generate(1, request(Some(first.session_id), "PiePlot"))
            .await
            .unwrap();
        assert_eq!(first.session_id, second.session_id);

        let sessions = svc.list_sessions(1).await.unwrap();
        assert_eq!(sessions.len(), 1);
        let texts: Vec<&str> = sessions[0]
            .messages
            .iter()
            .map(|e| e.assistant_text.as_str())
            .collect();
        assert_eq!(texts, vec!["#1", "#2"]);
    }

    #[tokio::test]
    async fn test_generate_without_session_id_creates_new_each_time() {
        let svc = service(Some("ok"));
        svc.generate(1, request(None, "LinePlot")).await.unwrap();
        svc.generate(1, request(None, "ScatterPlot")).await.unwrap();
        assert_eq!(svc.list_sessions(1).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_generate_upstream_failure_persists_nothing() {
        let svc = service(None);
        let existing = svc.generate(1, request(None, "Graph")).await.unwrap();

        let err = svc
            .generate(1, request(Some(existing.session_id), "sun"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ChatError::Completion(CompletionError::UpstreamFailure(_))
        ));
        let session = svc.get_session(existing.session_id, 1).await.unwrap();
        assert_eq!(session.messages.len(), 1);

        // A fresh request that fails upstream leaves no empty session behind.
        assert!(svc.generate(1, request(None, "moon")).await.is_err());
        assert_eq!(svc.list_sessions(1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_generate_foreign_session_not_found() {
        let svc = service(Some("ok"));
        let owned = svc.generate(1, request(None, "Graph")).await.unwrap();
        let err = svc
            .generate(2, request(Some(owned.session_id), "Graph"))
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::Session(SessionError::NotFound)));

        let session = svc.get_session(owned.session_id, 1).await.unwrap();
        assert_eq!(session.messages.len(), 1);
    }
}
