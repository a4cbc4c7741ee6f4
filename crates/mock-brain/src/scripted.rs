//! Scripted brain implementation - replays a queue of canned outcomes.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use brain_core::{Brain, BrainError, Completion, CompletionRequest, Usage};
use tokio::sync::Mutex;

/// One canned outcome for a [`ScriptedBrain`] call.
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    /// Return this text with the given usage.
    Text { text: String, usage: Usage },
    /// Fail as if the provider could not be reached.
    Unreachable,
    /// Fail with a non-success response from the provider.
    ApiError(String),
    /// Succeed with an empty string.
    Blank,
}

impl ScriptedReply {
    /// A text reply with nominal usage.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            usage: Usage::new(100, 20),
        }
    }

    fn into_result(self, model: &str) -> Result<Completion, BrainError> {
        match self {
            ScriptedReply::Text { text, usage } => Ok(Completion::new(text, model, usage)),
            ScriptedReply::Unreachable => {
                Err(BrainError::Network("connection refused".to_string()))
            }
            ScriptedReply::ApiError(message) => Err(BrainError::ProcessingFailed(message)),
            ScriptedReply::Blank => Ok(Completion::new("", model, Usage::new(100, 0))),
        }
    }
}

/// A brain that returns queued outcomes in order, then falls back to a
/// fixed outcome once the queue is drained.
///
/// Every call is counted and the last request is kept, so tests can assert
/// whether (and with what prompt) the provider was invoked.
#[derive(Debug)]
pub struct ScriptedBrain {
    model: String,
    queue: Mutex<VecDeque<ScriptedReply>>,
    fallback: ScriptedReply,
    calls: AtomicUsize,
    last_request: Mutex<Option<CompletionRequest>>,
}

impl ScriptedBrain {
    /// Create a brain that answers every call with `fallback`.
    pub fn new(fallback: ScriptedReply) -> Self {
        Self {
            model: "scripted".to_string(),
            queue: Mutex::new(VecDeque::new()),
            fallback,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Create a brain that always replies with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self::new(ScriptedReply::text(text))
    }

    /// Create a brain whose provider is always unreachable.
    pub fn unreachable() -> Self {
        Self::new(ScriptedReply::Unreachable)
    }

    /// Create a brain that always returns a blank completion.
    pub fn blank() -> Self {
        Self::new(ScriptedReply::Blank)
    }

    /// Set the model name reported on completions.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Queue outcomes to be returned before the fallback.
    pub fn with_script(self, replies: impl IntoIterator<Item = ScriptedReply>) -> Self {
        let queue = replies.into_iter().collect();
        Self {
            queue: Mutex::new(queue),
            ..self
        }
    }

    /// Number of times `complete` has been called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The most recent request, if any.
    pub async fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request.lock().await.clone()
    }
}

#[async_trait]
impl Brain for ScriptedBrain {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, BrainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().await = Some(request);

        let reply = self
            .queue
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        reply.into_result(&self.model)
    }

    fn name(&self) -> &str {
        "ScriptedBrain"
    }
}
