//! The assistant bridge: conversation state and the two submission paths.
//!
//! Each path (free-form chat, routine generation) is an independent
//! `Idle → Pending → Idle` machine; a submission while its path is pending is
//! refused with `Busy` instead of racing a second completion call. History is
//! appended only after a successful exchange, so a failed call leaves it
//! untouched and a retry starts clean.

pub mod prompts;

use std::sync::{Arc, Mutex};

use ritu_core::catalog::Product;
use ritu_core::config::AppConfig;
use ritu_core::conversation::ConversationHistory;
use ritu_core::error::{Result, RituError};
use ritu_core::locale::Locale;
use ritu_interaction::{CompletionBackend, CompletionRequest, WireMessage};

/// Outcome of a chat submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    /// The message was empty after trimming; nothing was sent.
    Ignored,
    /// The assistant's reply.
    Reply(String),
}

/// Bridges the selection state and conversation history to the completion
/// endpoint.
pub struct AssistantBridge {
    backend: Arc<dyn CompletionBackend>,
    history: Mutex<ConversationHistory>,
    // One gate per submission path; holding the guard across the network
    // call is what serializes the path.
    chat_gate: tokio::sync::Mutex<()>,
    routine_gate: tokio::sync::Mutex<()>,
    model: String,
    temperature: f32,
    chat_max_tokens: u32,
    routine_max_tokens: u32,
}

impl AssistantBridge {
    pub fn new(backend: Arc<dyn CompletionBackend>, config: &AppConfig) -> Self {
        Self {
            backend,
            history: Mutex::new(ConversationHistory::with_limit(config.history_limit)),
            chat_gate: tokio::sync::Mutex::new(()),
            routine_gate: tokio::sync::Mutex::new(()),
            model: config.model.clone(),
            temperature: config.temperature,
            chat_max_tokens: config.chat_max_tokens,
            routine_max_tokens: config.routine_max_tokens,
        }
    }

    /// Submits a free-form chat message.
    ///
    /// The prompt is the bounded history plus the new message, prefixed with
    /// a rendering of the current selection when one exists. On success both
    /// sides of the exchange are appended to history and the window is
    /// trimmed; on failure the history is left unmodified and
    /// `AssistantUnavailable` is returned.
    pub async fn submit_chat(
        &self,
        message: &str,
        selection: &[Product],
        locale: Locale,
    ) -> Result<ChatOutcome> {
        let trimmed = message.trim();
        if trimmed.is_empty() {
            return Ok(ChatOutcome::Ignored);
        }

        let _pending = self
            .chat_gate
            .try_lock()
            .map_err(|_| RituError::busy("chat"))?;

        let prompt = if selection.is_empty() {
            trimmed.to_string()
        } else {
            prompts::chat_prompt_with_selection(selection, trimmed)
        };

        let request = self.build_request(locale, prompt, self.chat_max_tokens);
        let reply = self.call(request).await?;

        {
            let mut history = self.history.lock().expect("history lock poisoned");
            history.push_user(trimmed);
            history.push_assistant(reply.clone());
            history.trim_to_limit();
        }

        Ok(ChatOutcome::Reply(reply))
    }

    /// Requests a personalized routine for the current selection.
    ///
    /// Refused with `EmptySelection` before any network call when nothing is
    /// selected. Issued with the larger routine token allowance; on success a
    /// synthetic user-intent record and the reply are appended to history.
    pub async fn submit_routine(&self, selection: &[Product], locale: Locale) -> Result<String> {
        if selection.is_empty() {
            return Err(RituError::EmptySelection);
        }

        let _pending = self
            .routine_gate
            .try_lock()
            .map_err(|_| RituError::busy("routine"))?;

        let prompt = prompts::routine_prompt(selection, locale);
        let request = self.build_request(locale, prompt, self.routine_max_tokens);
        let reply = self.call(request).await?;

        {
            let mut history = self.history.lock().expect("history lock poisoned");
            history.push_user(prompts::routine_user_intent(selection));
            history.push_assistant(reply.clone());
            history.trim_to_limit();
        }

        Ok(reply)
    }

    /// Current history length (both roles counted).
    pub fn history_len(&self) -> usize {
        self.history.lock().expect("history lock poisoned").len()
    }

    /// Snapshot of the history for display.
    pub fn history_snapshot(&self) -> ConversationHistory {
        self.history.lock().expect("history lock poisoned").clone()
    }

    fn build_request(&self, locale: Locale, prompt: String, max_tokens: u32) -> CompletionRequest {
        let mut messages = vec![WireMessage::system(prompts::system_prompt(locale))];
        {
            let history = self.history.lock().expect("history lock poisoned");
            messages.extend(history.messages().iter().map(WireMessage::from));
        }
        messages.push(WireMessage::user(prompt));

        CompletionRequest {
            model: self.model.clone(),
            messages,
            temperature: self.temperature,
            max_tokens: Some(max_tokens),
        }
    }

    async fn call(&self, request: CompletionRequest) -> Result<String> {
        self.backend.complete(request).await.map_err(|e| {
            tracing::warn!(error = %e, "completion call failed");
            RituError::assistant_unavailable(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use ritu_interaction::CompletionError;

    /// Scripted backend: pops one canned result per call and records the
    /// requests it saw.
    struct ScriptedBackend {
        replies: Mutex<VecDeque<std::result::Result<String, String>>>,
        requests: Mutex<Vec<CompletionRequest>>,
        calls: AtomicUsize,
        hold: Option<Arc<tokio::sync::Notify>>,
    }

    impl ScriptedBackend {
        fn new(replies: Vec<std::result::Result<String, String>>) -> Self {
            Self {
                replies: Mutex::new(replies.into_iter().collect()),
                requests: Mutex::new(Vec::new()),
                calls: AtomicUsize::new(0),
                hold: None,
            }
        }

        fn holding(mut self, notify: Arc<tokio::sync::Notify>) -> Self {
            self.hold = Some(notify);
            self
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn last_request(&self) -> CompletionRequest {
            self.requests.lock().unwrap().last().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionBackend for ScriptedBackend {
        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> std::result::Result<String, CompletionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(request);
            if let Some(notify) = &self.hold {
                notify.notified().await;
            }
            let scripted = self.replies.lock().unwrap().pop_front();
            match scripted {
                Some(Ok(reply)) => Ok(reply),
                Some(Err(message)) => Err(CompletionError::Process {
                    status_code: Some(503),
                    message,
                    is_retryable: true,
                    retry_after: None,
                }),
                None => Err(CompletionError::EmptyResponse),
            }
        }
    }

    fn products() -> Vec<Product> {
        vec![Product {
            id: 1,
            name: "Glow Serum".to_string(),
            brand: "Lumina".to_string(),
            category: "skincare".to_string(),
            description: "Brightening serum".to_string(),
            image: "img".to_string(),
        }]
    }

    fn bridge(backend: ScriptedBackend) -> (AssistantBridge, Arc<ScriptedBackend>) {
        let backend = Arc::new(backend);
        let bridge = AssistantBridge::new(backend.clone(), &AppConfig::default());
        (bridge, backend)
    }

    #[tokio::test]
    async fn test_empty_message_is_ignored_without_a_call() {
        let (bridge, backend) = bridge(ScriptedBackend::new(vec![]));
        let outcome = bridge.submit_chat("   ", &[], Locale::En).await.unwrap();
        assert_eq!(outcome, ChatOutcome::Ignored);
        assert_eq!(backend.call_count(), 0);
        assert_eq!(bridge.history_len(), 0);
    }

    #[tokio::test]
    async fn test_chat_appends_exchange_on_success() {
        let (bridge, backend) = bridge(ScriptedBackend::new(vec![Ok("hi!".to_string())]));
        let outcome = bridge.submit_chat("hello", &[], Locale::En).await.unwrap();
        assert_eq!(outcome, ChatOutcome::Reply("hi!".to_string()));
        assert_eq!(bridge.history_len(), 2);

        // The raw message is what lands in history, not the contextual prompt.
        let history = bridge.history_snapshot();
        assert_eq!(history.messages()[0].content, "hello");

        let request = backend.last_request();
        assert_eq!(request.max_tokens, Some(600));
        assert_eq!(request.messages.first().unwrap().role, "system");
    }

    #[tokio::test]
    async fn test_chat_prefixes_selection_context() {
        let (bridge, backend) = bridge(ScriptedBackend::new(vec![Ok("sure".to_string())]));
        bridge
            .submit_chat("what order?", &products(), Locale::En)
            .await
            .unwrap();

        let request = backend.last_request();
        let user_message = &request.messages.last().unwrap().content;
        assert!(user_message.starts_with("User's selected products:"));
        assert!(user_message.contains("Glow Serum"));
    }

    #[tokio::test]
    async fn test_failed_call_leaves_history_unchanged() {
        let (bridge, _) = bridge(ScriptedBackend::new(vec![
            Ok("first".to_string()),
            Err("gateway down".to_string()),
        ]));
        bridge.submit_chat("one", &[], Locale::En).await.unwrap();
        let before = bridge.history_len();

        let err = bridge.submit_chat("two", &[], Locale::En).await.unwrap_err();
        assert!(err.is_assistant_unavailable());
        assert_eq!(bridge.history_len(), before);
    }

    #[tokio::test]
    async fn test_routine_with_empty_selection_makes_no_call() {
        let (bridge, backend) = bridge(ScriptedBackend::new(vec![]));
        let err = bridge.submit_routine(&[], Locale::En).await.unwrap_err();
        assert!(err.is_empty_selection());
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_routine_success_appends_intent_and_reply() {
        let (bridge, backend) = bridge(ScriptedBackend::new(vec![Ok("1. Cleanse...".to_string())]));
        let reply = bridge.submit_routine(&products(), Locale::En).await.unwrap();
        assert_eq!(reply, "1. Cleanse...");

        let history = bridge.history_snapshot();
        assert_eq!(history.len(), 2);
        assert_eq!(
            history.messages()[0].content,
            "Generate routine for: Glow Serum"
        );

        let request = backend.last_request();
        assert_eq!(request.max_tokens, Some(2000));
    }

    #[tokio::test]
    async fn test_history_never_exceeds_cap() {
        let replies = (0..30).map(|i| Ok(format!("reply {i}"))).collect();
        let (bridge, _) = bridge(ScriptedBackend::new(replies));
        for i in 0..30 {
            bridge
                .submit_chat(&format!("message {i}"), &[], Locale::En)
                .await
                .unwrap();
            assert!(bridge.history_len() <= 20);
        }
        // Oldest dropped, newest kept.
        let history = bridge.history_snapshot();
        assert_eq!(history.messages().last().unwrap().content, "reply 29");
    }

    #[tokio::test]
    async fn test_second_chat_submission_while_pending_is_busy() {
        let release = Arc::new(tokio::sync::Notify::new());
        let backend = Arc::new(
            ScriptedBackend::new(vec![Ok("slow reply".to_string())]).holding(release.clone()),
        );
        let bridge = Arc::new(AssistantBridge::new(backend, &AppConfig::default()));

        let first = {
            let bridge = bridge.clone();
            tokio::spawn(async move { bridge.submit_chat("first", &[], Locale::En).await })
        };

        // Let the first submission reach the backend and park there.
        tokio::task::yield_now().await;

        let err = bridge
            .submit_chat("second", &[], Locale::En)
            .await
            .unwrap_err();
        assert!(err.is_busy());

        release.notify_one();
        let outcome = first.await.unwrap().unwrap();
        assert_eq!(outcome, ChatOutcome::Reply("slow reply".to_string()));
    }

    #[tokio::test]
    async fn test_paths_are_independently_serialized() {
        let release = Arc::new(tokio::sync::Notify::new());
        let backend = Arc::new(
            ScriptedBackend::new(vec![
                Ok("routine".to_string()),
                Ok("chat reply".to_string()),
            ])
            .holding(release.clone()),
        );
        let bridge = Arc::new(AssistantBridge::new(backend, &AppConfig::default()));

        let routine = {
            let bridge = bridge.clone();
            let selection = products();
            tokio::spawn(async move { bridge.submit_routine(&selection, Locale::En).await })
        };
        tokio::task::yield_now().await;

        // A pending routine must not block the chat path.
        let chat = {
            let bridge = bridge.clone();
            tokio::spawn(async move { bridge.submit_chat("hi", &[], Locale::En).await })
        };
        tokio::task::yield_now().await;

        release.notify_one();
        release.notify_one();
        routine.await.unwrap().unwrap();
        chat.await.unwrap().unwrap();
    }
}
