//! The application controller.
//!
//! One explicit state object constructed at startup and shared by reference:
//! it owns the catalog, the selection set, the filter, the preferences, and
//! the assistant bridge, and it wires every mutation to a synchronous
//! persist-and-re-render pass. The rendering surface and notification sink
//! are injected traits, so none of this requires a terminal to test.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver};

use ritu_core::catalog::{Catalog, CatalogFilter};
use ritu_core::config::AppConfig;
use ritu_core::error::{Result, RituError};
use ritu_core::locale::{Locale, fill};
use ritu_core::repository::{PreferencesRepository, SelectionRepository};
use ritu_core::selection::{SelectionEvent, SelectionSet};
use ritu_interaction::CompletionBackend;

use crate::assistant::{AssistantBridge, ChatOutcome};
use crate::debounce::Debouncer;
use crate::projector::{self, CatalogView, PanelView};
use crate::surface::{NotificationSink, NoticeSeverity, Renderer};

/// Owns all mutable application state for one session.
pub struct RoutineController {
    catalog: Catalog,
    selection: Mutex<SelectionSet>,
    events: Mutex<UnboundedReceiver<SelectionEvent>>,
    filter: Mutex<CatalogFilter>,
    locale: Mutex<Locale>,
    live_search: AtomicBool,
    bridge: AssistantBridge,
    selection_repo: Arc<dyn SelectionRepository>,
    preferences: Arc<dyn PreferencesRepository>,
    renderer: Arc<dyn Renderer>,
    sink: Arc<dyn NotificationSink>,
    debouncer: Debouncer,
}

impl RoutineController {
    pub fn new(
        catalog: Catalog,
        backend: Arc<dyn CompletionBackend>,
        selection_repo: Arc<dyn SelectionRepository>,
        preferences: Arc<dyn PreferencesRepository>,
        renderer: Arc<dyn Renderer>,
        sink: Arc<dyn NotificationSink>,
        config: &AppConfig,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let mut selection = SelectionSet::new();
        selection.set_event_sender(events_tx);

        Self {
            catalog,
            selection: Mutex::new(selection),
            events: Mutex::new(events_rx),
            filter: Mutex::new(CatalogFilter::default()),
            locale: Mutex::new(Locale::default()),
            live_search: AtomicBool::new(false),
            bridge: AssistantBridge::new(backend, config),
            selection_repo,
            preferences,
            renderer,
            sink,
            debouncer: Debouncer::new(Duration::from_millis(config.search_debounce_ms)),
        }
    }

    /// Startup sequence: restore preferences, reconcile the persisted
    /// selection against the live catalog, render, and greet.
    pub async fn initialize(&self) {
        if let Some(locale) = self.preferences.locale().await {
            *self.locale.lock().expect("locale lock poisoned") = locale;
        }
        self.live_search
            .store(self.preferences.live_search().await, Ordering::SeqCst);

        let persisted = self.selection_repo.load().await;
        let dropped = self
            .selection
            .lock()
            .expect("selection lock poisoned")
            .restore(&self.catalog, persisted);
        if dropped > 0 {
            tracing::debug!(dropped, "dropped persisted selections missing from catalog");
        }

        self.render_panel();
        self.render_catalog();
        self.sink.notify(
            NoticeSeverity::Info,
            self.locale().translations().welcome.to_string(),
        );
    }

    pub fn locale(&self) -> Locale {
        *self.locale.lock().expect("locale lock poisoned")
    }

    pub fn live_search_enabled(&self) -> bool {
        self.live_search.load(Ordering::SeqCst)
    }

    /// Category vocabulary for the selector, drawn from the catalog.
    pub fn categories(&self) -> Vec<String> {
        self.catalog
            .categories()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn history_len(&self) -> usize {
        self.bridge.history_len()
    }

    // ===== Selection =====

    /// Toggles a product in or out of the selection.
    ///
    /// Unknown ids are silently ignored per the error-handling policy.
    pub async fn toggle(&self, id: u32) {
        let outcome = self
            .selection
            .lock()
            .expect("selection lock poisoned")
            .toggle(&self.catalog, id);

        match outcome {
            Ok(_) => self.after_selection_change().await,
            Err(e) if e.is_unknown_product() => {
                tracing::debug!(id, "toggle ignored: unknown product");
            }
            Err(e) => tracing::warn!(error = %e, "toggle failed"),
        }
    }

    /// Empties the selection.
    pub async fn clear(&self) {
        self.selection
            .lock()
            .expect("selection lock poisoned")
            .clear();
        self.after_selection_change().await;
    }

    /// Persist + notify + re-render, synchronously after every mutation.
    async fn after_selection_change(&self) {
        self.persist_selection().await;
        self.dispatch_events();
        self.render_panel();
        self.render_catalog();
    }

    async fn persist_selection(&self) {
        let products = {
            self.selection
                .lock()
                .expect("selection lock poisoned")
                .products()
                .to_vec()
        };
        if let Err(e) = self.selection_repo.save(&products).await {
            // Best-effort: degrade to a log line, never to the user.
            tracing::warn!(error = %e, "selection save failed");
        }
    }

    /// Turns buffered selection events into localized notices.
    fn dispatch_events(&self) {
        let t = self.locale().translations();
        let mut events = self.events.lock().expect("events lock poisoned");
        while let Ok(event) = events.try_recv() {
            let text = match &event {
                SelectionEvent::Added { product } => fill(t.added_product, "product", &product.name),
                SelectionEvent::Removed { product } => {
                    fill(t.removed_product, "product", &product.name)
                }
                SelectionEvent::Cleared => t.cleared_all.to_string(),
            };
            self.sink.notify(NoticeSeverity::Info, text);
        }
    }

    // ===== Browsing =====

    /// Sets the category criterion and re-renders the grid.
    pub fn set_category(&self, category: Option<String>) {
        self.filter.lock().expect("filter lock poisoned").category = category;
        self.render_catalog();
    }

    /// Handles a search-input change through the debouncer. Rapid calls
    /// collapse to a single filter pass after the quiescence window.
    pub async fn search_input(&self, term: &str) {
        let Some(term) = self.debouncer.debounce(term.to_string()).await else {
            return;
        };

        let t = self.locale().translations();
        let term = term.trim().to_string();
        let announcing = self.live_search_enabled() && !term.is_empty();
        if announcing {
            self.sink.notify(
                NoticeSeverity::Info,
                format!("🔍 {}", fill(t.searching_live, "query", &term)),
            );
        }

        self.filter.lock().expect("filter lock poisoned").search =
            if term.is_empty() { None } else { Some(term) };
        self.render_catalog();

        if announcing {
            self.sink
                .notify(NoticeSeverity::Info, format!("✅ {}", t.search_complete));
        }
    }

    /// Opens the detail view. Unknown ids are silently ignored.
    pub fn show_detail(&self, id: u32) {
        let selection = self.selection.lock().expect("selection lock poisoned");
        match projector::project_product_detail(&self.catalog, &selection, id, self.locale()) {
            Ok(view) => self.renderer.render_detail(&view),
            Err(_) => tracing::debug!(id, "detail ignored: unknown product"),
        }
    }

    // ===== Preferences =====

    /// Switches the active locale. Returns `None` for an unknown code.
    pub async fn set_locale(&self, code: &str) -> Option<Locale> {
        let locale = Locale::from_code(code)?;
        *self.locale.lock().expect("locale lock poisoned") = locale;
        if let Err(e) = self.preferences.set_locale(locale).await {
            tracing::warn!(error = %e, "locale save failed");
        }
        self.render_panel();
        self.render_catalog();
        Some(locale)
    }

    /// Flips the live-search flag and announces the new state.
    pub async fn toggle_live_search(&self) -> bool {
        let enabled = !self.live_search.fetch_xor(true, Ordering::SeqCst);
        if let Err(e) = self.preferences.set_live_search(enabled).await {
            tracing::warn!(error = %e, "live-search flag save failed");
        }

        let t = self.locale().translations();
        let text = if enabled {
            format!("🌐 {}", t.live_search_enabled)
        } else {
            format!("📱 {}", t.live_search_disabled)
        };
        self.sink.notify(NoticeSeverity::Info, text);
        enabled
    }

    // ===== Assistant =====

    /// Forwards a chat message to the assistant.
    pub async fn chat(&self, message: &str) -> Result<ChatOutcome> {
        let selection = {
            self.selection
                .lock()
                .expect("selection lock poisoned")
                .products()
                .to_vec()
        };

        match self.bridge.submit_chat(message, &selection, self.locale()).await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                self.notify_assistant_error(&e, self.locale().translations().error_chat);
                Err(e)
            }
        }
    }

    /// Requests a personalized routine for the current selection.
    pub async fn generate_routine(&self) -> Result<String> {
        let selection = {
            self.selection
                .lock()
                .expect("selection lock poisoned")
                .products()
                .to_vec()
        };

        match self.bridge.submit_routine(&selection, self.locale()).await {
            Ok(reply) => Ok(reply),
            Err(e) if e.is_empty_selection() => {
                let t = self.locale().translations();
                self.sink
                    .notify(NoticeSeverity::Warning, format!("⚠️ {}", t.select_at_least_one));
                Err(e)
            }
            Err(e) => {
                self.notify_assistant_error(&e, self.locale().translations().error_generating);
                Err(e)
            }
        }
    }

    fn notify_assistant_error(&self, error: &RituError, localized: &str) {
        if error.is_busy() {
            self.sink
                .notify(NoticeSeverity::Warning, error.to_string());
        } else {
            self.sink
                .notify(NoticeSeverity::Error, format!("❌ {localized}"));
        }
    }

    // ===== Projection =====

    pub fn catalog_view(&self) -> CatalogView {
        let selection = self.selection.lock().expect("selection lock poisoned");
        let filter = self.filter.lock().expect("filter lock poisoned");
        projector::project_catalog(&self.catalog, &selection, &filter, self.locale())
    }

    pub fn panel_view(&self) -> PanelView {
        let selection = self.selection.lock().expect("selection lock poisoned");
        projector::project_selection_panel(&selection, self.locale())
    }

    fn render_catalog(&self) {
        self.renderer.render_catalog(&self.catalog_view());
    }

    fn render_panel(&self) {
        self.renderer.render_panel(&self.panel_view());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    use async_trait::async_trait;
    use tempfile::TempDir;

    use ritu_core::catalog::Product;
    use ritu_infrastructure::storage::SlotStorage;
    use ritu_infrastructure::{JsonPreferencesRepository, JsonSelectionRepository};
    use ritu_interaction::{CompletionError, CompletionRequest};

    struct ScriptedBackend {
        replies: Mutex<VecDeque<std::result::Result<String, String>>>,
    }

    impl ScriptedBackend {
        fn new(replies: Vec<std::result::Result<String, String>>) -> Self {
            Self {
                replies: Mutex::new(replies.into_iter().collect()),
            }
        }
    }

    #[async_trait]
    impl CompletionBackend for ScriptedBackend {
        async fn complete(
            &self,
            _request: CompletionRequest,
        ) -> std::result::Result<String, CompletionError> {
            match self.replies.lock().unwrap().pop_front() {
                Some(Ok(reply)) => Ok(reply),
                _ => Err(CompletionError::Process {
                    status_code: Some(500),
                    message: "scripted failure".to_string(),
                    is_retryable: true,
                    retry_after: None,
                }),
            }
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        notices: Mutex<Vec<(NoticeSeverity, String)>>,
    }

    impl RecordingSink {
        fn texts(&self) -> Vec<String> {
            self.notices
                .lock()
                .unwrap()
                .iter()
                .map(|(_, text)| text.clone())
                .collect()
        }
    }

    impl NotificationSink for RecordingSink {
        fn notify(&self, severity: NoticeSeverity, text: String) {
            self.notices.lock().unwrap().push((severity, text));
        }
    }

    #[derive(Default)]
    struct NullRenderer;

    impl Renderer for NullRenderer {
        fn render_catalog(&self, _view: &CatalogView) {}
        fn render_panel(&self, _view: &PanelView) {}
        fn render_detail(&self, _view: &crate::projector::DetailView) {}
    }

    fn product(id: u32, name: &str, category: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            brand: "Brand".to_string(),
            category: category.to_string(),
            description: "desc".to_string(),
            image: "img".to_string(),
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            product(1, "Glow Serum", "skincare"),
            product(2, "Matte Lip", "makeup"),
        ])
    }

    struct Harness {
        controller: Arc<RoutineController>,
        sink: Arc<RecordingSink>,
        _dir: Option<TempDir>,
    }

    fn harness_at(
        catalog: Catalog,
        replies: Vec<std::result::Result<String, String>>,
        slots: &std::path::Path,
    ) -> Harness {
        let sink = Arc::new(RecordingSink::default());
        let controller = Arc::new(RoutineController::new(
            catalog,
            Arc::new(ScriptedBackend::new(replies)),
            Arc::new(JsonSelectionRepository::new(SlotStorage::new(
                slots.to_path_buf(),
            ))),
            Arc::new(JsonPreferencesRepository::new(SlotStorage::new(
                slots.to_path_buf(),
            ))),
            Arc::new(NullRenderer),
            sink.clone(),
            &AppConfig::default(),
        ));
        Harness {
            controller,
            sink,
            _dir: None,
        }
    }

    fn harness(replies: Vec<std::result::Result<String, String>>) -> Harness {
        let dir = TempDir::new().unwrap();
        let mut h = harness_at(catalog(), replies, &dir.path().join("slots"));
        h._dir = Some(dir);
        h
    }

    #[tokio::test]
    async fn test_initialize_emits_welcome() {
        let h = harness(vec![]);
        h.controller.initialize().await;
        assert!(h.sink.texts().iter().any(|t| t.contains("Welcome")));
    }

    #[tokio::test]
    async fn test_toggle_notifies_and_persists_round_trip() {
        let dir = TempDir::new().unwrap();
        let slots = dir.path().join("slots");

        let h = harness_at(catalog(), vec![], &slots);
        h.controller.initialize().await;
        h.controller.toggle(2).await;
        h.controller.toggle(1).await;
        assert!(h.sink.texts().iter().any(|t| t.contains("Matte Lip")));

        // Same storage, fresh session: order survives.
        let h2 = harness_at(catalog(), vec![], &slots);
        h2.controller.initialize().await;
        let ids: Vec<u32> = h2
            .controller
            .panel_view()
            .rows
            .iter()
            .map(|r| r.product.id)
            .collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn test_unknown_toggle_is_silent() {
        let h = harness(vec![]);
        h.controller.initialize().await;
        let before = h.sink.texts().len();
        h.controller.toggle(99).await;
        assert_eq!(h.sink.texts().len(), before);
    }

    #[tokio::test]
    async fn test_stale_persisted_ids_dropped_on_startup() {
        let dir = TempDir::new().unwrap();
        let slots = dir.path().join("slots");
        let repo = JsonSelectionRepository::new(SlotStorage::new(slots.clone()));
        repo.save(&[product(2, "Matte Lip", "makeup"), product(99, "Gone", "x")])
            .await
            .unwrap();

        let h = harness_at(catalog(), vec![], &slots);
        h.controller.initialize().await;
        let panel = h.controller.panel_view();
        let ids: Vec<u32> = panel.rows.iter().map(|r| r.product.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[tokio::test]
    async fn test_clear_notice_is_localized() {
        let h = harness(vec![]);
        h.controller.initialize().await;
        h.controller.set_locale("es").await.unwrap();
        h.controller.toggle(1).await;
        h.controller.clear().await;
        assert!(h
            .sink
            .texts()
            .iter()
            .any(|t| t == "Limpiados todos los productos de tu rutina"));
    }

    #[tokio::test]
    async fn test_routine_with_empty_selection_warns() {
        let h = harness(vec![Ok("should not be used".to_string())]);
        h.controller.initialize().await;
        let err = h.controller.generate_routine().await.unwrap_err();
        assert!(err.is_empty_selection());
        assert!(h
            .sink
            .texts()
            .iter()
            .any(|t| t.contains("Please select at least one product")));
        assert_eq!(h.controller.history_len(), 0);
    }

    #[tokio::test]
    async fn test_chat_failure_notifies_and_keeps_history() {
        let h = harness(vec![Err("down".to_string())]);
        h.controller.initialize().await;
        let err = h.controller.chat("hello?").await.unwrap_err();
        assert!(err.is_assistant_unavailable());
        assert!(h.sink.texts().iter().any(|t| t.contains("I encountered an error")));
        assert_eq!(h.controller.history_len(), 0);
    }

    #[tokio::test]
    async fn test_chat_success_returns_reply() {
        let h = harness(vec![Ok("use it nightly".to_string())]);
        h.controller.initialize().await;
        let outcome = h.controller.chat("when to apply?").await.unwrap();
        assert_eq!(outcome, ChatOutcome::Reply("use it nightly".to_string()));
        assert_eq!(h.controller.history_len(), 2);
    }

    #[tokio::test]
    async fn test_category_filter_projection() {
        let h = harness(vec![]);
        h.controller.initialize().await;
        h.controller.set_category(Some("makeup".to_string()));
        let view = h.controller.catalog_view();
        assert_eq!(view.cards.len(), 1);
        assert_eq!(view.cards[0].product.id, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_input_is_debounced() {
        let h = harness(vec![]);
        h.controller.initialize().await;

        let stale = {
            let controller = h.controller.clone();
            tokio::spawn(async move { controller.search_input("gl").await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        h.controller.search_input("glow").await;
        stale.await.unwrap();

        let view = h.controller.catalog_view();
        assert_eq!(view.cards.len(), 1);
        assert_eq!(view.cards[0].product.name, "Glow Serum");
    }

    #[tokio::test]
    async fn test_live_search_toggle_announces_and_persists() {
        let h = harness(vec![]);
        h.controller.initialize().await;
        assert!(h.controller.toggle_live_search().await);
        assert!(h.sink.texts().iter().any(|t| t.contains("Real-time product updates enabled")));
        assert!(!h.controller.toggle_live_search().await);
        assert!(h.sink.texts().iter().any(|t| t.contains("Using local product database")));
    }

    #[tokio::test]
    async fn test_locale_preference_survives_restart() {
        let dir = TempDir::new().unwrap();
        let slots = dir.path().join("slots");

        let h = harness_at(catalog(), vec![], &slots);
        h.controller.initialize().await;
        h.controller.set_locale("fr").await.unwrap();
        drop(h);

        let prefs = JsonPreferencesRepository::new(SlotStorage::new(slots));
        assert_eq!(prefs.locale().await, Some(Locale::Fr));
    }
}
