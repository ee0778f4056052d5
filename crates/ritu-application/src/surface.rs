//! Abstract rendering surface.
//!
//! The controller depends on these traits instead of a concrete terminal, so
//! the application logic stays testable without one.

use crate::projector::{CatalogView, DetailView, PanelView};

/// Severity of a human-readable notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeSeverity {
    Info,
    Warning,
    Error,
}

/// Sink for human-readable notifications (localized, ready to display).
pub trait NotificationSink: Send + Sync {
    fn notify(&self, severity: NoticeSeverity, text: String);
}

/// Receiver of projected views.
pub trait Renderer: Send + Sync {
    fn render_catalog(&self, view: &CatalogView);
    fn render_panel(&self, view: &PanelView);
    fn render_detail(&self, view: &DetailView);
}
