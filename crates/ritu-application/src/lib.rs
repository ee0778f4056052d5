//! Application layer: projection, assistant bridge, and the controller that
//! keeps in-memory selection, rendered views, and persisted storage in sync.

pub mod assistant;
pub mod controller;
pub mod debounce;
pub mod projector;
pub mod routine_text;
pub mod surface;

pub use assistant::{AssistantBridge, ChatOutcome};
pub use controller::RoutineController;
pub use surface::{NotificationSink, NoticeSeverity, Renderer};
