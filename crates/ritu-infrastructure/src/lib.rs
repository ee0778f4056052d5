pub mod config_service;
pub mod json_preferences_repository;
pub mod json_selection_repository;
pub mod paths;
pub mod storage;

pub use crate::json_preferences_repository::JsonPreferencesRepository;
pub use crate::json_selection_repository::JsonSelectionRepository;
pub use crate::paths::RituPaths;
