//! Network interaction layer: the completion call and its wire types.

pub mod client;
pub mod completion;

pub use client::{ChatCompletionsClient, CompletionBackend};
pub use completion::{CompletionError, CompletionRequest, WireMessage};
