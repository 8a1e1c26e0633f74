//! Outbound clients for external services

pub mod completion;

pub use completion::{CompletionClient, CompletionOutput, MockCompletionClient};
