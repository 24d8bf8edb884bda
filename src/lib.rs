//! fit-intent: classify short fitness utterances into proposed actions.

pub mod api;
pub mod classifier;
pub mod config;
pub mod error;
pub mod repl;

pub use classifier::{ActionData, ActionKind, ProposedAction, classify};
