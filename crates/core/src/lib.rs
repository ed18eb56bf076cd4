//! Core of the mock interview: transcript model, dialogue-service seam,
//! terminal primitive and the session state machine.

pub mod error;
pub mod interview;
pub mod llm_client;
pub mod terminal;
pub mod transcript;

pub use error::InterviewError;
pub use interview::{InterviewSession, Phase, SessionConfig};
