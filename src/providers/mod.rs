//! Remote service clients.

pub mod openai;
pub mod suno;

pub use openai::{OpenAiClient, OpenAiConfig};
pub use suno::{SunoClient, SunoConfig};
