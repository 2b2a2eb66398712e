//! OpenAI-compatible text-generation provider.

mod builder;
mod client;
mod config;
mod types;

pub use builder::OpenAiBuilder;
pub use client::OpenAiClient;
pub use config::OpenAiConfig;
