//! Music-generation service provider.

mod builder;
mod client;
mod config;

pub use builder::SunoBuilder;
pub use client::SunoClient;
pub use config::SunoConfig;
