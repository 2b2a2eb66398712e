//! Utility modules for tracksmartin
//!
//! This module contains small helpers used throughout the library.

pub mod cancel;

pub use cancel::CancelHandle;
