//! Observability
//!
//! Subscriber setup for the binary plus the request tracer and secret masking
//! used by the HTTP clients.

pub mod telemetry;
pub mod tracing;

pub use telemetry::{OutputFormat, SubscriberConfig, init_subscriber};
pub use self::tracing::{ProviderTracer, mask_sensitive_value};
