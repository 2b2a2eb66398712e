//! Capability traits at the seams between the engines and remote services.

mod completion;
mod task_status;

pub use completion::CompletionCapability;
pub use task_status::TaskStatusCapability;
