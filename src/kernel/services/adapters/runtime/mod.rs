//! Async runtime adapter: executes save effects and sends results back to the UI layer.

mod async_runtime;
mod message;

pub use async_runtime::SaveRuntime;
pub use message::AppMessage;
