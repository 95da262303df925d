//! Shared data model for browser capture artifacts
//!
//! This crate defines the two input formats the metric engine consumes:
//!
//! - **Trace**: a recording of browser-internal events in the Chrome
//!   trace-event interchange format ([`trace::Trace`])
//! - **Devtools log**: the sequence of remote-debugging protocol messages
//!   recorded while the capture ran ([`devtools::DevtoolsLog`])
//!
//! Both are plain serde types plus file/string loaders. They are produced by
//! an external capture layer and consumed read-only; nothing in this crate
//! mutates a capture after parse.

pub mod devtools;
pub mod trace;

pub use devtools::{DevtoolsLog, DevtoolsMessage};
pub use trace::{Trace, TraceEvent};
