//! Trace processing
//!
//! Turns a raw event trace into a [`ProcessedTrace`]: the main-frame process
//! and frame identity, the navigation anchor that serves as the trace time
//! origin, and the ordered paint/metric candidate events downstream
//! extraction works from. Pure transform; cross-source time alignment is the
//! correlator's job.

pub mod processor;

pub use processor::{process_trace, PaintEvent, ProcessedTrace};
