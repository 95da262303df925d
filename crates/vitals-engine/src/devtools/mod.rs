//! Protocol-log correlation
//!
//! Parses the recorded devtools protocol traffic into navigation and network
//! timing records and reconciles the log's clock with the trace's clock. The
//! reconciliation produces one offset constant, applied once; nothing
//! downstream converts timestamps per event.

pub mod correlator;

pub use correlator::{correlate, CorrelatedLog, NavigationRecord, NetworkRequestRecord};
