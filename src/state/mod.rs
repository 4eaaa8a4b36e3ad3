//! State Module - Reactive field state
//!
//! - **Field** - value, data payload, focus, presence, error and hint signals

mod field;

pub use field::*;
