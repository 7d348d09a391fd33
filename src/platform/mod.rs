//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (key names to game signals)
//! - Storage (see `persistence`)

pub mod input;

pub use input::{InputSignal, signal_for_key};
