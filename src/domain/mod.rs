//! Domain entities for collected calendar data.

pub mod event;

pub use event::{EventRecord, EventSet};
