//! Application layer: the collection pipelines.

pub mod pipeline;

pub use pipeline::{collect_corporate, collect_presentations, run_corporate, run_presentations};
