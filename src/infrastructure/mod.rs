//! Infrastructure: page access, extraction, normalization, export.

pub mod config;
pub mod error;
pub mod logging;
pub mod normalize;
pub mod page;
pub mod parser;
pub mod sink;
