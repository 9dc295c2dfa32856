//! ir-events - investor-relations calendar collection
//!
//! Two single-shot pipelines that pull event/calendar entries out of a
//! rendered investor-relations page, normalize their dates and text, and
//! export CSV artifacts. The rendered page itself sits behind the
//! [`PageDriver`] trait; the crate ships an offline snapshot driver and
//! leaves live-browser integrations to the embedding application.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::pipeline::{
    collect_corporate, collect_presentations, run_corporate, run_presentations,
};
pub use domain::event::{EventRecord, EventSet};
pub use infrastructure::config::CollectorConfig;
pub use infrastructure::error::{ScrapeError, ScrapeResult};
pub use infrastructure::logging::init_logging;
pub use infrastructure::page::{PageDriver, SnapshotDriver};
pub use infrastructure::sink::CsvSink;
