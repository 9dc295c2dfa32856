//! CSV artifact writing.
//!
//! One writer per pipeline, each with its own header layout. The
//! presentations artifact drops exact duplicate rows first (the latest and
//! archive modules overlap on the source page), keeping the first
//! occurrence. A write failure aborts the run; there is no partial output.

use std::collections::HashSet;
use std::path::Path;

use tracing::info;

use crate::domain::event::EventSet;
use crate::infrastructure::error::{ScrapeError, ScrapeResult};
use crate::infrastructure::normalize::format_date;

pub const CORPORATE_HEADER: [&str; 4] = ["start_date", "end_date", "name", "location"];
pub const PRESENTATIONS_HEADER: [&str; 2] = ["date", "name"];

pub struct CsvSink;

impl CsvSink {
    /// Write the corporate artifact: `start_date,end_date,name,location`.
    pub fn write_corporate(events: &EventSet, path: &Path) -> ScrapeResult<()> {
        let mut writer =
            csv::Writer::from_path(path).map_err(|e| ScrapeError::sink_write(path, e.to_string()))?;

        writer
            .write_record(CORPORATE_HEADER)
            .map_err(|e| ScrapeError::sink_write(path, e.to_string()))?;
        for record in events.iter() {
            writer
                .write_record([
                    format_date(record.start_date),
                    format_date(record.resolved_end()),
                    record.name.clone(),
                    record.location.clone().unwrap_or_default(),
                ])
                .map_err(|e| ScrapeError::sink_write(path, e.to_string()))?;
        }
        writer
            .flush()
            .map_err(|e| ScrapeError::sink_write(path, e.to_string()))?;

        info!("Wrote {} corporate events to {}", events.len(), path.display());
        Ok(())
    }

    /// Write the presentations artifact: `date,name`, deduplicated.
    pub fn write_presentations(events: &EventSet, path: &Path) -> ScrapeResult<()> {
        let rows: Vec<[String; 2]> = events
            .iter()
            .map(|record| [format_date(record.start_date), record.name.clone()])
            .collect();
        let total = rows.len();
        let rows = dedup_rows(rows);
        if rows.len() < total {
            info!("Dropped {} duplicate events", total - rows.len());
        }

        let mut writer =
            csv::Writer::from_path(path).map_err(|e| ScrapeError::sink_write(path, e.to_string()))?;
        writer
            .write_record(PRESENTATIONS_HEADER)
            .map_err(|e| ScrapeError::sink_write(path, e.to_string()))?;
        for row in &rows {
            writer
                .write_record(row)
                .map_err(|e| ScrapeError::sink_write(path, e.to_string()))?;
        }
        writer
            .flush()
            .map_err(|e| ScrapeError::sink_write(path, e.to_string()))?;

        info!("Wrote {} events to {}", rows.len(), path.display());
        Ok(())
    }
}

/// Exact-duplicate removal over serialized rows, first occurrence wins.
fn dedup_rows(rows: Vec<[String; 2]>) -> Vec<[String; 2]> {
    let mut seen = HashSet::new();
    rows.into_iter()
        .filter(|row| seen.insert(row.join(",")))
        .collect()
}
