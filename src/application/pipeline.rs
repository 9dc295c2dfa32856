//! The two collection pipelines.
//!
//! Driver -> extractor -> normalizer -> accumulate -> sink, run in
//! sequence. The `EventSet` accumulator is owned by the pipeline function
//! and returned, never shared. A `CancellationToken` threads through every
//! suspension point; no stage retries, every failure propagates.

use std::path::{Path, PathBuf};

use scraper::Html;
use tokio::time::{Instant, sleep};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::domain::event::EventSet;
use crate::infrastructure::config::{CollectorConfig, WaitPolicy};
use crate::infrastructure::error::{ScrapeError, ScrapeResult};
use crate::infrastructure::normalize::{normalize_corporate, normalize_presentation};
use crate::infrastructure::page::PageDriver;
use crate::infrastructure::parser::{CorporateEventParser, PresentationListParser};
use crate::infrastructure::sink::CsvSink;

fn ensure_live(token: &CancellationToken) -> ScrapeResult<()> {
    if token.is_cancelled() {
        return Err(ScrapeError::Cancelled);
    }
    Ok(())
}

/// Collect the corporate/investor calendar from the current page: expand
/// every "show all" control, then extract and normalize each event card.
pub async fn collect_corporate<D: PageDriver>(
    driver: &mut D,
    config: &CollectorConfig,
    token: &CancellationToken,
) -> ScrapeResult<EventSet> {
    ensure_live(token)?;
    let parser = CorporateEventParser::new(&config.corporate)?;

    let activated = driver.activate_all(&config.corporate.show_all_button).await?;
    debug!("Activated {activated} show-all controls");

    ensure_live(token)?;
    let page = driver.html().await?;
    let raw = parser.extract(&Html::parse_document(&page))?;

    let mut events = EventSet::new();
    for entry in &raw {
        events.push(normalize_corporate(entry)?);
    }
    info!("Collected {} corporate events", events.len());
    Ok(events)
}

/// Collect the events-and-presentations listings: the latest-events module
/// first, then every archive year in document order, waiting for each
/// selection to render.
pub async fn collect_presentations<D: PageDriver>(
    driver: &mut D,
    config: &CollectorConfig,
    token: &CancellationToken,
) -> ScrapeResult<EventSet> {
    ensure_live(token)?;
    let parser = PresentationListParser::new(&config.presentations)?;
    let mut events = EventSet::new();

    let page = driver.html().await?;
    let latest = parser.extract_latest(&Html::parse_document(&page))?;
    info!("Collected {} latest events", latest.len());
    for entry in &latest {
        events.push(normalize_presentation(entry)?);
    }

    let year_select = config.presentations.year_select.as_str();
    let years = driver.option_count(year_select).await?;
    for index in 0..years {
        ensure_live(token)?;
        driver.select_option(year_select, index).await?;
        wait_for_entries(driver, &parser, &config.wait, token).await?;

        let page = driver.html().await?;
        let archived = parser.extract_archive(&Html::parse_document(&page))?;
        for entry in &archived {
            events.push(normalize_presentation(entry)?);
        }
        info!(
            "Collected {} archived events for year option {index} ({} overall)",
            archived.len(),
            events.len()
        );
    }

    Ok(events)
}

/// Suspend until the archive module renders at least one entry.
///
/// Bounded poll: checks every `poll_interval`, fails with `LoadTimeout`
/// once `load_timeout` would be exceeded, and aborts with `Cancelled` as
/// soon as the token fires.
async fn wait_for_entries<D: PageDriver>(
    driver: &mut D,
    parser: &PresentationListParser,
    policy: &WaitPolicy,
    token: &CancellationToken,
) -> ScrapeResult<()> {
    let deadline = Instant::now() + policy.load_timeout();
    loop {
        ensure_live(token)?;

        let page = driver.html().await?;
        let rendered = parser.archive_entry_count(&Html::parse_document(&page));
        if rendered > 0 {
            debug!("Archive view ready with {rendered} entries");
            return Ok(());
        }

        if Instant::now() + policy.poll_interval() > deadline {
            return Err(ScrapeError::LoadTimeout {
                selector: parser.archive_item_selector().to_string(),
                waited_ms: policy.load_timeout_ms,
            });
        }
        tokio::select! {
            _ = sleep(policy.poll_interval()) => {}
            _ = token.cancelled() => return Err(ScrapeError::Cancelled),
        }
    }
}

/// Collect the corporate calendar and write its artifact into `out_dir`.
pub async fn run_corporate<D: PageDriver>(
    driver: &mut D,
    config: &CollectorConfig,
    token: &CancellationToken,
    out_dir: &Path,
) -> ScrapeResult<PathBuf> {
    let events = collect_corporate(driver, config, token).await?;
    let path = out_dir.join(&config.output.corporate_file);
    CsvSink::write_corporate(&events, &path)?;
    Ok(path)
}

/// Collect the presentations listings and write their artifact into
/// `out_dir`.
pub async fn run_presentations<D: PageDriver>(
    driver: &mut D,
    config: &CollectorConfig,
    token: &CancellationToken,
    out_dir: &Path,
) -> ScrapeResult<PathBuf> {
    let events = collect_presentations(driver, config, token).await?;
    let path = out_dir.join(&config.output.presentations_file);
    CsvSink::write_presentations(&events, &path)?;
    Ok(path)
}
