//! The rendered-page collaborator.
//!
//! The pipelines never touch a browser directly; they depend on three
//! capabilities of the rendered page: reading the current DOM, activating
//! matching controls, and driving a select control. Live-browser sessions
//! implement [`PageDriver`] in the embedding application;
//! [`SnapshotDriver`] serves pre-rendered snapshots for offline runs and
//! tests.

use async_trait::async_trait;
use scraper::Html;

use crate::infrastructure::error::{ScrapeError, ScrapeResult};
use crate::infrastructure::parser::compile_selector;

#[async_trait]
pub trait PageDriver: Send {
    /// Current rendered DOM as an HTML string.
    async fn html(&mut self) -> ScrapeResult<String>;

    /// Activate (click) every control matching `selector`; returns how many
    /// were hit. Repeating the call on an already-expanded view is a no-op.
    async fn activate_all(&mut self, selector: &str) -> ScrapeResult<usize>;

    /// Number of options in the select control matching `selector`.
    async fn option_count(&mut self, selector: &str) -> ScrapeResult<usize>;

    /// Select option `index` and dispatch the value-change signal.
    async fn select_option(&mut self, selector: &str, index: usize) -> ScrapeResult<()>;
}

/// Driver over pre-rendered HTML snapshots, one per view state.
///
/// The initial snapshot is served until an option is selected; selecting
/// option `i` switches to the matching per-option snapshot. Activation is
/// counted but does not mutate anything - snapshots are expected to be
/// captured post-expansion.
#[derive(Debug, Clone)]
pub struct SnapshotDriver {
    initial: String,
    option_views: Vec<String>,
    selected: Option<usize>,
}

impl SnapshotDriver {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            initial: initial.into(),
            option_views: Vec::new(),
            selected: None,
        }
    }

    /// Attach the per-option snapshots served after each selection.
    pub fn with_option_views(mut self, views: Vec<String>) -> Self {
        self.option_views = views;
        self
    }

    fn current(&self) -> &str {
        match self.selected {
            Some(index) => &self.option_views[index],
            None => &self.initial,
        }
    }
}

#[async_trait]
impl PageDriver for SnapshotDriver {
    async fn html(&mut self) -> ScrapeResult<String> {
        Ok(self.current().to_string())
    }

    async fn activate_all(&mut self, selector: &str) -> ScrapeResult<usize> {
        let compiled = compile_selector(selector)?;
        let document = Html::parse_document(self.current());
        Ok(document.select(&compiled).count())
    }

    async fn option_count(&mut self, selector: &str) -> ScrapeResult<usize> {
        if self.option_views.is_empty() {
            return Err(ScrapeError::element_not_found(
                selector,
                "snapshot driver has no option views",
            ));
        }
        Ok(self.option_views.len())
    }

    async fn select_option(&mut self, selector: &str, index: usize) -> ScrapeResult<()> {
        if index >= self.option_views.len() {
            return Err(ScrapeError::element_not_found(
                selector,
                format!("option index {index} out of range"),
            ));
        }
        self.selected = Some(index);
        Ok(())
    }
}
