//! Collector configuration.
//!
//! Selector strings are page-specific configuration, not design: the
//! defaults target the NVIDIA investor-relations pages the pipelines were
//! written against, and embedders can deserialize their own set.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level configuration for both pipelines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    pub corporate: CorporateSelectors,
    pub presentations: PresentationSelectors,
    pub wait: WaitPolicy,
    pub output: OutputConfig,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            corporate: CorporateSelectors::default(),
            presentations: PresentationSelectors::default(),
            wait: WaitPolicy::default(),
            output: OutputConfig::default(),
        }
    }
}

/// CSS selectors for the corporate/investor calendar page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorporateSelectors {
    /// "Show all" controls expanded before extraction.
    pub show_all_button: String,

    /// One element per event card.
    pub event_container: String,

    /// Date, name and location children within a card.
    pub date_text: String,
    pub name_text: String,
    pub location_text: String,
}

impl Default for CorporateSelectors {
    fn default() -> Self {
        Self {
            show_all_button: ".sc-jTzLTM.caDwam".to_string(),
            event_container: ".sc-gZMcBi.jniRnN".to_string(),
            date_text: "h2".to_string(),
            name_text: "h3".to_string(),
            location_text: "h4".to_string(),
        }
    }
}

/// CSS selectors for the events-and-presentations page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresentationSelectors {
    /// One element per entry in the latest-events module.
    pub latest_item: String,

    /// One element per entry in the archive module.
    pub archive_item: String,

    /// Date and name children within an entry.
    pub date_text: String,
    pub name_text: String,

    /// The year dropdown that pages the archive.
    pub year_select: String,
}

impl Default for PresentationSelectors {
    fn default() -> Self {
        Self {
            latest_item: ".module-event-latest .module_item".to_string(),
            archive_item: ".module-event-archive .module_item".to_string(),
            date_text: ".module_date-text".to_string(),
            name_text: ".module_headline-link".to_string(),
            year_select: "#eventArchiveYear".to_string(),
        }
    }
}

/// Bounds for the archive content wait.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitPolicy {
    /// Interval between content checks.
    pub poll_interval_ms: u64,

    /// Ceiling after which the wait fails with `LoadTimeout`.
    pub load_timeout_ms: u64,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
            load_timeout_ms: 10_000,
        }
    }
}

impl WaitPolicy {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn load_timeout(&self) -> Duration {
        Duration::from_millis(self.load_timeout_ms)
    }
}

/// Artifact file names, one per pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub corporate_file: String,
    pub presentations_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            corporate_file: "events_corporate.csv".to_string(),
            presentations_file: "events_presentations.csv".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_wait_policy_matches_source_poll() {
        let wait = WaitPolicy::default();
        assert_eq!(wait.poll_interval(), Duration::from_millis(100));
        assert!(wait.load_timeout() > wait.poll_interval());
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = CollectorConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: CollectorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.corporate.event_container, config.corporate.event_container);
        assert_eq!(back.output.presentations_file, "events_presentations.csv");
        assert_eq!(back.wait.poll_interval_ms, 100);
    }
}
