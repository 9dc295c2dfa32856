//! HTML extraction for event listings.
//!
//! Pure functions of the current view: selectors are compiled once at
//! construction, extraction walks every matching container in document
//! order. Zero matching containers is a valid empty result; a container
//! missing its date or name child is an error, never a silent skip.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::infrastructure::config::{CorporateSelectors, PresentationSelectors};
use crate::infrastructure::error::{ScrapeError, ScrapeResult};

/// Untyped field tuple pulled from one entry element, consumed by the
/// normalizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    pub date_text: String,
    pub name_text: String,
    pub location_text: Option<String>,
}

pub(crate) fn compile_selector(selector: &str) -> ScrapeResult<Selector> {
    Selector::parse(selector)
        .map_err(|e| ScrapeError::invalid_selector(selector, e.to_string()))
}

fn required_text(
    element: &ElementRef<'_>,
    selector: &Selector,
    selector_str: &str,
    index: usize,
) -> ScrapeResult<String> {
    element
        .select(selector)
        .next()
        .map(|e| e.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or_else(|| ScrapeError::element_not_found(selector_str, format!("entry {index}")))
}

/// Extractor for the corporate calendar cards.
#[derive(Debug)]
pub struct CorporateEventParser {
    selectors: CorporateSelectors,
    container: Selector,
    date: Selector,
    name: Selector,
    location: Selector,
}

impl CorporateEventParser {
    pub fn new(selectors: &CorporateSelectors) -> ScrapeResult<Self> {
        Ok(Self {
            container: compile_selector(&selectors.event_container)?,
            date: compile_selector(&selectors.date_text)?,
            name: compile_selector(&selectors.name_text)?,
            location: compile_selector(&selectors.location_text)?,
            selectors: selectors.clone(),
        })
    }

    /// Ordered raw tuples for every event card in the view.
    pub fn extract(&self, html: &Html) -> ScrapeResult<Vec<RawEvent>> {
        let mut raw = Vec::new();
        for (index, element) in html.select(&self.container).enumerate() {
            let date_text = required_text(&element, &self.date, &self.selectors.date_text, index)?;
            let name_text = required_text(&element, &self.name, &self.selectors.name_text, index)?;
            let location_text =
                required_text(&element, &self.location, &self.selectors.location_text, index)?;
            raw.push(RawEvent {
                date_text,
                name_text,
                location_text: Some(location_text),
            });
        }
        debug!("Extracted {} corporate event cards", raw.len());
        Ok(raw)
    }
}

/// Extractor for the latest-events and archive modules.
#[derive(Debug)]
pub struct PresentationListParser {
    selectors: PresentationSelectors,
    latest_item: Selector,
    archive_item: Selector,
    date: Selector,
    name: Selector,
}

impl PresentationListParser {
    pub fn new(selectors: &PresentationSelectors) -> ScrapeResult<Self> {
        Ok(Self {
            latest_item: compile_selector(&selectors.latest_item)?,
            archive_item: compile_selector(&selectors.archive_item)?,
            date: compile_selector(&selectors.date_text)?,
            name: compile_selector(&selectors.name_text)?,
            selectors: selectors.clone(),
        })
    }

    pub fn extract_latest(&self, html: &Html) -> ScrapeResult<Vec<RawEvent>> {
        let raw = self.extract_items(html, &self.latest_item)?;
        debug!("Extracted {} latest events", raw.len());
        Ok(raw)
    }

    pub fn extract_archive(&self, html: &Html) -> ScrapeResult<Vec<RawEvent>> {
        let raw = self.extract_items(html, &self.archive_item)?;
        debug!("Extracted {} archived events", raw.len());
        Ok(raw)
    }

    /// How many archive entries the view currently renders; the content
    /// wait polls this.
    pub fn archive_entry_count(&self, html: &Html) -> usize {
        html.select(&self.archive_item).count()
    }

    pub fn archive_item_selector(&self) -> &str {
        &self.selectors.archive_item
    }

    fn extract_items(&self, html: &Html, item: &Selector) -> ScrapeResult<Vec<RawEvent>> {
        let mut raw = Vec::new();
        for (index, element) in html.select(item).enumerate() {
            let date_text = required_text(&element, &self.date, &self.selectors.date_text, index)?;
            let name_text = required_text(&element, &self.name, &self.selectors.name_text, index)?;
            raw.push(RawEvent {
                date_text,
                name_text,
                location_text: None,
            });
        }
        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::{CorporateSelectors, PresentationSelectors};

    const CORPORATE_VIEW: &str = r#"
        <div class="sc-gZMcBi jniRnN">
            <h2>March 19, 2024</h2>
            <h3>GTC Keynote</h3>
            <h4>San Jose, CA</h4>
        </div>
        <div class="sc-gZMcBi jniRnN">
            <h2>Feb 28 - Mar 1, 2025</h2>
            <h3>Analyst Day</h3>
            <h4>Virtual</h4>
        </div>
    "#;

    const PRESENTATIONS_VIEW: &str = r#"
        <div class="module-event-latest">
            <div class="module_item">
                <span class="module_date-text">March 19, 2024</span>
                <a class="module_headline-link">Q1 Earnings, Call</a>
            </div>
        </div>
        <div class="module-event-archive">
            <div class="module_item">
                <span class="module_date-text">Jan 5, 2023</span>
                <a class="module_headline-link">Annual Meeting</a>
            </div>
        </div>
    "#;

    #[test]
    fn extracts_corporate_cards_in_document_order() {
        let parser = CorporateEventParser::new(&CorporateSelectors::default()).unwrap();
        let raw = parser.extract(&Html::parse_document(CORPORATE_VIEW)).unwrap();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[0].date_text, "March 19, 2024");
        assert_eq!(raw[0].name_text, "GTC Keynote");
        assert_eq!(raw[0].location_text.as_deref(), Some("San Jose, CA"));
        assert_eq!(raw[1].date_text, "Feb 28 - Mar 1, 2025");
    }

    #[test]
    fn latest_and_archive_modules_are_kept_separate() {
        let parser = PresentationListParser::new(&PresentationSelectors::default()).unwrap();
        let html = Html::parse_document(PRESENTATIONS_VIEW);

        let latest = parser.extract_latest(&html).unwrap();
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].name_text, "Q1 Earnings, Call");
        assert!(latest[0].location_text.is_none());

        let archived = parser.extract_archive(&html).unwrap();
        assert_eq!(archived.len(), 1);
        assert_eq!(archived[0].date_text, "Jan 5, 2023");
        assert_eq!(parser.archive_entry_count(&html), 1);
    }

    #[test]
    fn empty_view_yields_empty_sequence() {
        let parser = PresentationListParser::new(&PresentationSelectors::default()).unwrap();
        let html = Html::parse_document("<div class=\"module-event-archive\"></div>");
        assert_eq!(parser.extract_archive(&html).unwrap(), vec![]);
        assert_eq!(parser.archive_entry_count(&html), 0);
    }

    #[test]
    fn missing_name_child_is_an_error() {
        let parser = PresentationListParser::new(&PresentationSelectors::default()).unwrap();
        let html = Html::parse_document(
            r#"<div class="module-event-archive">
                <div class="module_item">
                    <span class="module_date-text">Jan 5, 2023</span>
                </div>
            </div>"#,
        );
        let err = parser.extract_archive(&html).unwrap_err();
        match err {
            ScrapeError::ElementNotFound { selector, context } => {
                assert_eq!(selector, ".module_headline-link");
                assert_eq!(context, "entry 0");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn malformed_selector_fails_at_construction() {
        let mut selectors = CorporateSelectors::default();
        selectors.event_container = ":::".to_string();
        let err = CorporateEventParser::new(&selectors).unwrap_err();
        assert!(matches!(err, ScrapeError::InvalidSelector { .. }));

        let mut selectors = PresentationSelectors::default();
        selectors.archive_item = ":::".to_string();
        let err = PresentationListParser::new(&selectors).unwrap_err();
        assert!(matches!(err, ScrapeError::InvalidSelector { .. }));
    }
}
