//! Raw text to [`EventRecord`] normalization.
//!
//! Dates arrive as free text ("March 19, 2024") or as day ranges that may
//! cross a month boundary ("Feb 28 - Mar 1, 2025"). Both normalize to
//! `YYYY-MM-DD`. Parsing is fallible end to end: malformed text is a
//! `DateParse` error carrying the offending raw value, never a sentinel
//! date.
//!
//! The range heuristic supports exactly two end-body shapes: a bare day
//! number (reuses the start month) and a full "Month Day" string. Anything
//! else - three-part ranges, non-English month names - fails rather than
//! being guessed at.

use chrono::NaiveDate;

use crate::domain::event::EventRecord;
use crate::infrastructure::error::{ScrapeError, ScrapeResult};
use crate::infrastructure::parser::RawEvent;

/// The artifact field delimiter; sanitization keeps it out of every field.
pub const FIELD_DELIMITER: char = ',';

/// Remove the field delimiter entirely (corporate artifact).
pub fn strip_delimiter(text: &str) -> String {
    text.chars().filter(|&c| c != FIELD_DELIMITER).collect()
}

/// Rewrite delimiters as a readable separator (presentations artifact):
/// comma-split, trim, join with " | ".
pub fn delimiter_to_pipe(text: &str) -> String {
    text.split(FIELD_DELIMITER)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" | ")
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a "Month Day Year" string, whitespace-collapsed. `raw` is the
/// original page text reported on failure.
fn parse_month_day_year(text: &str, raw: &str) -> ScrapeResult<NaiveDate> {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    NaiveDate::parse_from_str(&collapsed, "%B %d %Y").map_err(|_| ScrapeError::date_parse(raw))
}

/// Normalize a single free-text date ("March 19, 2024").
pub fn normalize_single_date(text: &str) -> ScrapeResult<NaiveDate> {
    let stripped = strip_delimiter(text);
    parse_month_day_year(stripped.trim(), text)
}

/// Normalize a date expression into `(start, optional end)`.
///
/// Range shape: text containing `-` and ending in a 4-digit year. The
/// trailing year is peeled off, the remainder splits on the first `-` into
/// start and end bodies, and a bare-day end body borrows the start month
/// abbreviation (the first 3 characters of the whole expression).
pub fn normalize_date(text: &str) -> ScrapeResult<(NaiveDate, Option<NaiveDate>)> {
    let stripped = strip_delimiter(text);
    let trimmed = stripped.trim();

    if !trimmed.contains('-') {
        return Ok((parse_month_day_year(trimmed, text)?, None));
    }

    let year_is_trailing = trimmed.len() > 4
        && trimmed
            .chars()
            .rev()
            .take(4)
            .all(|c| c.is_ascii_digit());
    if !year_is_trailing {
        return Err(ScrapeError::date_parse(text));
    }

    let (body, year) = trimmed.split_at(trimmed.len() - 4);
    let (start_body, end_body) = body
        .split_once('-')
        .ok_or_else(|| ScrapeError::date_parse(text))?;
    let end_body = end_body.trim().trim_end_matches('-').trim();
    if end_body.is_empty() {
        return Err(ScrapeError::date_parse(text));
    }

    let start = parse_month_day_year(&format!("{start_body} {year}"), text)?;

    // An end body longer than 3 characters already spells its own month;
    // a bare day number borrows the start month abbreviation.
    let end_text = if end_body.len() > 3 {
        format!("{end_body} {year}")
    } else {
        let start_month: String = trimmed.chars().take(3).collect();
        format!("{start_month} {end_body} {year}")
    };
    let end = parse_month_day_year(&end_text, text)?;

    Ok((start, Some(end)))
}

/// Normalize a corporate calendar entry: ranged date, delimiter-stripped
/// name and location.
pub fn normalize_corporate(raw: &RawEvent) -> ScrapeResult<EventRecord> {
    let (start_date, end_date) = normalize_date(&raw.date_text)?;
    Ok(EventRecord {
        start_date,
        end_date,
        name: strip_delimiter(&raw.name_text).trim().to_string(),
        location: raw
            .location_text
            .as_deref()
            .map(|l| strip_delimiter(l).trim().to_string()),
    })
}

/// Normalize a presentations entry: single date, name commas rewritten as
/// " | ".
pub fn normalize_presentation(raw: &RawEvent) -> ScrapeResult<EventRecord> {
    let start_date = normalize_single_date(&raw.date_text)?;
    Ok(EventRecord::single(
        start_date,
        delimiter_to_pipe(&raw.name_text),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn single_dates_normalize_to_iso() {
        assert_eq!(normalize_single_date("March 19, 2024").unwrap(), date(2024, 3, 19));
        assert_eq!(normalize_single_date("Jan 5, 2023").unwrap(), date(2023, 1, 5));
        assert_eq!(normalize_single_date("  July 1 2025 ").unwrap(), date(2025, 7, 1));
        assert_eq!(format_date(date(2024, 3, 19)), "2024-03-19");
    }

    #[test]
    fn same_month_range_reuses_start_month() {
        let (start, end) = normalize_date("Feb 28-29-2024").unwrap();
        assert_eq!(start, date(2024, 2, 28));
        assert_eq!(end, Some(date(2024, 2, 29)));
    }

    #[test]
    fn cross_month_range_keeps_spelled_out_month() {
        let (start, end) = normalize_date("Feb 28-Mar 1-2025").unwrap();
        assert_eq!(start, date(2025, 2, 28));
        assert_eq!(end, Some(date(2025, 3, 1)));
    }

    #[test]
    fn range_survives_comma_and_spacing_variants() {
        // As seen on the page before delimiter stripping.
        let (start, end) = normalize_date("Feb 28 - Mar 1, 2025").unwrap();
        assert_eq!(start, date(2025, 2, 28));
        assert_eq!(end, Some(date(2025, 3, 1)));

        let (start, end) = normalize_date("Nov 18-19, 2024").unwrap();
        assert_eq!(start, date(2024, 11, 18));
        assert_eq!(end, Some(date(2024, 11, 19)));
    }

    #[test]
    fn single_date_has_no_end() {
        let (start, end) = normalize_date("March 19, 2024").unwrap();
        assert_eq!(start, date(2024, 3, 19));
        assert_eq!(end, None);
    }

    #[test]
    fn malformed_dates_are_reported_not_guessed() {
        for text in [
            "not a date",
            "Feb 30, 2025",
            "Feb 28-29-2025", // no Feb 29 that year
            "Feb 28-",
            "28-29-2024", // no month anywhere
            "Feb 28-Mar 1-May 2-2025",
            "-2025",
        ] {
            let err = normalize_date(text).unwrap_err();
            match err {
                ScrapeError::DateParse { text: reported } => assert_eq!(reported, text),
                other => panic!("expected DateParse for {text:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn sanitization_leaves_no_delimiter_behind() {
        let cleaned = strip_delimiter("San Jose, CA, USA");
        assert_eq!(cleaned, "San Jose CA USA");
        assert_eq!(cleaned.matches(FIELD_DELIMITER).count(), 0);

        let piped = delimiter_to_pipe("Q1 Earnings, Call");
        assert_eq!(piped, "Q1 Earnings | Call");
        assert_eq!(piped.matches(FIELD_DELIMITER).count(), 0);
    }

    #[test]
    fn corporate_entry_normalizes_fields() {
        let raw = RawEvent {
            date_text: "Feb 28 - Mar 1, 2025".to_string(),
            name_text: "Analyst Day, Investor Session".to_string(),
            location_text: Some("San Jose, CA".to_string()),
        };
        let record = normalize_corporate(&raw).unwrap();
        assert_eq!(record.start_date, date(2025, 2, 28));
        assert_eq!(record.end_date, Some(date(2025, 3, 1)));
        assert_eq!(record.name, "Analyst Day Investor Session");
        assert_eq!(record.location.as_deref(), Some("San Jose CA"));
    }

    #[test]
    fn presentation_entry_normalizes_fields() {
        let raw = RawEvent {
            date_text: "March 19, 2024".to_string(),
            name_text: "Q1 Earnings, Call".to_string(),
            location_text: None,
        };
        let record = normalize_presentation(&raw).unwrap();
        assert_eq!(record.start_date, date(2024, 3, 19));
        assert_eq!(record.end_date, None);
        assert_eq!(record.name, "Q1 Earnings | Call");
        assert_eq!(record.location, None);
    }
}
