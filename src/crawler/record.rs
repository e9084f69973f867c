//! Records produced by a run
//!
//! An item block becomes an [`ExtractedRecord`] only when its price resolved
//! to a non-empty value. [`RunResult`] collects the records together with the
//! per-page reports and the reason the run ended.

use crate::crawler::parser::ExtractedFields;
use crate::selector::{PRICE_FIELD, TITLE_FIELD};
use crate::state::{PageReport, StopReason};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// One product row
///
/// Only built when the price resolved to a non-empty value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedRecord {
    /// Day the page was extracted
    pub extraction_date: NaiveDate,

    /// Product title, if the title selector matched
    pub title: Option<String>,

    /// Product price text, never empty
    pub price: String,

    /// Human-readable page label, e.g. "Página 2"
    pub page_label: String,

    /// Additional configured leaf fields
    pub extra: BTreeMap<String, Option<String>>,
}

impl ExtractedRecord {
    /// Builds a record from one item block's fields
    ///
    /// Returns `None` when the price is missing or empty; such blocks are
    /// dropped rather than emitted as partial records.
    pub fn from_fields(
        mut fields: ExtractedFields,
        extraction_date: NaiveDate,
        page: u32,
    ) -> Option<Self> {
        let price = fields
            .remove(PRICE_FIELD)
            .flatten()
            .filter(|price| !price.is_empty())?;
        let title = fields.remove(TITLE_FIELD).flatten();

        Some(Self {
            extraction_date,
            title,
            price,
            page_label: page_label(page),
            extra: fields,
        })
    }

    /// Extraction date as written to the CSV file
    pub fn date_string(&self) -> String {
        self.extraction_date.format("%Y-%m-%d").to_string()
    }
}

/// Label attached to every record of a page
pub fn page_label(page: u32) -> String {
    format!("Página {}", page)
}

/// Everything a run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    /// Records in page order, then document order within a page
    pub records: Vec<ExtractedRecord>,

    /// One report per attempted page
    pub pages: Vec<PageReport>,

    /// Why the page loop ended
    pub stop_reason: StopReason,
}

impl RunResult {
    /// Returns true if no record was extracted
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn fields(pairs: &[(&str, Option<&str>)]) -> ExtractedFields {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
            .collect()
    }

    #[test]
    fn test_record_with_title_and_price() {
        let record = ExtractedRecord::from_fields(
            fields(&[("title", Some("RAM 8GB")), ("price", Some("$20"))]),
            date(),
            3,
        )
        .unwrap();

        assert_eq!(record.title.as_deref(), Some("RAM 8GB"));
        assert_eq!(record.price, "$20");
        assert_eq!(record.page_label, "Página 3");
        assert_eq!(record.date_string(), "2024-05-01");
        assert!(record.extra.is_empty());
    }

    #[test]
    fn test_absent_title_is_kept() {
        let record = ExtractedRecord::from_fields(
            fields(&[("title", None), ("price", Some("$20"))]),
            date(),
            1,
        )
        .unwrap();
        assert_eq!(record.title, None);
    }

    #[test]
    fn test_missing_or_empty_price_is_dropped() {
        assert!(ExtractedRecord::from_fields(fields(&[("title", Some("x"))]), date(), 1).is_none());
        assert!(ExtractedRecord::from_fields(fields(&[("price", None)]), date(), 1).is_none());
        assert!(ExtractedRecord::from_fields(fields(&[("price", Some(""))]), date(), 1).is_none());
    }

    #[test]
    fn test_extra_fields_carried() {
        let record = ExtractedRecord::from_fields(
            fields(&[("price", Some("$1")), ("rating", Some("4.5")), ("seller", None)]),
            date(),
            1,
        )
        .unwrap();
        assert_eq!(record.extra.len(), 2);
        assert_eq!(record.extra["rating"].as_deref(), Some("4.5"));
        assert_eq!(record.extra["seller"], None);
    }
}
