//! CSV persistence of extracted records
//!
//! Rows are appended to the target file; the header is written only when the
//! file is new or empty so repeated runs on the same day share one header.

use crate::crawler::ExtractedRecord;
use crate::output::OutputResult;
use std::fs::{self, OpenOptions};
use std::path::Path;

/// Fixed leading columns, in record tuple order
pub const CSV_HEADER: [&str; 4] = ["fecha_ext", "producto", "precio", "página"];

/// Header row for records carrying the given extra fields
pub fn csv_header<'a>(extra: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    CSV_HEADER
        .iter()
        .copied()
        .chain(extra)
        .map(str::to_string)
        .collect()
}

/// Appends records to a CSV file
///
/// The parent directory is created if missing. Nothing is written for an
/// empty record list.
///
/// # Arguments
///
/// * `records` - The records of a run
/// * `path` - Target CSV file
///
/// # Returns
///
/// * `Ok(usize)` - Number of data rows written
/// * `Err(OutputError)` - Failed to create or write the file
pub fn save_to_csv(records: &[ExtractedRecord], path: &Path) -> OutputResult<usize> {
    let Some(first) = records.first() else {
        tracing::warn!("No data to save, skipping {}", path.display());
        return Ok(0);
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let needs_header = file.metadata()?.len() == 0;

    let extra: Vec<&str> = first.extra.keys().map(String::as_str).collect();

    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(file);

    if needs_header {
        writer.write_record(csv_header(extra.iter().copied()))?;
    }

    for record in records {
        let date = record.date_string();
        let mut row = vec![
            date.as_str(),
            record.title.as_deref().unwrap_or(""),
            record.price.as_str(),
            record.page_label.as_str(),
        ];
        row.extend(extra.iter().map(|name| {
            record
                .extra
                .get(*name)
                .and_then(|value| value.as_deref())
                .unwrap_or("")
        }));
        writer.write_record(&row)?;
    }

    writer.flush()?;

    tracing::info!("Saved {} rows to '{}'", records.len(), path.display());

    Ok(records.len())
}
