use crate::config::SourceConfig;
use crate::types::RawRow;
use csv::ReaderBuilder;
use std::io::Read;
use thiserror::Error;

/// Whole-document failures. Anything here halts the batch and is surfaced
/// to the user; per-row problems are handled downstream and never land here.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to fetch spreadsheet: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("dataset is empty")]
    EmptyDataset,
}

/// Fetch the published spreadsheet and parse it into raw rows.
pub async fn fetch_rows(source: &SourceConfig) -> Result<Vec<RawRow>, DataError> {
    println!("Fetching spreadsheet from {}", source.csv_url);

    let body = reqwest::get(&source.csv_url)
        .await?
        .error_for_status()?
        .text()
        .await?;

    // Published exports occasionally lead with a BOM that would corrupt the
    // first header name.
    let rows = parse_rows(body.trim_start_matches('\u{feff}').as_bytes())?;
    println!("Loaded {} rows", rows.len());
    Ok(rows)
}

/// Parse a CSV document: first record is the header row, each following
/// record becomes a header -> value map. Column order is arbitrary and
/// field counts may be ragged; blank lines are skipped.
pub fn parse_rows<R: Read>(reader: R) -> Result<Vec<RawRow>, DataError> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers()?.clone();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let mut row = RawRow::new();
        for (i, header) in headers.iter().enumerate() {
            if let Some(value) = record.get(i) {
                row.insert(header.to_string(), value.to_string());
            }
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(DataError::EmptyDataset);
    }

    Ok(rows)
}
