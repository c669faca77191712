use crate::error::ExportError;
use crate::table::QuoteTable;
use chrono::NaiveTime;
use serde::Serialize;
use std::io;

/// Header row; the leading timestamp column is unnamed.
pub const HEADER: [&str; 6] = ["", "Open", "High", "Low", "Close", "Volume"];

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One CSV line; field order matches [`HEADER`].
#[derive(Serialize)]
struct Record {
    timestamp: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

/// Download file name offered for `symbol`, e.g. `AAPL_data.csv`.
pub fn default_file_name(symbol: &str) -> String {
    format!("{}_data.csv", symbol.trim().to_uppercase())
}

/// Write `table` as CSV, one record per row keyed by timestamp.
///
/// Timestamps are written as dates when every row sits at midnight (daily or resampled tables),
/// and as date-times otherwise.
pub fn write_csv<W: io::Write>(table: &QuoteTable, writer: W) -> Result<(), ExportError> {
    let format = if table.iter().all(|row| row.timestamp.time() == NaiveTime::MIN) {
        DATE_FORMAT
    } else {
        DATETIME_FORMAT
    };

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(HEADER)?;
    for row in table {
        wtr.serialize(Record {
            timestamp: row.timestamp.format(format).to_string(),
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn to_csv_string(table: &QuoteTable) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_csv(table, &mut buf)?;
    // formatted dates and floats are ASCII
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

///////////////////////////////////////////////////////////////////////////////////////////////////
