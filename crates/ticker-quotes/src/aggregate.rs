//! Resampling of a [`QuoteTable`] into coarser time buckets.
//!
//! Bucket boundaries:
//! - `Daily`: the calendar date, stamped at 00:00.
//! - `Weekly`: ISO weeks, Monday 00:00 up to the next Monday, stamped at Monday 00:00.
//! - `Monthly`: the calendar month, stamped at 00:00 on the 1st.
//!
//! Timestamps are taken as given (the provider's exchange-local clock), with no zone shifting.

use crate::table::{QuoteRow, QuoteTable};
use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime};

/// Target resolution of [`aggregate()`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Granularity {
    /// Leave the table as fetched.
    #[default]
    Native,
    Daily,
    Weekly,
    Monthly,
}

impl Granularity {
    /// Start of the bucket `timestamp` falls in; `Native` maps every timestamp to itself.
    pub fn bucket_start(&self, timestamp: NaiveDateTime) -> NaiveDateTime {
        let date = timestamp.date();
        let start = match self {
            Granularity::Native => return timestamp,
            Granularity::Daily => date,
            Granularity::Weekly => {
                date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
            }
            Granularity::Monthly => date - Duration::days(i64::from(date.day0())),
        };
        start.and_time(NaiveTime::MIN)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Granularity::Native => "native",
            Granularity::Daily => "daily",
            Granularity::Weekly => "weekly",
            Granularity::Monthly => "monthly",
        }
    }
}

/// Resample `table` to `granularity`, one row per non-empty bucket, buckets ascending.
///
/// open = first open, high = max high, low = min low, close = last close, volume = sum.
/// Buckets without source rows are not emitted.
pub fn aggregate(table: &QuoteTable, granularity: Granularity) -> QuoteTable {
    if granularity == Granularity::Native {
        return table.clone();
    }

    let mut aggregated: Vec<QuoteRow> = Vec::new();
    let mut current: Option<QuoteRow> = None;

    // the table is ascending, so equal bucket keys are always adjacent
    for row in table {
        let bucket = granularity.bucket_start(row.timestamp);

        match current.as_mut() {
            Some(agg) if agg.timestamp == bucket => {
                agg.high = agg.high.max(row.high);
                agg.low = agg.low.min(row.low);
                agg.close = row.close;
                agg.volume += row.volume;
            }
            _ => {
                if let Some(done) = current.take() {
                    aggregated.push(done);
                }
                current = Some(QuoteRow {
                    timestamp: bucket,
                    ..*row
                });
            }
        }
    }

    if let Some(done) = current {
        aggregated.push(done);
    }

    QuoteTable::from_rows(aggregated)
}

///////////////////////////////////////////////////////////////////////////////////////////////////
