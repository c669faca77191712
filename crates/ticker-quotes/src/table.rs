use chrono::NaiveDateTime;

///////////////////////////////////////////////////////////////////////////////////////////////////
//
// Quote rows & tables
//
///////////////////////////////////////////////////////////////////////////////////////////////////

/// A single time-stamped OHLCV observation.
///
/// `low <= open, close <= high` is expected of the provider's data but is not checked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuoteRow {
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Rows ordered strictly ascending by timestamp, with no duplicates.
///
/// The only constructor is [`QuoteTable::from_rows()`], so every table upholds the ordering;
/// transformations build a new table rather than editing one in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuoteTable {
    rows: Vec<QuoteRow>,
}

impl QuoteTable {
    /// Sorts `rows` ascending by timestamp and drops repeated timestamps (first one wins).
    pub fn from_rows(mut rows: Vec<QuoteRow>) -> Self {
        // stable sort keeps provider order among equal timestamps
        rows.sort_by_key(|row| row.timestamp);
        rows.dedup_by_key(|row| row.timestamp);
        Self { rows }
    }

    pub fn rows(&self) -> &[QuoteRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<QuoteRow> {
        self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QuoteRow> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first(&self) -> Option<&QuoteRow> {
        self.rows.first()
    }

    pub fn last(&self) -> Option<&QuoteRow> {
        self.rows.last()
    }

    /// The most recent `n` rows (fewer if the table is shorter).
    pub fn tail(&self, n: usize) -> &[QuoteRow] {
        let start = self.rows.len().saturating_sub(n);
        &self.rows[start..]
    }
}

impl<'a> IntoIterator for &'a QuoteTable {
    type Item = &'a QuoteRow;
    type IntoIter = std::slice::Iter<'a, QuoteRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////
//
// Request parameters
//
///////////////////////////////////////////////////////////////////////////////////////////////////

/// Sampling interval of an intraday series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Interval {
    Min1,
    #[default]
    Min5,
    Min15,
    Min30,
    Min60,
}

impl Interval {
    pub fn minutes(&self) -> u32 {
        match self {
            Interval::Min1 => 1,
            Interval::Min5 => 5,
            Interval::Min15 => 15,
            Interval::Min30 => 30,
            Interval::Min60 => 60,
        }
    }

    /// Provider label, e.g. `5min`.
    pub fn label(&self) -> String {
        format!("{}min", self.minutes())
    }
}

/// How much history the provider should return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputSize {
    /// The most recent ~100 points.
    #[default]
    Compact,
    /// Everything available; 20+ years for daily series.
    Full,
}

impl OutputSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputSize::Compact => "compact",
            OutputSize::Full => "full",
        }
    }
}

/// Which series is requested, and hence which response key is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Intraday {
        interval: Interval,
        output_size: OutputSize,
    },
    Daily {
        output_size: OutputSize,
    },
}

impl SeriesKind {
    /// 5-minute bars, most recent window.
    pub fn intraday() -> Self {
        SeriesKind::Intraday {
            interval: Interval::Min5,
            output_size: OutputSize::Compact,
        }
    }

    /// Daily bars, full history.
    pub fn daily() -> Self {
        SeriesKind::Daily {
            output_size: OutputSize::Full,
        }
    }

    /// Value of the `function` query parameter.
    pub fn function(&self) -> &'static str {
        match self {
            SeriesKind::Intraday { .. } => "TIME_SERIES_INTRADAY",
            SeriesKind::Daily { .. } => "TIME_SERIES_DAILY",
        }
    }

    /// Top-level key that holds the series in a successful response.
    pub fn series_key(&self) -> String {
        match self {
            SeriesKind::Intraday { interval, .. } => format!("Time Series ({})", interval.label()),
            SeriesKind::Daily { .. } => "Time Series (Daily)".to_string(),
        }
    }

    pub fn interval(&self) -> Option<Interval> {
        match self {
            SeriesKind::Intraday { interval, .. } => Some(*interval),
            SeriesKind::Daily { .. } => None,
        }
    }

    pub fn output_size(&self) -> OutputSize {
        match self {
            SeriesKind::Intraday { output_size, .. } | SeriesKind::Daily { output_size } => {
                *output_size
            }
        }
    }

    /// Format of the per-row keys; minute precision intraday, day precision daily.
    pub fn timestamp_format(&self) -> &'static str {
        match self {
            SeriesKind::Intraday { .. } => "%Y-%m-%d %H:%M:%S",
            SeriesKind::Daily { .. } => "%Y-%m-%d",
        }
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(day: u32, hour: u32, close: f64) -> QuoteRow {
        QuoteRow {
            timestamp: NaiveDate::from_ymd_opt(2024, 1, day)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1.0,
        }
    }

    #[test]
    fn from_rows_sorts_and_dedups() {
        let table = QuoteTable::from_rows(vec![
            row(3, 9, 3.0),
            row(1, 9, 1.0),
            row(3, 9, 9.0),
            row(2, 9, 2.0),
        ]);
        let closes: Vec<f64> = table.iter().map(|r| r.close).collect();
        assert_eq!(closes, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn tail_is_bounded_by_len() {
        let table = QuoteTable::from_rows(vec![row(1, 9, 1.0), row(2, 9, 2.0), row(3, 9, 3.0)]);
        assert_eq!(table.tail(2).len(), 2);
        assert_eq!(table.tail(2)[0].close, 2.0);
        assert_eq!(table.tail(10).len(), 3);
        assert!(QuoteTable::default().tail(5).is_empty());
    }

    #[test]
    fn series_keys_follow_kind() {
        assert_eq!(SeriesKind::intraday().series_key(), "Time Series (5min)");
        assert_eq!(SeriesKind::daily().series_key(), "Time Series (Daily)");
        let hourly = SeriesKind::Intraday {
            interval: Interval::Min60,
            output_size: OutputSize::Full,
        };
        assert_eq!(hourly.series_key(), "Time Series (60min)");
        assert_eq!(hourly.output_size().as_str(), "full");
        assert_eq!(SeriesKind::daily().interval(), None);
    }
}
