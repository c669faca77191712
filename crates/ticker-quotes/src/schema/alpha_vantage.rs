use crate::config::Config;
use crate::error::FetchError;
use crate::table::{QuoteRow, QuoteTable, SeriesKind};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use reqwest::Client as HttpClient;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, error, trace};

////////////////////////////////////////////////////////////////////////////////////////////////////
//
// API Documentation: https://www.alphavantage.co/documentation/#time-series-data
//
////////////////////////////////////////////////////////////////////////////////////////////////////

/// Field names in ordinal order; the provider labels them `"1. open"` .. `"5. volume"`.
const FIELDS: [&str; 5] = ["open", "high", "low", "close", "volume"];

pub struct AlphaVantage {
    http_client: HttpClient,
    config: Config,
}

impl AlphaVantage {
    pub fn new(config: Config) -> Result<Self, FetchError> {
        let mut builder = reqwest::ClientBuilder::new().timeout(config.timeout);
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent);
        }
        let http_client = builder.build().map_err(|e| {
            error!("failed to build reqwest client: {e}");
            e
        })?;
        Ok(Self {
            http_client,
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetch one series for `symbol`, normalized to an ascending [`QuoteTable`].
    ///
    /// The symbol is sent exactly as given; the provider decides whether it is valid.
    /// One request per call; nothing is retried or cached.
    pub async fn fetch(&self, symbol: &str, kind: SeriesKind) -> Result<QuoteTable, FetchError> {
        let time = std::time::Instant::now();
        let function = kind.function();

        trace!("Fetching {function} for [{symbol}] from Alpha Vantage");
        let body = self
            .http_client
            .get(&self.config.base_url)
            .query(&query(symbol, &kind, &self.config.api_key))
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| {
                error!("[{symbol}] {function} request error: {e}");
                e
            })?
            .text()
            .await
            .map_err(|e| {
                error!("[{symbol}] {function} body read error: {e}");
                e
            })?;

        let table = parse_response(&body, &kind).map_err(|e| {
            error!("[{symbol}] {function} could not be normalized: {e}");
            e
        })?;

        debug!(
            "[{symbol}] {function} fetched {} rows. Elapsed time: {} ms",
            table.len(),
            time.elapsed().as_millis()
        );

        Ok(table)
    }
}

/// Query parameters of a request; `interval` is only sent for intraday series.
fn query(symbol: &str, kind: &SeriesKind, api_key: &str) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("function", kind.function().to_string()),
        ("symbol", symbol.to_string()),
    ];
    if let Some(interval) = kind.interval() {
        params.push(("interval", interval.label()));
    }
    params.push(("outputsize", kind.output_size().as_str().to_string()));
    params.push(("apikey", api_key.to_string()));
    params
}

////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Deserialization
//
////////////////////////////////////////////////////////////////////////////////////////////////////

/// One row as sent: ordinal-labelled field -> string (or number) value.
pub type RawRow = BTreeMap<String, Value>;

/// Timestamp string -> row.
pub type RawSeries = BTreeMap<String, RawRow>;

/// A provider response, split on whether it carries the requested series.
#[derive(Debug, PartialEq)]
pub enum SeriesPayload {
    Series(RawSeries),
    /// Anything else (rate limit note, error message, non-JSON body), kept verbatim.
    Notice(String),
}

impl SeriesPayload {
    pub fn classify(body: &str, series_key: &str) -> Self {
        let series = serde_json::from_str::<HashMap<String, Value>>(body)
            .ok()
            .and_then(|mut top| top.remove(series_key))
            .and_then(|series| serde_json::from_value::<RawSeries>(series).ok());

        match series {
            Some(series) => SeriesPayload::Series(series),
            None => SeriesPayload::Notice(body.to_string()),
        }
    }
}

/// Normalize a raw response body for `kind` into an ascending [`QuoteTable`].
pub fn parse_response(body: &str, kind: &SeriesKind) -> Result<QuoteTable, FetchError> {
    trace!("Deserializing {} response", kind.function());
    let series = match SeriesPayload::classify(body, &kind.series_key()) {
        SeriesPayload::Series(series) => series,
        SeriesPayload::Notice(raw) => return Err(FetchError::UnexpectedSchema { raw }),
    };

    trace!("Transforming {} entries", series.len());
    let rows = series
        .iter()
        .map(|(stamp, fields)| parse_row(stamp, fields, kind))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(QuoteTable::from_rows(rows))
}

fn parse_row(stamp: &str, fields: &RawRow, kind: &SeriesKind) -> Result<QuoteRow, FetchError> {
    let malformed = |field: &'static str, reason: String| FetchError::MalformedRow {
        timestamp: stamp.to_string(),
        field,
        reason,
    };

    let timestamp = parse_timestamp(stamp, kind)
        .ok_or_else(|| malformed("timestamp", format!("expected {}", kind.timestamp_format())))?;

    // map "N. label" onto slot N-1; the label text is ignored
    let mut slots: [Option<&Value>; 5] = [None; 5];
    for (label, value) in fields {
        if let Some(n) = ordinal(label).filter(|n| (1..=FIELDS.len()).contains(n)) {
            let field = FIELDS[n - 1];
            if slots[n - 1].replace(value).is_some() {
                return Err(malformed(field, format!("ordinal {n} appears more than once")));
            }
        }
    }

    let mut values = [0.0_f64; 5];
    for (i, slot) in slots.iter().enumerate() {
        let field = FIELDS[i];
        let value = slot.ok_or_else(|| malformed(field, "is missing".to_string()))?;
        values[i] = parse_number(value).map_err(|reason| malformed(field, reason))?;
    }
    let [open, high, low, close, volume] = values;

    Ok(QuoteRow {
        timestamp,
        open,
        high,
        low,
        close,
        volume,
    })
}

/// Leading integer of a label such as `"3. low"`.
fn ordinal(label: &str) -> Option<usize> {
    let (n, _) = label.split_once('.')?;
    n.trim().parse().ok()
}

fn parse_number(value: &Value) -> Result<f64, String> {
    match value {
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("{s:?} is not a number: {e}")),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| format!("{n} does not fit an f64")),
        other => Err(format!("unexpected value {other}")),
    }
}

fn parse_timestamp(stamp: &str, kind: &SeriesKind) -> Option<NaiveDateTime> {
    match kind {
        SeriesKind::Intraday { .. } => {
            NaiveDateTime::parse_from_str(stamp, kind.timestamp_format()).ok()
        }
        SeriesKind::Daily { .. } => NaiveDate::parse_from_str(stamp, kind.timestamp_format())
            .ok()
            .map(|date| date.and_time(NaiveTime::MIN)),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
