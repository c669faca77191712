use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use std::path::PathBuf;
use ticker_quotes::{parse_response, FetchError, SeriesKind};

fn fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(&path).expect("read fixture")
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .expect("date")
        .and_hms_opt(h, min, 0)
        .expect("time")
}

#[test]
fn intraday_rows_are_sorted_ascending() {
    let table = parse_response(&fixture("intraday_5min.json"), &SeriesKind::intraday())
        .expect("parse");

    assert_eq!(table.len(), 5);
    assert!(table
        .rows()
        .windows(2)
        .all(|pair| pair[0].timestamp < pair[1].timestamp));
    assert_eq!(table.first().expect("first").timestamp, at(2024, 1, 2, 15, 50));
    assert_eq!(table.last().expect("last").timestamp, at(2024, 1, 3, 9, 40));
}

#[test]
fn intraday_fields_map_to_ohlcv() {
    let table = parse_response(&fixture("intraday_5min.json"), &SeriesKind::intraday())
        .expect("parse");
    let bar = table
        .iter()
        .find(|row| row.timestamp == at(2024, 1, 3, 9, 35))
        .expect("09:35 bar");

    assert_eq!(bar.open, 184.0);
    assert_eq!(bar.high, 184.88);
    assert_eq!(bar.low, 183.8);
    assert_eq!(bar.close, 184.22);
    assert_eq!(bar.volume, 20.0);
}

#[test]
fn daily_rows_sit_at_midnight() {
    let table = parse_response(&fixture("daily.json"), &SeriesKind::daily()).expect("parse");

    assert_eq!(table.len(), 7);
    assert_eq!(table.first().expect("first").timestamp, at(2023, 12, 29, 0, 0));
    assert_eq!(table.last().expect("last").close, 375.79);
    assert_eq!(table.last().expect("last").volume, 20_830_047.0);
}

#[test]
fn rate_limit_note_is_unexpected_schema() {
    let body = fixture("rate_limit.json");
    match parse_response(&body, &SeriesKind::intraday()) {
        Err(FetchError::UnexpectedSchema { raw }) => assert_eq!(raw, body),
        other => panic!("expected UnexpectedSchema, got {other:?}"),
    }
}

#[test]
fn invalid_symbol_is_unexpected_schema() {
    let result = parse_response(&fixture("invalid_symbol.json"), &SeriesKind::intraday());
    assert!(matches!(result, Err(FetchError::UnexpectedSchema { .. })));
}

#[test]
fn wrong_series_key_is_unexpected_schema() {
    // a daily payload read as intraday lacks "Time Series (5min)"
    let result = parse_response(&fixture("daily.json"), &SeriesKind::intraday());
    assert!(matches!(result, Err(FetchError::UnexpectedSchema { .. })));
}

#[test]
fn unparsable_number_is_malformed_row() {
    match parse_response(&fixture("malformed_row.json"), &SeriesKind::daily()) {
        Err(FetchError::MalformedRow {
            timestamp, field, ..
        }) => {
            assert_eq!(timestamp, "2024-01-02");
            assert_eq!(field, "high");
        }
        other => panic!("expected MalformedRow, got {other:?}"),
    }
}

#[test]
fn empty_series_is_an_empty_table() {
    let table = parse_response(r#"{"Time Series (Daily)": {}}"#, &SeriesKind::daily())
        .expect("parse");
    assert!(table.is_empty());
}
