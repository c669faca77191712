/// Tickers offered by the dashboard.
///
/// This is currently maintained manually.
pub const PRESETS: [&str; 5] = ["AAPL", "MSFT", "GOOGL", "AMZN", "TSLA"];

/// Whether `symbol` is one of the [`PRESETS`], ignoring case and surrounding whitespace.
pub fn is_preset(symbol: &str) -> bool {
    let symbol = symbol.trim();
    PRESETS.iter().any(|preset| preset.eq_ignore_ascii_case(symbol))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_match_case_insensitively() {
        assert!(is_preset("aapl"));
        assert!(is_preset(" TSLA "));
        assert!(!is_preset("IBM"));
        assert!(!is_preset(""));
    }
}
