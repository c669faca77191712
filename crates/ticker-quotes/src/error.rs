use thiserror::Error;

/// Longest slice of a raw payload echoed back in an error message.
const EXCERPT_LEN: usize = 200;

/// Failures of a single quote fetch.
///
/// Every non-success payload from the provider (rate limit notice, unknown symbol, anything
/// else without the series key) is reported as [`FetchError::UnexpectedSchema`].
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to reach the quote provider: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("response is missing the expected series: {}", excerpt(.raw))]
    UnexpectedSchema { raw: String },

    #[error("malformed row at {timestamp}: field `{field}` {reason}")]
    MalformedRow {
        timestamp: String,
        field: &'static str,
        reason: String,
    },
}

impl FetchError {
    /// A single line fit to show in place of the data view.
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "Could not reach the quote provider. Try again later.",
            FetchError::UnexpectedSchema { .. } => {
                "Could not fetch data. Check the symbol or API limits."
            }
            FetchError::MalformedRow { .. } => "The quote provider returned unreadable data.",
        }
    }
}

/// Failures loading [`Config`](crate::Config) from the environment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("environment variable {name} is invalid: {reason}")]
    InvalidVar { name: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

fn excerpt(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.char_indices().nth(EXCERPT_LEN) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_truncates_long_payloads() {
        let err = FetchError::UnexpectedSchema {
            raw: "x".repeat(1_000),
        };
        let msg = err.to_string();
        assert!(msg.ends_with("..."));
        assert!(msg.len() < 300);
    }

    #[test]
    fn schema_error_keeps_short_payloads() {
        let err = FetchError::UnexpectedSchema {
            raw: r#"{"Note": "rate limit"}"#.to_string(),
        };
        assert!(err.to_string().contains(r#"{"Note": "rate limit"}"#));
        assert_eq!(
            err.user_message(),
            "Could not fetch data. Check the symbol or API limits."
        );
    }
}
