//! Fetch OHLCV quotes from Alpha Vantage, resample them, and export them as CSV.
//!
//! ```no_run
//! use ticker_quotes::{aggregate, AlphaVantage, Config, Granularity, SeriesKind};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let client = AlphaVantage::new(Config::from_env()?)?;
//! let table = client.fetch("AAPL", SeriesKind::intraday()).await?;
//! let daily = aggregate(&table, Granularity::Daily);
//! ticker_quotes::export::write_csv(&daily, std::io::stdout())?;
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod config;
pub mod error;
pub mod export;
pub mod schema;
pub mod symbols;
pub mod table;

pub use crate::aggregate::{aggregate, Granularity};
pub use crate::config::Config;
pub use crate::error::{ConfigError, ExportError, FetchError};
pub use crate::schema::alpha_vantage::{parse_response, AlphaVantage, SeriesPayload};
pub use crate::table::{Interval, OutputSize, QuoteRow, QuoteTable, SeriesKind};
