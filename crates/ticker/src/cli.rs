use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use ticker_quotes::{Granularity, Interval, OutputSize, SeriesKind};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Sets the level of tracing
    #[arg(long, default_value = "INFO", ignore_case = true)]
    pub trace: TraceLevel,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the preset stock tickers.
    Symbols,

    /// Fetch a symbol's quotes, preview the latest rows and optionally export them.
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Ticker symbol, e.g. AAPL.
    pub symbol: String,

    /// Which series to request.
    #[arg(long, value_enum, default_value_t = Series::Intraday)]
    pub series: Series,

    /// Minutes between intraday bars.
    #[arg(long, value_enum, default_value_t = Minutes::Five)]
    pub interval: Minutes,

    /// Request the full history instead of the provider's default window
    /// (intraday is compact by default, daily is always full).
    #[arg(long)]
    pub full: bool,

    /// Resample the fetched series.
    #[arg(long, value_enum, default_value_t = Resample::Native)]
    pub granularity: Resample,

    /// Number of most recent rows to preview.
    #[arg(long, default_value_t = 5)]
    pub rows: usize,

    /// Export the table as CSV; defaults to `<SYMBOL>_data.csv`.
    #[arg(long)]
    pub csv: Option<Option<PathBuf>>,
}

impl ShowArgs {
    pub fn series_kind(&self) -> SeriesKind {
        match self.series {
            Series::Intraday => SeriesKind::Intraday {
                interval: self.interval.into(),
                output_size: if self.full {
                    OutputSize::Full
                } else {
                    OutputSize::Compact
                },
            },
            Series::Daily => SeriesKind::daily(),
        }
    }
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Series {
    Intraday,
    Daily,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Minutes {
    #[value(name = "1")]
    One,
    #[value(name = "5")]
    Five,
    #[value(name = "15")]
    Fifteen,
    #[value(name = "30")]
    Thirty,
    #[value(name = "60")]
    Sixty,
}

impl From<Minutes> for Interval {
    fn from(minutes: Minutes) -> Self {
        match minutes {
            Minutes::One => Interval::Min1,
            Minutes::Five => Interval::Min5,
            Minutes::Fifteen => Interval::Min15,
            Minutes::Thirty => Interval::Min30,
            Minutes::Sixty => Interval::Min60,
        }
    }
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Resample {
    Native,
    Daily,
    Weekly,
    Monthly,
}

impl From<Resample> for Granularity {
    fn from(resample: Resample) -> Self {
        match resample {
            Resample::Native => Granularity::Native,
            Resample::Daily => Granularity::Daily,
            Resample::Weekly => Granularity::Weekly,
            Resample::Monthly => Granularity::Monthly,
        }
    }
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum TraceLevel {
    DEBUG,
    INFO,
    WARN,
    ERROR,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_defaults_to_compact_five_minute_bars() {
        let cli = Cli::try_parse_from(["ticker", "show", "AAPL"]).expect("parse");
        let Commands::Show(args) = cli.command else {
            panic!("expected show");
        };
        assert_eq!(args.series_kind(), SeriesKind::intraday());
        assert_eq!(args.rows, 5);
        assert_eq!(args.csv, None);
        assert_eq!(cli.trace, TraceLevel::INFO);
    }

    #[test]
    fn show_parses_every_option() {
        let cli = Cli::try_parse_from([
            "ticker",
            "--trace",
            "DEBUG",
            "show",
            "MSFT",
            "--series",
            "intraday",
            "--interval",
            "15",
            "--full",
            "--granularity",
            "weekly",
            "--rows",
            "10",
            "--csv",
            "out.csv",
        ])
        .expect("parse");
        let Commands::Show(args) = cli.command else {
            panic!("expected show");
        };
        assert_eq!(
            args.series_kind(),
            SeriesKind::Intraday {
                interval: Interval::Min15,
                output_size: OutputSize::Full,
            }
        );
        assert_eq!(Granularity::from(args.granularity), Granularity::Weekly);
        assert_eq!(args.csv, Some(Some(PathBuf::from("out.csv"))));
    }

    #[test]
    fn bare_csv_flag_means_default_name() {
        let cli = Cli::try_parse_from(["ticker", "show", "TSLA", "--series", "daily", "--csv"])
            .expect("parse");
        let Commands::Show(args) = cli.command else {
            panic!("expected show");
        };
        assert_eq!(args.series_kind(), SeriesKind::daily());
        assert_eq!(args.csv, Some(None));
    }
}
