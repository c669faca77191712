use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands::*, ShowArgs, TraceLevel};
use dotenv::dotenv;
use std::path::PathBuf;
use ticker_quotes::{aggregate, export, symbols, AlphaVantage, Config, Granularity};
use tracing::{debug, error, info, subscriber, trace, warn, Level};
use tracing_subscriber::FmtSubscriber;

mod cli;
mod ui;

fn preprocess(trace_level: Level) {
    dotenv().ok();
    let my_subscriber = FmtSubscriber::builder()
        .with_max_level(trace_level)
        .finish();
    subscriber::set_global_default(my_subscriber).expect("Set subscriber");
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.trace {
        TraceLevel::DEBUG => Level::DEBUG,
        TraceLevel::INFO => Level::INFO,
        TraceLevel::WARN => Level::WARN,
        TraceLevel::ERROR => Level::ERROR,
    };

    preprocess(log_level);
    trace!("Command line input recorded: {cli:#?}");

    // cli framework:
    // "> ticker <COMMAND>"
    match &cli.command {
        // "> ticker symbols"
        Symbols => {
            for symbol in symbols::PRESETS {
                println!("{symbol}");
            }
        }

        // "> ticker show AAPL [--series daily] [--granularity weekly] [--csv]"
        Show(args) => {
            if !show(args).await? {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Fetch, resample, preview and export one symbol; `Ok(false)` when the fetch failed and a
/// diagnostic was printed instead of the table.
async fn show(args: &ShowArgs) -> Result<bool> {
    let symbol = args.symbol.trim().to_uppercase();
    if !symbols::is_preset(&symbol) {
        warn!("{symbol} is not one of the preset symbols {:?}", symbols::PRESETS);
    }

    let config = Config::from_env()?;
    debug!("Loaded config: {config:?}");
    let client = AlphaVantage::new(config)?;
    let kind = args.series_kind();
    let granularity = Granularity::from(args.granularity);

    let pb = ui::spinner(format!("Fetching {symbol} ({})", kind.function()));
    let fetched = client.fetch(&symbol, kind).await;
    pb.finish_and_clear();

    let table = match fetched {
        Ok(table) => table,
        Err(e) => {
            error!("{symbol} fetch failed: {e}");
            eprintln!("{}", e.user_message());
            return Ok(false);
        }
    };

    let table = aggregate(&table, granularity);
    info!(
        "{symbol}: {} rows at {} granularity",
        table.len(),
        granularity.label()
    );

    println!("{symbol} - price data");
    print!("{}", ui::preview(&table, args.rows));

    if let Some(path) = &args.csv {
        let path = path
            .clone()
            .unwrap_or_else(|| PathBuf::from(export::default_file_name(&symbol)));
        let file = std::fs::File::create(&path)?;
        export::write_csv(&table, std::io::BufWriter::new(file))?;
        info!("CSV written to {}", path.display());
    }

    Ok(true)
}
