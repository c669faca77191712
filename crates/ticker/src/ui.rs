use chrono::NaiveTime;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use ticker_quotes::{QuoteRow, QuoteTable};

pub fn spinner(msg: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} {msg} [{elapsed_precise}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Render the latest `n` rows of `table`; closes are green when up on the previous row, red
/// when down.
pub fn preview(table: &QuoteTable, n: usize) -> String {
    let rows = table.tail(n);
    let date_only = table.iter().all(|row| row.timestamp.time() == NaiveTime::MIN);

    let mut out = format!(
        "{:<19} {:>12} {:>12} {:>12} {:>12} {:>14}\n",
        "", "Open", "High", "Low", "Close", "Volume"
    )
    .bold()
    .to_string();

    // the row before the preview window, so the first close also gets a colour
    let start = table.len() - rows.len();
    let mut previous: Option<&QuoteRow> = start.checked_sub(1).map(|i| &table.rows()[i]);

    for row in rows {
        let stamp = if date_only {
            row.timestamp.format("%Y-%m-%d").to_string()
        } else {
            row.timestamp.format("%Y-%m-%d %H:%M").to_string()
        };
        let close = format!("{:>12.4}", row.close);
        let close = match previous {
            Some(prev) if row.close > prev.close => close.green(),
            Some(prev) if row.close < prev.close => close.red(),
            _ => close.normal(),
        };
        out.push_str(&format!(
            "{:<19} {:>12.4} {:>12.4} {:>12.4} {} {:>14.0}\n",
            stamp, row.open, row.high, row.low, close, row.volume
        ));
        previous = Some(row);
    }

    out
}
