//! Startup tasks: logger initialisation and storage folder creation.

use anstyle::{AnsiColor, Style};
use anyhow::{Context, Result};
use env_logger::{Builder, WriteStyle};
use log::info;
use log::kv::Key;
use std::fs;
use std::io::Write;
use std::path::Path;

// ────────────────────────────────────────────────────────────────
// Folder Initialization
// ────────────────────────────────────────────────────────────────

/// Create the uploads directory. The server cannot store anything without it, so the
/// caller treats an error as fatal.
pub fn initialize_folder(upload_dir: &Path) -> Result<()> {
    fs::create_dir_all(upload_dir)
        .with_context(|| format!("Could not create uploads directory {}", upload_dir.display()))?;
    info!("Storing uploads in {}", upload_dir.display());
    Ok(())
}

// ────────────────────────────────────────────────────────────────
// Logger Initialization
// ────────────────────────────────────────────────────────────────

/// Render the `duration` key-value with two decimals and a space before the unit,
/// e.g. `1.234567ms` becomes `1.23 ms`.
fn format_duration(raw: &str) -> String {
    if let Some(idx) = raw.find(char::is_alphabetic) {
        let (num, unit) = (&raw[..idx], &raw[idx..]);
        if let Ok(val) = num.parse::<f32>() {
            return format!("{:.2} {}", val, unit);
        }
    }
    raw.to_string()
}

pub fn initialize_logger() {
    let dim = Style::new().fg_color(Some(AnsiColor::BrightBlack.into()));
    let cyan = Style::new().fg_color(Some(AnsiColor::Cyan.into()));

    Builder::new()
        .write_style(WriteStyle::Auto)
        .format(move |buf, record| {
            let ts = buf.timestamp();

            let level_style = buf.default_level_style(record.level());
            let lvl = format!(
                "{}{}{}",
                level_style.render(),
                record.level(),
                level_style.render_reset()
            );

            let dur_raw = record
                .key_values()
                .get(Key::from("duration"))
                .map(|v| format_duration(&v.to_string()))
                .unwrap_or_default();

            // Pad the duration column to width 10 so messages line up
            let dur = if dur_raw.is_empty() {
                " ".repeat(10)
            } else {
                format!("{cyan}{:>10}{cyan:#}", dur_raw)
            };

            writeln!(buf, "{dim}{ts}{dim:#} {lvl} {dim}{}{dim:#}", record.target())?;

            let message = format!("{}", record.args());
            let subsequent_indent = " ".repeat(11);
            let mut lines = message.lines();

            if let Some(first_line) = lines.next() {
                writeln!(buf, "{} {}", dur, first_line)?;
            }
            for line in lines {
                writeln!(buf, "{}{}", subsequent_indent, line)?;
            }

            Ok(())
        })
        // INFO+ globally, WARN+ for Rocket; RUST_LOG overrides both
        .filter(None, log::LevelFilter::Info)
        .filter(Some("rocket"), log::LevelFilter::Warn)
        .parse_default_env()
        .init();
}
