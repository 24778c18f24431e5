use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;

use hunkscan_core::TOOL_NAME;
use hunkscan_core::config::ScanConfig;
use hunkscan_core::fd::load_fd_dir;
use hunkscan_core::inspect;
use hunkscan_core::report::render;

mod args;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = args::Args::parse();
    let mut out = io::stdout().lock();

    if args.files.is_empty() {
        writeln!(out, "Usage: {TOOL_NAME} <file1> [file2...]").context("failed to write usage")?;
        return Ok(());
    }

    let config = ScanConfig::from_env();
    let (symbols, summary) = load_fd_dir(&config);
    if !summary.dir_found {
        writeln!(out, "No descriptor directory found: {}", config.fd_dir.display())
            .context("failed to write output")?;
    }
    log::debug!(
        "loaded {} descriptor entries from {} files ({} distinct offsets)",
        summary.entries,
        summary.files_read,
        symbols.len()
    );

    for path in &args.files {
        let report = match inspect(path, &symbols) {
            Ok(report) => report,
            Err(e) => {
                log::debug!("{e:?}");
                writeln!(out, "{e}").context("failed to write output")?;
                continue;
            }
        };

        write!(out, "{}", render::render_text(&report))
            .and_then(|()| writeln!(out, "{}", render::summary_line(&report)))
            .with_context(|| format!("failed to write report for {}", path.display()))?;
    }

    out.flush().context("failed to flush output")?;
    Ok(())
}
