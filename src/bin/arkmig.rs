use anyhow::{Context, Result};
use clap::Parser;
use std::io::{IsTerminal, Write};

use arkmig::cli::args::{CliArgs, ColorMode, OutputFormat};
use arkmig::cli::driver;
use arkmig::cli::reporter::{Reporter, render_json};

fn main() -> Result<()> {
    // Installs a subscriber only when ARKMIG_LOG or RUST_LOG is set
    arkmig::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;

    let color = match args.color {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::io::stdout().is_terminal(),
    };
    colored::control::set_override(color);

    let report = driver::run(&args, &cwd)?;

    let rendered = match args.format {
        OutputFormat::Json => {
            let mut json = render_json(&report, args.pretty).context("failed to encode report")?;
            json.push('\n');
            json
        }
        OutputFormat::Text => Reporter::new(color).render_report(&report),
    };
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .context("failed to write report")?;
    stdout.flush().context("failed to write report")?;

    std::process::exit(report.exit_code());
}
