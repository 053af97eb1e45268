// Command-line entry point for pyast-json.

use anyhow::Context;
use clap::Parser;
use pyast_json::{run_file, BuildOptions, OutputFormat};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Python source file to convert
    path: PathBuf,

    /// Pretty-print the JSON document
    #[arg(long)]
    pretty: bool,

    /// Fill `type_comment` from `# type:` comments
    #[arg(long)]
    type_comments: bool,

    /// Suppress fallback diagnostics and the missing-kind report
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    // RUST_LOG=pyast_json=debug shows parse and conversion summaries
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let options = BuildOptions {
        type_comments: cli.type_comments,
    };
    let format = if cli.pretty {
        OutputFormat::Pretty
    } else {
        OutputFormat::Compact
    };

    let report = run_file(&cli.path, &options, format)
        .with_context(|| format!("failed to convert {}", cli.path.display()))?;

    let stderr = io::stderr();
    let mut err = stderr.lock();
    if !cli.quiet {
        for line in &report.diagnostics {
            writeln!(err, "{}", line)?;
        }
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", report.json)?;
    out.flush()?;

    if !cli.quiet {
        err.write_all(report.missing.report().as_bytes())?;
    }

    Ok(())
}
