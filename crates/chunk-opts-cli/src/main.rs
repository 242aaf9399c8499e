//! chunk-opts - rewrite the knitr chunk options of an R Markdown file.
//!
//! # Usage
//!
//! ```bash
//! chunk-opts report.Rmd --echo FALSE --fig-width 6
//! chunk-opts report.Rmd --message false --in-place
//! chunk-opts report.Rmd --print-baseline
//! ```

use anyhow::Result;
use clap::Parser;

use chunk_opts_cli::{Cli, run};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    run(&cli, &mut std::io::stdout().lock())
}
