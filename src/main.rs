use std::process::ExitCode;

use clap::Parser;
use toolsentry::cli::Cli;
use toolsentry::{app, config, logging};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let _guard = logging::init(&config::log_path(), cli.verbose)?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(app::run(cli))
}
