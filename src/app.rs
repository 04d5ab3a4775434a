//! Command dispatch for the CLI

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::check::report::{render_outcomes, render_reports};
use crate::check::runner::{Checker, build_registries, check_tools, update_tools};
use crate::check::worker::RefreshWorker;
use crate::cli::{Cli, Command};
use crate::config::{self, Config};
use crate::tool::installer::CommandExecutor;
use crate::tool::probe::CommandProbe;
use crate::tool::types::RemoteSource;

/// Environment variable consulted when no GitHub token is configured
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

pub async fn run(cli: Cli) -> Result<ExitCode> {
    let config_path = cli.config.unwrap_or_else(config::config_path);
    let config = load_config(config_path)?;

    let command = cli.command.unwrap_or(Command::Check {
        tools: Vec::new(),
        json: false,
    });

    match command {
        Command::Check { tools, json } => check(&config, &tools, json).await,
        Command::Update { tools, force, json } => update(&config, &tools, force, json).await,
        Command::List => {
            println!("{}", render_tool_list(&config));
            Ok(ExitCode::SUCCESS)
        }
        Command::Watch { tools, interval } => {
            watch(&config, &tools, Duration::from_secs(interval.max(1))).await
        }
    }
}

fn load_config(path: PathBuf) -> Result<Config> {
    let mut config =
        Config::load(&path).with_context(|| format!("Failed to load config {:?}", path))?;
    info!("Loaded config from {:?} ({} tools)", path, config.tools.len());

    if config.registries.github.token.is_none() {
        config.registries.github.token = std::env::var(GITHUB_TOKEN_ENV).ok();
    }

    Ok(config)
}

fn probe(config: &Config) -> CommandProbe {
    CommandProbe::new(config.install_dir.clone(), config.timeouts.probe())
}

async fn check(config: &Config, names: &[String], json: bool) -> Result<ExitCode> {
    let tools = config.select_tools(names)?;
    let registries = build_registries(config)?;

    let reports = check_tools(&probe(config), &registries, &tools).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        println!("{}", render_reports(&reports));
    }
    Ok(ExitCode::SUCCESS)
}

async fn update(config: &Config, names: &[String], force: bool, json: bool) -> Result<ExitCode> {
    let tools = config.select_tools(names)?;
    let registries = build_registries(config)?;
    let executor = CommandExecutor::new(config.install_dir.clone(), config.timeouts.install());

    let reports = check_tools(&probe(config), &registries, &tools).await;
    let outcomes = update_tools(&executor, &tools, &reports, force).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
    } else {
        println!("{}", render_reports(&reports));
        println!();
        println!("{}", render_outcomes(&outcomes));
    }

    if outcomes.iter().all(|o| o.success) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

async fn watch(config: &Config, names: &[String], interval: Duration) -> Result<ExitCode> {
    let tools = config.select_tools(names)?;
    let checker = Checker::new(
        Arc::new(probe(config)),
        build_registries(config)?,
        tools,
    );
    let mut handle = RefreshWorker::spawn(Arc::new(checker));
    let mut ticker = tokio::time::interval(interval);

    info!("Watching for updates every {:?}", interval);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if handle.is_pending() {
                    debug!("Previous refresh still running, skipping tick");
                } else {
                    handle.request_refresh()?;
                }
            }
            outcome = handle.next_current() => {
                let Some(outcome) = outcome else {
                    warn!("Refresh worker stopped unexpectedly");
                    return Ok(ExitCode::FAILURE);
                };
                println!("{}\n", render_reports(&outcome.reports));
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping watch");
                return Ok(ExitCode::SUCCESS);
            }
        }
    }
}

/// One line per configured tool: name, binary, source, installer
pub fn render_tool_list(config: &Config) -> String {
    config
        .tools
        .values()
        .map(|tool| {
            let source = match &tool.source {
                RemoteSource::Github(repo) => format!("github:{}", repo),
                RemoteSource::Pypi(package) => format!("pypi:{}", package),
            };
            let install = tool
                .install
                .as_ref()
                .map(|i| format!("{} {}", i.program, i.args.join(" ")))
                .unwrap_or_else(|| "-".to_string());
            format!("{}\t{}\t{}\t{}", tool.name, tool.binary, source, install.trim_end())
        })
        .collect::<Vec<_>>()
        .join("\n")
}
