// blackbranch: review-clean automatic black formatting
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> sentinel gate --> Command Dispatch
//!   Format | ClearError | Options | Version | PushWorker (hidden)
//!
//! Ctrl-C / SIGTERM --> CancellationToken --> rollback inside the workflow
//! ```
//!
//! The gate runs for every command except `clear-error` (which exists to
//! lift it) and the internal worker (which reports through the store).

use std::process::ExitCode;

use blackbranch::cli::global::GlobalOptions;
use blackbranch::cli::{self, Command};
use blackbranch::cmd::config::run_options_command;
use blackbranch::cmd::format::{run_format_command, run_push_worker_command, shutdown_token};
use blackbranch::cmd::sentinel::{ensure_unblocked, run_clear_error_command};
use blackbranch::config::Config;
use blackbranch::config::loader::ConfigLoader;
use blackbranch::logging::init_logging;
use blackbranch::logging::{LogConfig, LogLevel};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let log_config = build_log_config(&cli.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli).await
}

fn build_log_config(global: &GlobalOptions) -> LogConfig {
    let console_level = if global.quiet {
        // Failures always print; everything else is suppressed
        LogLevel::ERROR
    } else {
        global
            .log_level
            .and_then(LogLevel::from_u8)
            .unwrap_or(LogLevel::INFO)
    };

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(console_level);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(global.log_file.as_ref().map(|p| p.display().to_string()))
        .build()
}

async fn dispatch_command(cli: &cli::Cli) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => gated_config(&cli.global).map(|_| handle_version_command()),
        Some(Command::Options) => {
            gated_config(&cli.global).map(|config| run_options_command(&config))
        }
        Some(Command::ClearError) => {
            load_config(&cli.global).and_then(|config| run_clear_error_command(&config))
        }
        Some(Command::Format(args)) => match gated_config(&cli.global) {
            Ok(config) => match shutdown_token() {
                Ok(cancel) => run_format_command(args, &config, &cancel).await,
                Err(e) => Err(e),
            },
            Err(e) => Err(e),
        },
        Some(Command::PushWorker) => run_push_worker_command().await,
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Loads the merged configuration, then refuses to continue while an
/// unresolved error record blocks the repository.
fn gated_config(global: &GlobalOptions) -> blackbranch::error::Result<Config> {
    let config = load_config(global)?;
    let cwd = std::env::current_dir()?;
    ensure_unblocked(&cwd, &config)?;
    Ok(config)
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> blackbranch::error::Result<ConfigLoader> {
    let mut loader = ConfigLoader::new();
    if !global.no_default_config {
        loader = loader.add_toml_file_optional("blackbranch.toml");
    }
    for config_path in &global.configs {
        loader = loader.add_toml_file(config_path);
    }
    loader = loader.with_env_prefix("BLACKBRANCH");
    for option in global.to_config_overrides() {
        let Some((key, value)) = option.split_once('=') else {
            anyhow::bail!("invalid --set option '{option}', expected KEY=VALUE");
        };
        loader = loader.set(key, value)?;
    }
    Ok(loader)
}

fn load_config(global: &GlobalOptions) -> blackbranch::error::Result<Config> {
    let loader = build_config_loader(global)?;
    loader.build().map_err(|e| {
        eprintln!("Failed to load config: {e}");
        e
    })
}
