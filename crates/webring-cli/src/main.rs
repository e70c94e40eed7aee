// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod runtime;

use anyhow::{Context, Result, anyhow};
use config::Config;
use runtime::StoreRuntime;
use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use webring_app::AppState;
use webring_fetch::Client;
use webring_store::Store;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `webring --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;

    let db_path = config.db_path()?;
    if options.print_db_path {
        println!("{}", db_path.display());
        return Ok(());
    }

    match init_logging(&config) {
        Ok(log_path) => tracing::info!(
            version = env!("CARGO_PKG_VERSION"),
            log = %log_path.display(),
            "webring starting"
        ),
        Err(error) => eprintln!("logging disabled: {error:#}"),
    }

    let base_path = config.base_path(options.base_path.as_deref());
    let client = Client::new(&base_path, config.timeout()?).with_context(|| {
        format!(
            "invalid base path {base_path:?}; set --base-path, WEBRING_BASE_PATH, or [source].base_path"
        )
    })?;
    tracing::info!(
        location = %client.location(),
        timeout_ms = client.timeout().as_millis() as u64,
        db = %db_path.display(),
        "resolved sources"
    );

    let store = Store::open(&db_path).with_context(|| {
        format!(
            "open preference database {} -- if this path is wrong, set [storage].db_path or WEBRING_DB_PATH",
            db_path.display()
        )
    })?;
    store.bootstrap()?;

    if options.check_only {
        let catalog = client.load()?;
        println!("{} sites from {}", catalog.len(), client.location());
        return Ok(());
    }

    let mut state = AppState::default();
    let mut runtime = StoreRuntime::new(&store, client);
    let result = webring_tui::run_app(&mut state, &mut runtime);
    if let Err(error) = &result {
        tracing::error!(error = %format!("{error:#}"), "webring exited with an error");
    }
    result
}

/// Sends logs to `<data dir>/webring/webring.log`; the terminal belongs to
/// the UI. `WEBRING_LOG` takes a full filter and overrides `[log].level`.
fn init_logging(config: &Config) -> Result<PathBuf> {
    let log_path = webring_store::data_dir()?.join("webring.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("open log file {}", log_path.display()))?;

    let filter = match env::var("WEBRING_LOG") {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(&directives)
            .with_context(|| format!("invalid WEBRING_LOG filter {directives:?}"))?,
        _ => EnvFilter::try_new(config.log_directives()).context("build log filter")?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|error| anyhow!("install log subscriber: {error}"))?;
    Ok(log_path)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    base_path: Option<String>,
    print_config_path: bool,
    print_db_path: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        base_path: None,
        print_config_path: false,
        print_db_path: false,
        print_example: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--base-path" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--base-path requires a directory or http(s) URL"))?;
                options.base_path = Some(value.as_ref().to_owned());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-path" => {
                options.print_db_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("webring");
    println!("  --config <path>          Use a specific config path");
    println!("  --base-path <dir|url>    Where webring.json lives (default: current directory)");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-path             Print resolved preference database path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --check                  Load the catalog, print the site count, and exit");
    println!("  --help                   Show this help");
}
