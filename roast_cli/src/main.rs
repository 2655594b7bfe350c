//! Roast telemetry CLI: replay profile CSVs through the session engine and
//! browse the JSONL roast log.

mod cli;
mod replay;

use std::path::{Path, PathBuf};

use clap::Parser;
use eyre::{Result, WrapErr};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use roast_config::Config;
use roast_core::{SessionCfg, format_time};
use roast_store::JsonlStore;
use roast_traits::LogStore;

const DEFAULT_LOG_FILE: &str = "roasts.jsonl";

/// Console logging to stderr; RUST_LOG wins over the CLI/config level.
fn init_tracing(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(p) => {
            let text = std::fs::read_to_string(p)
                .wrap_err_with(|| format!("read config {}", p.display()))?;
            let cfg = roast_config::load_toml(&text)
                .wrap_err_with(|| format!("parse config {}", p.display()))?;
            cfg.validate()?;
            Ok(cfg)
        }
        None => Ok(Config::default()),
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    let level = cli
        .log_level
        .clone()
        .or_else(|| config.logging.level.clone())
        .unwrap_or_else(|| "info".to_owned());
    let json = cli.json || config.logging.json;
    init_tracing(&level, json);

    let log_file = cli
        .log_file
        .clone()
        .or_else(|| config.store.log_file.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));
    let mut store = JsonlStore::new(log_file);

    match cli.cmd {
        Commands::Replay {
            profile,
            title,
            date,
            weight_g,
            save,
        } => {
            if !(weight_g.is_finite() && weight_g > 0.0) {
                eyre::bail!("--weight-g must be positive");
            }
            let rows = roast_config::load_profile_csv(&profile)?;
            tracing::debug!(path = %profile.display(), rows = rows.len(), "profile loaded");
            let session_cfg = SessionCfg {
                ror_window_secs: config.session.ror_window_secs,
                target_dtr_pct: config.session.target_dtr_pct,
                yellow_temp_c: config.session.yellow_temp_c,
            };
            let session = replay::replay_profile(&rows, session_cfg)?;
            let date =
                date.unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());
            if save {
                session
                    .save(&mut store, &date, &title, weight_g)
                    .wrap_err("append to roast log")?;
            }
            let summary = replay::summarize(&session, &title, &date);
            println!("{}", serde_json::to_string(&summary)?);
        }
        Commands::List => {
            let summaries = store.list().map_err(|e| eyre::eyre!("list roast log: {e}"))?;
            if json {
                for s in &summaries {
                    println!("{}", serde_json::to_string(s)?);
                }
            } else if summaries.is_empty() {
                println!("no stored roasts");
            } else {
                for s in &summaries {
                    println!(
                        "{:>3}  {}  {}  dtr {:>5.1}%  {}",
                        s.id,
                        s.date,
                        format_time(u64::from(s.duration)),
                        s.dtr,
                        s.title
                    );
                }
            }
        }
        Commands::Show { id } => match store.get(id).map_err(|e| eyre::eyre!("read roast log: {e}"))? {
            Some(roast) => println!("{}", serde_json::to_string(&roast)?),
            None => eyre::bail!("no roast with id {id}"),
        },
    }
    Ok(())
}
