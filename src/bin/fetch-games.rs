use anyhow::{Context, bail};
use bdl_api::client::BallDontLieApi;
use bdl_api::schedule::DEFAULT_SCHEDULE_PATH;
use chrono::Utc;
use log::{debug, info};
use std::path::{Path, PathBuf};

const API_KEY_ENV: &str = "BALLDONTLIE_API_KEY";

/// What to fetch and where to write it.
#[derive(Debug, Clone, PartialEq)]
struct FetchConfig {
    team: String,
    name_hint: String,
    /// balldontlie season year; 2025 is the 2025-26 season.
    season: i32,
    out: PathBuf,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            team: "LAC".into(),
            name_hint: "Clippers".into(),
            season: 2025,
            out: PathBuf::from(DEFAULT_SCHEDULE_PATH),
        }
    }
}

enum Command {
    Fetch(FetchConfig),
    Help,
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match parse_args(std::env::args().skip(1))? {
        Command::Help => {
            println!("{}", usage_text());
            return Ok(());
        }
        Command::Version => {
            println!("fetch-games {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Command::Fetch(config) => config,
    };

    let api_key = api_key(std::env::var(API_KEY_ENV).ok())?;
    let api = BallDontLieApi::new(api_key);

    debug!("fetching {config:?}");
    let schedule = api
        .fetch_home_schedule(&config.team, &config.name_hint, config.season, Utc::now())
        .await?;

    write_schedule(&config.out, &serde_json::to_string_pretty(&schedule)?)?;
    info!(
        "Wrote {} home games to {}",
        schedule.home_games.len(),
        config.out.display()
    );
    Ok(())
}

fn api_key(raw: Option<String>) -> anyhow::Result<String> {
    match raw.map(|k| k.trim().to_owned()).filter(|k| !k.is_empty()) {
        Some(key) => Ok(key),
        None => bail!("Missing {API_KEY_ENV}"),
    }
}

fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<Command> {
    let mut config = FetchConfig::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        let mut value = || args.next().with_context(|| format!("{arg} needs a value"));
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            "--team" => config.team = value()?,
            "--name" => config.name_hint = value()?,
            "--season" => {
                let raw = value()?;
                config.season = raw
                    .parse()
                    .with_context(|| format!("--season expects a year, got {raw:?}"))?;
            }
            "--out" => config.out = PathBuf::from(value()?),
            _ => bail!("Unknown argument: {arg}\n\n{}", usage_text()),
        }
    }
    Ok(Command::Fetch(config))
}

fn write_schedule(out: &Path, json: &str) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create dir {} failed", parent.display()))?;
    }
    std::fs::write(out, json).with_context(|| format!("write {} failed", out.display()))
}

fn usage_text() -> &'static str {
    "fetch-games - write a team's home schedule to games.json

Usage:
  fetch-games [--team <ABBR>] [--name <NAME>] [--season <YEAR>] [--out <PATH>]
  fetch-games --help
  fetch-games --version

Defaults: --team LAC --name Clippers --season 2025 --out data/games.json

Environment:
  BALLDONTLIE_API_KEY   balldontlie API key (required; .env is read if present)
  RUST_LOG              Log filter (default info)"
}
