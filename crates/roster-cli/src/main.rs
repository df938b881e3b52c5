//! roster - log into the roster site and print your shifts.
//!
//! Reads the site description from the config file, logs in with
//! credentials from the environment, keychain or a prompt, then prints the
//! shifts on the schedule page as text or JSON.

mod config;
mod credentials;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use roster_core::{RosterClient, Schedule};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use config::Config;
use credentials::SystemCredentials;

const USAGE: &str = "\
Usage: roster [OPTIONS]

Log into the roster site and print your shifts.

Options:
  --config <PATH>  Config file (default: ~/.config/roster-scrape/config.json)
  --json           Print the schedule as JSON
  --remember       Save the password in the OS keychain after a successful login
  --forget         Remove the saved password for the last username and exit
  -h, --help       Show this help

Credentials come from ROSTER_USERNAME / ROSTER_PASSWORD (a .env file works),
the keychain, or an interactive prompt. Set RUST_LOG=debug for request logs.";

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    config: Option<PathBuf>,
    json: bool,
    remember: bool,
    forget: bool,
    help: bool,
}

fn parse_args<I>(args: I) -> Result<Args>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = Args::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => parsed.json = true,
            "--remember" => parsed.remember = true,
            "--forget" => parsed.forget = true,
            "-h" | "--help" => parsed.help = true,
            "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config needs a path"))?;
                parsed.config = Some(PathBuf::from(path));
            }
            other => anyhow::bail!("Unknown argument: {}\n\n{}", other, USAGE),
        }
    }

    Ok(parsed)
}

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn print_schedule(schedule: &Schedule, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(schedule)?);
        return Ok(());
    }

    if let Some(ref heading) = schedule.heading {
        println!("{}\n", heading);
    }
    if schedule.is_empty() {
        println!("No shifts found.");
        return Ok(());
    }
    for shift in &schedule.shifts {
        println!("{}", shift);
    }

    println!(
        "\n{} shift(s), {:.1} hours",
        schedule.shifts.len(),
        schedule.total_hours()
    );
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = parse_args(std::env::args().skip(1))?;
    if args.help {
        println!("{}", USAGE);
        return Ok(());
    }

    init_tracing();

    let config_path = match args.config {
        Some(path) => path,
        None => Config::default_path()?,
    };
    let mut config = Config::load(&config_path)?;

    if args.forget {
        let username = credentials::forget(&SystemCredentials, config.last_username.as_deref())?;
        eprintln!("Removed saved password for {}", username);
        return Ok(());
    }

    let creds = credentials::resolve(&SystemCredentials, config.last_username.as_deref())?;

    let mut client = RosterClient::new(config.site.clone())?;
    client.login(&creds).await.context("Login failed")?;

    if args.remember {
        if let Err(e) = credentials::remember(&SystemCredentials, &creds) {
            warn!(error = %e, "Failed to store credentials");
        }
    }
    if config.last_username.as_deref() != Some(creds.username.as_str()) {
        config.last_username = Some(creds.username.clone());
        if let Err(e) = config.save(&config_path) {
            warn!(error = %e, "Failed to save config");
        }
    }

    let schedule = client
        .fetch_schedule()
        .await
        .context("Failed to fetch shifts")?;
    info!(count = schedule.shifts.len(), "Done");

    print_schedule(&schedule, args.json)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_no_args() {
        assert_eq!(args(&[]).unwrap(), Args::default());
    }

    #[test]
    fn test_parse_flags() {
        let parsed = args(&["--json", "--config", "/tmp/site.json", "--remember"]).unwrap();
        assert!(parsed.json);
        assert!(parsed.remember);
        assert!(!parsed.forget);
        assert_eq!(parsed.config, Some(PathBuf::from("/tmp/site.json")));
    }

    #[test]
    fn test_parse_errors() {
        assert!(args(&["--config"]).is_err());
        assert!(args(&["--verbose"]).is_err());
    }
}
