use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;

use crate::core::Config;
use crate::ui::{confirm, dimmed, info, success, warn};

pub fn execute(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("show", _)) => show(),
        Some(("set", sub_matches)) => handle_set(sub_matches),
        Some(("reset", sub_matches)) => reset(sub_matches.get_flag("yes")),
        _ => {
            println!("Use 'rigmon config --help' for more information.");
            Ok(())
        }
    }
}

fn show() -> Result<()> {
    let config = Config::load().context("Failed to load config")?;
    let path = Config::get_config_path()?;
    if !path.exists() {
        warn("No saved configuration yet, showing defaults");
    }

    println!("{}", "Rigmon configuration".white().bold());
    println!("  {:<16} {}", "Endpoint:", config.base_url.cyan());
    println!("  {:<16} {}ms", "Refresh:", config.refresh_ms);
    println!("  {:<16} {}ms", "Request timeout:", config.request_timeout_ms);
    println!();
    dimmed(&format!("Stored at {}", path.display()));

    Ok(())
}

fn handle_set(matches: &ArgMatches) -> Result<()> {
    let mut config = Config::load().context("Failed to load config")?;

    let message = match matches.subcommand() {
        Some(("url", sub_matches)) => {
            let url = sub_matches
                .get_one::<String>("value")
                .context("URL argument is required")?;
            config.set_base_url(url)?;
            format!("Endpoint set to: {}", config.base_url)
        }
        Some(("interval", sub_matches)) => {
            let ms = sub_matches
                .get_one::<u64>("value")
                .context("Interval argument is required")?;
            config.set_refresh_ms(*ms)?;
            format!("Refresh interval set to: {}ms", config.refresh_ms)
        }
        Some(("timeout", sub_matches)) => {
            let ms = sub_matches
                .get_one::<u64>("value")
                .context("Timeout argument is required")?;
            config.set_request_timeout_ms(*ms)?;
            format!("Request timeout set to: {}ms", config.request_timeout_ms)
        }
        _ => {
            println!("Use 'rigmon config set --help' for more information.");
            return Ok(());
        }
    };

    config.save().context("Failed to save config")?;
    success(&message);
    Ok(())
}

fn reset(skip_confirmation: bool) -> Result<()> {
    if !skip_confirmation && !confirm("Reset rigmon configuration to defaults? [y/N]")? {
        info("Reset cancelled.");
        return Ok(());
    }

    Config::default()
        .save()
        .context("Failed to save config")?;
    success("Configuration reset to defaults.");
    Ok(())
}
