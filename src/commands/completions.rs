use anyhow::{anyhow, Result};
use clap::{ArgMatches, Command};
use clap_complete::{generate, Shell};
use std::io;

const SUPPORTED_SHELLS: &str = "bash, zsh, fish, powershell, elvish";

/// Generate shell completions for the specified shell
pub fn execute(matches: &ArgMatches, cli: &mut Command) -> Result<()> {
    let shell_str = matches
        .get_one::<String>("shell")
        .ok_or_else(|| anyhow!("shell argument is required (supported: {})", SUPPORTED_SHELLS))?;

    let shell = parse_shell(shell_str).ok_or_else(|| {
        anyhow!(
            "Unsupported shell: {} (supported: {})",
            shell_str,
            SUPPORTED_SHELLS
        )
    })?;

    generate(shell, cli, "rigmon", &mut io::stdout());
    Ok(())
}

fn parse_shell(name: &str) -> Option<Shell> {
    match name.to_lowercase().as_str() {
        "bash" => Some(Shell::Bash),
        "zsh" => Some(Shell::Zsh),
        "fish" => Some(Shell::Fish),
        "powershell" => Some(Shell::PowerShell),
        "elvish" => Some(Shell::Elvish),
        _ => None,
    }
}
