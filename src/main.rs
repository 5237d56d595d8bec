use anyhow::Result;
use clap::{Arg, ArgAction, Command};

use rigmon::commands;
use rigmon::ui;

fn endpoint_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("url")
                .short('u')
                .long("url")
                .value_name("URL")
                .help("Base URL of the telemetry server (overrides config)"),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .value_name("MS")
                .help("Request timeout in milliseconds (overrides config)")
                .value_parser(clap::value_parser!(u64)),
        )
}

fn build_cli() -> Command {
    Command::new("rigmon")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Terminal dashboard for a rig telemetry endpoint")
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('v')
                .short_alias('V')
                .long("version")
                .help("Print version information")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            endpoint_args(
                Command::new("watch")
                    .about("Poll the endpoint and show a live dashboard")
                    .arg(
                        Arg::new("interval")
                            .short('i')
                            .long("interval")
                            .value_name("MS")
                            .help("Refresh interval in milliseconds (overrides config)")
                            .value_parser(clap::value_parser!(u64)),
                    )
                    .arg(
                        Arg::new("plain")
                            .long("plain")
                            .help("Print one status line per refresh instead of the TUI")
                            .action(ArgAction::SetTrue),
                    ),
            ),
        )
        .subcommand(
            endpoint_args(
                Command::new("snapshot")
                    .about("Fetch the endpoint once and print the result")
                    .arg(
                        Arg::new("json")
                            .long("json")
                            .help("Print the decoded snapshot as JSON")
                            .action(ArgAction::SetTrue),
                    ),
            ),
        )
        .subcommand(
            Command::new("config")
                .about("Show or change saved settings (use 'rigmon config --help' for subcommands)")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(Command::new("show").about("Show the current configuration"))
                .subcommand(
                    Command::new("set")
                        .about("Change a setting")
                        .subcommand_required(true)
                        .arg_required_else_help(true)
                        .subcommand(
                            Command::new("url").about("Set the telemetry server base URL").arg(
                                Arg::new("value")
                                    .help("Base URL, e.g. http://192.168.1.20:5000")
                                    .required(true)
                                    .index(1),
                            ),
                        )
                        .subcommand(
                            Command::new("interval")
                                .about("Set the refresh interval in milliseconds")
                                .arg(
                                    Arg::new("value")
                                        .required(true)
                                        .index(1)
                                        .value_parser(clap::value_parser!(u64)),
                                ),
                        )
                        .subcommand(
                            Command::new("timeout")
                                .about("Set the request timeout in milliseconds")
                                .arg(
                                    Arg::new("value")
                                        .required(true)
                                        .index(1)
                                        .value_parser(clap::value_parser!(u64)),
                                ),
                        ),
                )
                .subcommand(
                    Command::new("reset")
                        .about("Restore default settings")
                        .arg(
                            Arg::new("yes")
                                .short('y')
                                .long("yes")
                                .help("Skip the confirmation prompt")
                                .action(ArgAction::SetTrue),
                        ),
                ),
        )
        .subcommand(Command::new("version").about("Shows version information"))
        .subcommand(
            Command::new("completions")
                .about("Generate shell completions")
                .arg(
                    Arg::new("shell")
                        .help("Shell to generate completions for (bash, zsh, fish, powershell, elvish)")
                        .required(true)
                        .index(1),
                ),
        )
}

fn setup_logging(matches: &clap::ArgMatches) {
    // The TUI owns the terminal, so its logs go to a file
    if let Some(("watch", sub_matches)) = matches.subcommand() {
        if !sub_matches.get_flag("plain") {
            if let Some(path) = rigmon::default_log_path() {
                if rigmon::init_file_logging(&path).is_ok() {
                    return;
                }
            }
        }
    }
    rigmon::init_logging();
}

fn run(matches: &clap::ArgMatches) -> Result<()> {
    if matches.get_flag("version") {
        return commands::version();
    }

    match matches.subcommand() {
        Some(("watch", sub_matches)) => commands::watch::execute(sub_matches),
        Some(("snapshot", sub_matches)) => commands::snapshot::execute(sub_matches),
        Some(("config", sub_matches)) => commands::config::execute(sub_matches),
        Some(("version", _)) => commands::version(),
        Some(("completions", sub_matches)) => {
            commands::completions::execute(sub_matches, &mut build_cli())
        }
        _ => {
            println!("Welcome to rigmon!");
            println!("Use 'rigmon watch' to open the dashboard or 'rigmon --help' for more information.");
            Ok(())
        }
    }
}

fn main() {
    let matches = build_cli().get_matches();
    setup_logging(&matches);

    if let Err(e) = run(&matches) {
        ui::error(&format!("Error: {:#}", e));
        std::process::exit(1);
    }
}
