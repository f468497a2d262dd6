use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use bump_version::cli::{Cli, Command, ConfigCommand, LiveClient, OperationOutcome, WriteStatus};
use bump_version::config::{ConfigFormat, JSON_FILE_NAME};
use bump_version::logging::{self, LoggingOptions};
use bump_version::ui;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let globals = cli.command.globals();
    logging::init(&LoggingOptions::new(cli.command.name(), globals.verbose));

    if let Err(e) = run(&cli.command) {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }
    Ok(())
}

fn run(command: &Command) -> Result<()> {
    let globals = command.globals();
    let options = globals.shared_options(command.name())?;
    let client = LiveClient::live(options.project_directory.clone());

    match command {
        Command::Build(_) => report(client.build(&options)?),
        Command::Generate(_) => report(client.generate(&options)?),
        Command::Bump { bump, .. } => report(client.bump(Some(bump.kind()), &options)?),
        Command::Config(ConfigCommand::Dump { toml, .. }) => {
            let configuration = client.parsed_configuration(&options)?;
            let format = if *toml {
                ConfigFormat::Toml
            } else {
                ConfigFormat::Json
            };
            print!("{}", format.encode(&configuration)?);
        }
        Command::Config(ConfigCommand::Generate { style, print, .. }) => {
            let configuration = globals.generated_configuration(*style)?;
            if *print {
                print!("{}", ConfigFormat::Json.encode(&configuration)?);
                return Ok(());
            }

            let path = globals.configuration_file.clone().unwrap_or_else(|| {
                options
                    .project_directory
                    .clone()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(JSON_FILE_NAME)
            });
            let written = client.write_configuration(&configuration, &path)?;
            println!("{}", written.display());
        }
    }

    Ok(())
}

fn report(outcome: OperationOutcome) {
    for warning in &outcome.warnings {
        ui::display_warning(warning);
    }

    match outcome.status {
        WriteStatus::Written => {
            ui::display_success(&ui::format_written(&outcome.path, Some(&outcome.version)));
        }
        WriteStatus::DryRun => ui::display_dry_run(&outcome.path, &outcome.contents),
        WriteStatus::Unchanged => {
            ui::display_status(&format!("Version {} unchanged", outcome.version));
        }
    }
    println!("{}", outcome.path.display());
}
