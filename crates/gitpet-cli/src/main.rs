//! `git-pet`: a virtual pet that lives in your git repository.
//!
//! Each invocation is one load, compute, save cycle:
//!
//! 1. Parse the command line
//! 2. Resolve the state directory (`GIT_PET_HOME` or the user config dir)
//! 3. Load `git-pet.yaml` and initialize logging
//! 4. Run the command through a [`PetSession`]
//! 5. Print the report
//!
//! Only rejected user input ends in a non-zero exit. Storage and git
//! problems are logged and the pet carries on with what it has.

mod cli;
mod render;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use gitpet_core::{LoggingConfig, PetSession, PetSettings};
use gitpet_git::GitInspector;
use gitpet_store::{JsonStateStore, default_state_dir};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, ConfigCommand};

/// Overrides the state directory.
const HOME_ENV: &str = "GIT_PET_HOME";

/// Overrides the log filter.
const LOG_ENV: &str = "GIT_PET_LOG";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if the command was given invalid input or its output
/// could not be written.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let home = std::env::var_os(HOME_ENV).map(PathBuf::from);
    let state_dir = default_state_dir(home.as_deref())?;

    let (settings, settings_error) = PetSettings::load_or_default(&state_dir);
    init_tracing(
        &settings.logging,
        cli.verbose,
        std::env::var(LOG_ENV).ok(),
    );
    if let Some(e) = settings_error {
        warn!(error = %e, "ignoring unusable settings file, using defaults");
    }
    debug!(state_dir = %state_dir.display(), "starting");

    let store = JsonStateStore::in_dir(&state_dir);
    let inspector = GitInspector::new(settings.git);
    let mut session = PetSession::new(store, inspector, settings.tuning);

    run(&mut session, cli.command.unwrap_or(Command::Status)).await
}

/// Dispatch one command and print its report.
async fn run(
    session: &mut PetSession<JsonStateStore, GitInspector>,
    command: Command,
) -> anyhow::Result<()> {
    let now = Utc::now();
    let mut out = io::stdout();
    match command {
        Command::Status => {
            let report = session.status(now).await?;
            render::status(&mut out.lock(), &report)?;
        }
        Command::Summary => {
            let report = session.summary(now).await?;
            render::summary(&mut out.lock(), &report, now)?;
        }
        Command::Feed => render::fed(&mut out.lock(), &session.feed(now)?)?,
        Command::Play => render::played(&mut out.lock(), &session.play(now)?)?,
        Command::Name { name } => {
            let report = session
                .rename(&name.join(" "), now)
                .context("could not rename the pet")?;
            render::renamed(&mut out.lock(), &report)?;
        }
        Command::Achievements => {
            render::achievements(&mut out.lock(), &session.achievements(now)?)?;
        }
        Command::Config(ConfigCommand::Get { key }) => {
            let value = session.config_get(&key, now)?;
            render::config_value(&mut out.lock(), &key, value)?;
        }
        Command::Config(ConfigCommand::Set { key, value }) => {
            let (value, saved) = session.config_set(&key, &value, now)?;
            render::config_set(&mut out.lock(), &key, value, saved)?;
        }
        Command::Config(ConfigCommand::List) => {
            render::config_list(&mut out.lock(), &session.config_list(now)?)?;
        }
        Command::React { event, args } => {
            let report = session.process_event(&event, args.as_slice(), now)?;
            render::event(&mut out.lock(), &report)?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Initialize structured logging on stderr.
///
/// The filter comes from `GIT_PET_LOG` when set, otherwise `debug` under
/// `--verbose`, otherwise the settings file's level.
fn init_tracing(logging: &LoggingConfig, verbose: bool, env_filter: Option<String>) {
    let directive = env_filter.unwrap_or_else(|| {
        if verbose {
            String::from("debug")
        } else {
            logging.level.clone()
        }
    });
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
