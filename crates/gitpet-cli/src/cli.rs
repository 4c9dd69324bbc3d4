//! Command-line surface.

use clap::{Parser, Subcommand};

/// A virtual pet that lives in your git repository.
#[derive(Debug, Parser)]
#[command(name = "git-pet", version, about)]
pub struct Cli {
    /// Log at debug level unless `GIT_PET_LOG` says otherwise.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// What to do (default: status).
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show how the pet is feeling.
    Status,

    /// Show stats, progress, and repository details.
    Summary,

    /// Feed the pet.
    Feed,

    /// Play with the pet.
    Play,

    /// Give the pet a new name.
    Name {
        /// The new name, 1 to 50 characters.
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// List unlocked and locked achievements.
    Achievements,

    /// Read or change options.
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Entry point for git hooks.
    #[command(hide = true)]
    React {
        /// Hook event, e.g. `post-commit`.
        event: String,

        /// Event flags, e.g. `--changes`.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

/// `config` subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print one option.
    Get {
        /// Option name, e.g. `checkRemoteStatus`.
        key: String,
    },

    /// Change one option.
    Set {
        /// Option name.
        key: String,
        /// New value (`true` or `false`).
        value: String,
    },

    /// Print every option.
    List,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_status() {
        let cli = Cli::try_parse_from(["git-pet"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn react_keeps_hyphenated_flags() {
        let cli =
            Cli::try_parse_from(["git-pet", "react", "branch-deleted", "--was-old", "--was-merged"])
                .unwrap();
        match cli.command {
            Some(Command::React { event, args }) => {
                assert_eq!(event, "branch-deleted");
                assert_eq!(args, vec!["--was-old", "--was-merged"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn name_joins_words() {
        let cli = Cli::try_parse_from(["git-pet", "name", "Sir", "Commits-a-lot"]).unwrap();
        match cli.command {
            Some(Command::Name { name }) => assert_eq!(name.join(" "), "Sir Commits-a-lot"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn config_set_takes_key_and_value() {
        let cli =
            Cli::try_parse_from(["git-pet", "-v", "config", "set", "checkRemoteStatus", "true"])
                .unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Some(Command::Config(ConfigCommand::Set { ref key, ref value }))
                if key == "checkRemoteStatus" && value == "true"
        ));
    }
}
