use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// A terminal login form
#[derive(Debug, Parser)]
#[clap(version)]
pub struct Config {
    /// Where should we write logs?
    #[clap(long)]
    log_dir: Option<PathBuf>,

    /// Start with this email filled in
    #[clap(long)]
    pub email: Option<String>,

    /// Run a one-off command instead of the form
    #[clap(subcommand)]
    pub command: Option<Command>,
}

/// Non-interactive commands
#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Validate one JSON value from stdin and print the result as JSON.
    /// Exits 0 if it passed and 1 if it didn't.
    Check,
}

impl Config {
    /// Get either the configured or a default log directory. If no data
    /// directory can be found (e.g. because `$HOME` is unset) we will use the
    /// current directory.
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .or_else(|| {
                directories::ProjectDirs::from("", "", "login")
                    .map(|dirs| dirs.data_local_dir().join("logs"))
            })
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_valid() {
        Config::command().debug_assert();
    }

    #[test]
    fn no_arguments_opens_the_form() {
        let config = Config::try_parse_from(["login"]).unwrap();

        assert_eq!(config.command, None);
        assert_eq!(config.email, None);
    }

    #[test]
    fn email_prefill() {
        let config = Config::try_parse_from(["login", "--email", "user@example.com"]).unwrap();

        assert_eq!(config.email.as_deref(), Some("user@example.com"));
    }

    #[test]
    fn check_subcommand() {
        let config = Config::try_parse_from(["login", "check"]).unwrap();

        assert_eq!(config.command, Some(Command::Check));
    }

    #[test]
    fn explicit_log_dir_wins() {
        let config = Config::try_parse_from(["login", "--log-dir", "/tmp/login-logs"]).unwrap();

        assert_eq!(config.log_dir(), PathBuf::from("/tmp/login-logs"));
    }
}
