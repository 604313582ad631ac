//! Settings for one run of the client, taken from the command line and `STAMPS_*` variables.

use std::path::PathBuf;
use std::time::Duration;

use crate::args::Args;

/// Directory under `$HOME` used when no home is given
pub const DEFAULT_HOME_DIR: &str = ".stamps";

#[derive(thiserror::Error, Debug, Eq, PartialEq)]
pub enum ConfigError {
    #[error("invalid server URL '{0}': must start with http:// or https://")]
    InvalidServer(String),

    #[error("{field} must be greater than zero")]
    ZeroDuration { field: &'static str },

    #[error("no home directory given and $HOME is not set")]
    NoHome,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ClientConfig {
    pub server: String,
    pub home: PathBuf,
    pub timeout: Duration,
    pub idle_timeout: Duration,
    pub time_format: String,
    pub zulu: bool,
}

impl ClientConfig {
    /// Builds a configuration from parsed arguments and checks it.
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let home = match &args.home {
            Some(home) => PathBuf::from(home),
            None => default_home(std::env::var_os("HOME").map(PathBuf::from))?,
        };

        let config = Self {
            server: args.server.trim().to_string(),
            home,
            timeout: Duration::from_secs(args.timeout),
            idle_timeout: Duration::from_secs(args.idle_timeout.saturating_mul(60)),
            time_format: args.time_format.clone(),
            zulu: args.zulu,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.server.starts_with("http://") || self.server.starts_with("https://")) {
            return Err(ConfigError::InvalidServer(self.server.clone()));
        }

        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroDuration { field: "timeout" });
        }

        if self.idle_timeout.is_zero() {
            return Err(ConfigError::ZeroDuration {
                field: "idle timeout",
            });
        }

        Ok(())
    }
}

fn default_home(user_home: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    user_home
        .map(|home| home.join(DEFAULT_HOME_DIR))
        .ok_or(ConfigError::NoHome)
}
