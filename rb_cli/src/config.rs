//! Runner configuration management.
//!
//! Command-line flags take precedence over environment variables, which
//! take precedence over defaults.

use std::path::PathBuf;

/// Title used when no tournament name is given
pub const DEFAULT_TOURNAMENT_NAME: &str = "Roulette Battle Tournament";

/// Complete runner configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Path to the `name,slots` roster file
    pub roster_path: PathBuf,
    /// Title printed above the bracket
    pub tournament_name: String,
    /// Seed for reproducible brackets and draws
    pub seed: Option<u64>,
    /// Play every match without waiting for Enter
    pub auto_play: bool,
    /// Print the final bracket as JSON
    pub json: bool,
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub roster_path: Option<PathBuf>,
    pub tournament_name: Option<String>,
    pub seed: Option<u64>,
    pub auto_play: bool,
    pub json: bool,
}

impl CliConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns error if the roster is not given or a variable is malformed
    pub fn from_env(overrides: CliOverrides) -> Result<Self, ConfigError> {
        Self::from_lookup(overrides, |key| std::env::var(key).ok())
    }

    /// Load configuration reading variables through `lookup`
    pub fn from_lookup<F>(overrides: CliOverrides, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let roster_path = overrides
            .roster_path
            .or_else(|| lookup("RB_ROSTER").map(PathBuf::from))
            .ok_or_else(|| ConfigError::MissingRequired {
                var: "RB_ROSTER".to_string(),
                hint: "Pass --roster FILE with one `name,slots` row per line".to_string(),
            })?;

        let tournament_name = overrides
            .tournament_name
            .or_else(|| lookup("RB_TOURNAMENT_NAME"))
            .unwrap_or_else(|| DEFAULT_TOURNAMENT_NAME.to_string());

        let seed = match overrides.seed {
            Some(seed) => Some(seed),
            None => parse_var(&lookup, "RB_SEED")?,
        };

        let auto_play = overrides.auto_play || parse_flag(&lookup, "RB_AUTO_PLAY")?;

        Ok(CliConfig {
            roster_path,
            tournament_name,
            seed,
            auto_play,
            json: overrides.json,
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.roster_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                var: "RB_ROSTER".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }

        if self.tournament_name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                var: "RB_TOURNAMENT_NAME".to_string(),
                reason: "Please enter a tournament name".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {var}\nHint: {hint}")]
    MissingRequired { var: String, hint: String },

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
                var: key.to_string(),
                reason: format!("'{raw}': {e}"),
            })
        })
        .transpose()
}

fn parse_flag<F>(lookup: &F, key: &str) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|v| v.trim().to_lowercase()) {
        None => Ok(false),
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "" | "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid {
                var: key.to_string(),
                reason: format!("'{v}' is not a boolean"),
            }),
        },
    }
}
