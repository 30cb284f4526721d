//! Configuration loading and typed config structures for GameStream.
//!
//! The optional configuration file is `gamestream-config.yaml`. Every field
//! has a default, and the defaults reproduce the reference demonstration
//! run exactly: 1000 events over the four-player roster, a three-event
//! preview, ten Fibonacci terms and five primes.

use std::path::Path;

use gamestream_types::{GameAction, PlayerProfile};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;

use crate::aggregate::{DEFAULT_HIGH_LEVEL_THRESHOLD, DEFAULT_PREVIEW_COUNT};
use crate::producer::{self, GameTables, StreamError};

/// Environment variable that overrides `stream.event_count`.
pub const EVENT_COUNT_ENV: &str = "GAMESTREAM_EVENT_COUNT";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The event count override is not a non-negative integer.
    #[error("invalid event count {value:?}: must be a non-negative integer")]
    InvalidEventCount {
        /// The rejected value.
        value: String,
    },

    /// The action table names an action that does not exist.
    #[error("unknown action in action table: {name}")]
    InvalidAction {
        /// The unrecognized action name.
        name: String,
    },

    /// The configured log level is not a recognized level name.
    #[error("invalid log level {value:?}: expected trace, debug, info, warn, error, or off")]
    InvalidLogLevel {
        /// The rejected value.
        value: String,
    },

    /// The configured roster or action table cannot drive a stream.
    #[error("invalid stream tables: {source}")]
    Tables {
        /// The underlying table error.
        #[from]
        source: StreamError,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level GameStream configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GameStreamConfig {
    /// Event stream and aggregation settings.
    #[serde(default)]
    pub stream: StreamConfig,

    /// Sequence generator prefix lengths.
    #[serde(default)]
    pub sequences: SequenceConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Report output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

impl GameStreamConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `GAMESTREAM_EVENT_COUNT` overrides `stream.event_count` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::InvalidEventCount`] if the override is malformed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, then apply environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::InvalidEventCount`] if the override is malformed.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config = Self::parse_without_env(yaml)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string, ignoring the environment.
    ///
    /// An empty document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::InvalidLogLevel`] if `logging.level` is unrecognized.
    pub fn parse_without_env(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        config.logging.level_filter()?;
        Ok(config)
    }

    /// Apply overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEventCount`] if `GAMESTREAM_EVENT_COUNT`
    /// is set but is not a non-negative integer.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides using `lookup` to resolve variable names.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEventCount`] if the event count
    /// override is not a non-negative integer.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(EVENT_COUNT_ENV) {
            self.stream.event_count = parse_event_count(&raw)?;
        }
        Ok(())
    }
}

/// Event stream and aggregation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StreamConfig {
    /// Number of events requested from the producer.
    #[serde(default = "default_event_count")]
    pub event_count: u64,

    /// Number of leading events reported individually.
    #[serde(default = "default_preview_count")]
    pub preview_count: u64,

    /// Player level at or above which an event counts as high-level.
    #[serde(default = "default_high_level_threshold")]
    pub high_level_threshold: u32,

    /// Ordered player roster, used cyclically.
    #[serde(default = "producer::reference_roster")]
    pub roster: Vec<PlayerProfile>,

    /// Ordered action names, used cyclically.
    #[serde(default = "default_actions")]
    pub actions: Vec<String>,
}

impl StreamConfig {
    /// Build the producer tables described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidAction`] for an unknown action name, or
    /// [`ConfigError::Tables`] if the roster or action table is empty.
    pub fn tables(&self) -> Result<GameTables, ConfigError> {
        let actions = parse_actions(&self.actions)?;
        Ok(GameTables::new(self.roster.clone(), actions)?)
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            event_count: default_event_count(),
            preview_count: default_preview_count(),
            high_level_threshold: default_high_level_threshold(),
            roster: producer::reference_roster(),
            actions: default_actions(),
        }
    }
}

/// Prefix lengths pulled from the infinite generators.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SequenceConfig {
    /// Number of Fibonacci terms to print.
    #[serde(default = "default_fibonacci_count")]
    pub fibonacci_count: usize,

    /// Number of primes to print.
    #[serde(default = "default_prime_count")]
    pub prime_count: usize,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            fibonacci_count: default_fibonacci_count(),
            prime_count: default_prime_count(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON log lines instead of the human-readable format.
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    /// Resolve the configured level into a tracing filter.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLogLevel`] if the level is not a
    /// recognized name.
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.level
            .trim()
            .parse::<LevelFilter>()
            .map_err(|_err| ConfigError::InvalidLogLevel {
                value: self.level.clone(),
            })
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Report output configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    /// How the runner prints the report.
    #[serde(default)]
    pub format: OutputFormat,
}

/// Report rendering style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The console layout of the reference demonstration.
    #[default]
    Text,
    /// A single JSON object.
    Json,
}

/// Parse a non-negative event count.
fn parse_event_count(raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_err| ConfigError::InvalidEventCount {
            value: raw.to_owned(),
        })
}

/// Parse action names into typed [`GameAction`] values.
///
/// Accepts the snake-case key (`found_treasure`) or the display text
/// (`found treasure`), case-insensitively.
fn parse_actions(names: &[String]) -> Result<Vec<GameAction>, ConfigError> {
    names
        .iter()
        .map(|name| {
            let normalized = name.trim().to_lowercase().replace(' ', "_");
            GameAction::ALL
                .into_iter()
                .find(|action| action.key() == normalized)
                .ok_or_else(|| ConfigError::InvalidAction { name: name.clone() })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Default value functions for serde
// ---------------------------------------------------------------------------

const fn default_event_count() -> u64 {
    1000
}

const fn default_preview_count() -> u64 {
    DEFAULT_PREVIEW_COUNT
}

const fn default_high_level_threshold() -> u32 {
    DEFAULT_HIGH_LEVEL_THRESHOLD
}

fn default_actions() -> Vec<String> {
    GameAction::ALL
        .iter()
        .map(|action| action.key().to_owned())
        .collect()
}

const fn default_fibonacci_count() -> usize {
    10
}

const fn default_prime_count() -> usize {
    5
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_reference_run() {
        let config = GameStreamConfig::default();
        assert_eq!(config.stream.event_count, 1000);
        assert_eq!(config.stream.preview_count, 3);
        assert_eq!(config.stream.high_level_threshold, 10);
        assert_eq!(config.stream.roster.len(), 4);
        assert_eq!(config.sequences.fibonacci_count, 10);
        assert_eq!(config.sequences.prime_count, 5);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert_eq!(config.stream.tables().unwrap(), GameTables::reference());
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
stream:
  event_count: 50
  preview_count: 5
  high_level_threshold: 12
  roster:
    - name: "eve"
      level: 30
    - name: "frank"
      level: 1
  actions:
    - leveled_up
    - "found treasure"
sequences:
  fibonacci_count: 20
  prime_count: 8
logging:
  level: "debug"
  json: true
output:
  format: json
"#;
        let config = GameStreamConfig::parse_without_env(yaml).unwrap();
        assert_eq!(config.stream.event_count, 50);
        assert_eq!(config.stream.preview_count, 5);
        assert_eq!(config.stream.high_level_threshold, 12);
        assert_eq!(
            config.stream.roster,
            vec![PlayerProfile::new("eve", 30), PlayerProfile::new("frank", 1)]
        );
        assert_eq!(config.sequences.fibonacci_count, 20);
        assert_eq!(config.sequences.prime_count, 8);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
        assert_eq!(config.output.format, OutputFormat::Json);

        let tables = config.stream.tables().unwrap();
        assert_eq!(
            tables.actions(),
            [GameAction::LeveledUp, GameAction::FoundTreasure]
        );
    }

    #[test]
    fn parse_minimal_yaml() {
        let config = GameStreamConfig::parse_without_env("stream:\n  event_count: 7\n").unwrap();
        assert_eq!(config.stream.event_count, 7);
        assert_eq!(config.stream.roster, producer::reference_roster());
        assert_eq!(config.sequences, SequenceConfig::default());
    }

    #[test]
    fn parse_empty_yaml() {
        let config = GameStreamConfig::parse_without_env("").unwrap();
        assert_eq!(config, GameStreamConfig::default());
    }

    #[test]
    fn negative_event_count_in_yaml_is_rejected() {
        let result = GameStreamConfig::parse_without_env("stream:\n  event_count: -5\n");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn env_override_replaces_event_count() {
        let mut config = GameStreamConfig::default();
        config
            .apply_overrides_from(|key| (key == EVENT_COUNT_ENV).then(|| " 250 ".to_owned()))
            .unwrap();
        assert_eq!(config.stream.event_count, 250);
    }

    #[test]
    fn env_override_accepts_zero() {
        let mut config = GameStreamConfig::default();
        config.apply_overrides_from(|_| Some("0".to_owned())).unwrap();
        assert_eq!(config.stream.event_count, 0);
    }

    #[test]
    fn negative_env_override_is_rejected() {
        let mut config = GameStreamConfig::default();
        let result = config.apply_overrides_from(|_| Some("-1".to_owned()));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidEventCount { ref value }) if value == "-1"
        ));
        assert_eq!(config.stream.event_count, 1000);
    }

    #[test]
    fn missing_env_override_keeps_value() {
        let mut config = GameStreamConfig::default();
        config.apply_overrides_from(|_| None).unwrap();
        assert_eq!(config.stream.event_count, 1000);
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let result = GameStreamConfig::parse_without_env("logging:\n  level: verbose\n");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidLogLevel { ref value }) if value == "verbose"
        ));
    }

    #[test]
    fn log_level_names_resolve_to_filters() {
        let config = GameStreamConfig::parse_without_env("logging:\n  level: DEBUG\n").unwrap();
        assert_eq!(config.logging.level_filter().unwrap(), LevelFilter::DEBUG);
        let config = GameStreamConfig::parse_without_env("logging:\n  level: \"off\"\n").unwrap();
        assert_eq!(config.logging.level_filter().unwrap(), LevelFilter::OFF);
        assert_eq!(
            LoggingConfig::default().level_filter().unwrap(),
            LevelFilter::INFO
        );
    }

    #[test]
    fn unknown_action_is_rejected() {
        let stream = StreamConfig {
            actions: vec!["danced".to_owned()],
            ..StreamConfig::default()
        };
        assert!(matches!(
            stream.tables(),
            Err(ConfigError::InvalidAction { ref name }) if name == "danced"
        ));
    }

    #[test]
    fn empty_tables_are_rejected() {
        let no_players = StreamConfig {
            roster: Vec::new(),
            ..StreamConfig::default()
        };
        assert!(matches!(
            no_players.tables(),
            Err(ConfigError::Tables {
                source: StreamError::EmptyRoster
            })
        ));

        let no_actions = StreamConfig {
            actions: Vec::new(),
            ..StreamConfig::default()
        };
        assert!(matches!(
            no_actions.tables(),
            Err(ConfigError::Tables {
                source: StreamError::EmptyActionTable
            })
        ));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("gamestream-config.yaml");
        if path.exists() {
            let config = GameStreamConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
