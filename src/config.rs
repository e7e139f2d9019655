use crate::consts;
use serde::Deserialize;
use std::num::NonZeroU64;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(try_from = "RawConfig")]
pub(crate) struct Config {
    /// Number of rows on the board
    pub(crate) rows: u16,

    /// Number of columns on the board
    pub(crate) columns: u16,

    /// Milliseconds between movements of the snake
    pub(crate) tick_ms: NonZeroU64,

    /// File to write debug logs to.  No logs are written if this is not set.
    pub(crate) log_file: Option<PathBuf>,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("gridsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    pub(crate) fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms.get())
    }
}

impl Default for Config {
    fn default() -> Config {
        Config {
            rows: consts::DEFAULT_ROWS,
            columns: consts::DEFAULT_COLUMNS,
            tick_ms: consts::DEFAULT_TICK_MS,
            log_file: None,
        }
    }
}

/// [`Config`] as written in the file, before `~` in paths is expanded
#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawConfig {
    rows: u16,
    columns: u16,
    tick_ms: NonZeroU64,
    log_file: Option<String>,
}

impl Default for RawConfig {
    fn default() -> RawConfig {
        RawConfig {
            rows: consts::DEFAULT_ROWS,
            columns: consts::DEFAULT_COLUMNS,
            tick_ms: consts::DEFAULT_TICK_MS,
            log_file: None,
        }
    }
}

impl TryFrom<RawConfig> for Config {
    type Error = std::io::Error;

    fn try_from(value: RawConfig) -> Result<Config, std::io::Error> {
        Ok(Config {
            rows: value.rows,
            columns: value.columns,
            tick_ms: value.tick_ms,
            log_file: value.log_file.map(expanduser::expanduser).transpose()?,
        })
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn parse_empty() {
        let cfg = toml::from_str::<Config>("").expect("empty config should parse");
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.tick_period(), Duration::from_millis(200));
    }

    #[test]
    fn parse_full() {
        let cfg = toml::from_str::<Config>(concat!(
            "rows = 10\n",
            "columns = 24\n",
            "tick-ms = 120\n",
            "log-file = \"/tmp/gridsnake.log\"\n",
        ))
        .expect("config should parse");
        assert_eq!(
            cfg,
            Config {
                rows: 10,
                columns: 24,
                tick_ms: NonZeroU64::new(120).expect("120 is nonzero"),
                log_file: Some(PathBuf::from("/tmp/gridsnake.log")),
            }
        );
        assert_eq!(cfg.tick_period(), Duration::from_millis(120));
    }

    #[test]
    fn parse_partial() {
        let cfg = toml::from_str::<Config>("columns = 40\n").expect("config should parse");
        assert_eq!(cfg.columns, 40);
        assert_eq!(cfg.rows, consts::DEFAULT_ROWS);
        assert_eq!(cfg.tick_ms, consts::DEFAULT_TICK_MS);
    }

    #[test]
    fn parse_log_file_in_home() {
        let cfg = toml::from_str::<Config>("log-file = \"~/gridsnake.log\"\n")
            .expect("config should parse");
        let path = cfg.log_file.expect("log file should be set");
        assert!(path.is_absolute(), "{} is not absolute", path.display());
        assert!(path.ends_with("gridsnake.log"));
        assert!(!path.starts_with("~"));
    }

    #[test]
    fn parse_zero_tick() {
        assert!(toml::from_str::<Config>("tick-ms = 0\n").is_err());
    }

    #[test]
    fn load_file() {
        let tmpdir = tempdir().expect("tempdir should be created");
        let path = tmpdir.path().join("config.toml");
        fs_err::write(&path, "rows = 8\n").expect("config should be written");
        let cfg = Config::load(&path, false).expect("config should load");
        assert_eq!(cfg.rows, 8);
        assert_eq!(cfg.columns, consts::DEFAULT_COLUMNS);
    }

    #[test]
    fn load_missing_allowed() {
        let tmpdir = tempdir().expect("tempdir should be created");
        let cfg = Config::load(&tmpdir.path().join("nope.toml"), true)
            .expect("missing config should be allowed");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn load_missing_not_allowed() {
        let tmpdir = tempdir().expect("tempdir should be created");
        let r = Config::load(&tmpdir.path().join("nope.toml"), false);
        assert!(matches!(r, Err(ConfigError::Read(_))));
    }

    #[test]
    fn load_invalid() {
        let tmpdir = tempdir().expect("tempdir should be created");
        let path = tmpdir.path().join("config.toml");
        fs_err::write(&path, "rows = \"many\"\n").expect("config should be written");
        let r = Config::load(&path, false);
        assert!(matches!(r, Err(ConfigError::Parse(_))));
    }
}
