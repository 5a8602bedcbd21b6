//! Settings that can be changed with a `knmi.toml` file.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{errors::KnmiDataErr, mode::DataMode};

/// Name of the configuration file looked for in the root of a store.
pub const CONFIG_FILE: &str = "knmi.toml";

/// Runtime configuration. Every field falls back to a built in default.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Endpoint for the per day data.
    pub day_url: String,
    /// Endpoint for the per hour data.
    pub hour_url: String,
    /// File name of the station reference file in the data directory.
    pub stations_file: String,
    /// File name of the csv export in the data directory.
    pub export_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            day_url: DataMode::Day.default_url().to_owned(),
            hour_url: DataMode::Hour.default_url().to_owned(),
            stations_file: "stations.csv".to_owned(),
            export_file: "per_hour_weather.csv".to_owned(),
        }
    }
}

impl Config {
    /// Load the configuration.
    ///
    /// An explicit path must exist. Without one, `knmi.toml` in `root` is used if present and
    /// the defaults otherwise.
    pub fn load(explicit: Option<&Path>, root: &Path) -> Result<Self, KnmiDataErr> {
        let path: PathBuf = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let in_root = root.join(CONFIG_FILE);
                if !in_root.is_file() {
                    log::debug!("no {} in {}, using defaults", CONFIG_FILE, root.display());
                    return Ok(Config::default());
                }
                in_root
            }
        };

        log::debug!("loading configuration from {}", path.display());
        let text = std::fs::read_to_string(&path)?;
        Self::from_toml(&text)
    }

    /// Parse the contents of a configuration file.
    pub fn from_toml(text: &str) -> Result<Self, KnmiDataErr> {
        Ok(toml::from_str(text)?)
    }

    /// The endpoint to download data in the given mode from.
    pub fn url(&self, mode: DataMode) -> &str {
        match mode {
            DataMode::Day => &self.day_url,
            DataMode::Hour => &self.hour_url,
        }
    }
}

#[cfg(test)]
mod unit {
    use super::*;

    use tempdir::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.url(DataMode::Hour), DataMode::Hour.default_url());
        assert_eq!(config.url(DataMode::Day), DataMode::Day.default_url());
    }

    #[test]
    fn test_partial_override() {
        let config = Config::from_toml("hour_url = \"http://localhost:8080/uur\"\n").unwrap();
        assert_eq!(config.url(DataMode::Hour), "http://localhost:8080/uur");
        assert_eq!(config.stations_file, "stations.csv");
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(matches!(
            Config::from_toml("hour_ulr = \"typo\"\n"),
            Err(KnmiDataErr::Config(_))
        ));
    }

    #[test]
    fn test_load_from_root() {
        let tmp = TempDir::new("knmi-data-test-config").unwrap();
        assert_eq!(Config::load(None, tmp.path()).unwrap(), Config::default());

        std::fs::write(tmp.path().join(CONFIG_FILE), "export_file = \"out.csv\"\n").unwrap();
        assert_eq!(Config::load(None, tmp.path()).unwrap().export_file, "out.csv");

        let missing = tmp.path().join("missing.toml");
        assert!(matches!(
            Config::load(Some(&missing), tmp.path()),
            Err(KnmiDataErr::IO(_))
        ));
    }
}
