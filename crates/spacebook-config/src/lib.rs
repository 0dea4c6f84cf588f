//! Configuration and credential storage.
//!
//! Configuration is a TOML file of named profiles (base URL, TLS and
//! timeout knobs) merged with `SPACEBOOK_*` environment variables.
//! Tokens live in the OS keyring, one entry per profile, with an
//! environment-variable escape hatch for CI.

mod store;

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use store::KeyringTokenStore;

/// Environment variable that bypasses the keyring entirely.
pub const TOKEN_ENV_VAR: &str = "SPACEBOOK_TOKEN";

const CONFIG_FILE: &str = "config.toml";
const DEFAULT_BASE_URL: &str = "http://localhost:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine a configuration directory for this platform")]
    NoConfigDir,

    #[error("could not read configuration: {0}")]
    Read(#[from] figment::Error),

    #[error("could not write configuration to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("profile '{0}' is not defined")]
    UnknownProfile(String),
}

/// Connection settings for one backend instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    pub base_url: String,
    /// Accept invalid TLS certificates (self-hosted dev instances).
    #[serde(default)]
    pub insecure: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            insecure: false,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// The whole configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "default_profile_name")]
    pub default_profile: String,
    #[serde(default)]
    pub profiles: std::collections::BTreeMap<String, Profile>,
}

fn default_profile_name() -> String {
    "default".to_owned()
}

impl Default for Config {
    fn default() -> Self {
        let mut profiles = std::collections::BTreeMap::new();
        profiles.insert(default_profile_name(), Profile::default());
        Self {
            default_profile: default_profile_name(),
            profiles,
        }
    }
}

impl Config {
    /// Resolve a profile by name, or the configured default.
    pub fn profile(&self, name: Option<&str>) -> Result<(&str, &Profile), ConfigError> {
        let name = name.unwrap_or(&self.default_profile);
        self.profiles
            .get(name)
            .map(|p| (name, p))
            .ok_or_else(|| ConfigError::UnknownProfile(name.to_owned()))
    }
}

/// Platform config file location, e.g. `~/.config/spacebook/config.toml`.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let dirs = directories::ProjectDirs::from("", "", "spacebook")
        .ok_or(ConfigError::NoConfigDir)?;
    Ok(dirs.config_dir().join(CONFIG_FILE))
}

/// Load configuration from `path`, layered under `SPACEBOOK_*`
/// environment variables. A missing file yields the defaults.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("SPACEBOOK_").split("__"))
        .extract()?;
    debug!(path = %path.display(), "loaded configuration");
    Ok(config)
}

/// Load from the platform location; defaults when the file is absent.
pub fn load_config_or_default() -> Result<Config, ConfigError> {
    load_config_from(&config_path()?)
}

/// Persist `config` to `path`, creating parent directories.
pub fn save_config_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    let rendered = toml::to_string_pretty(config)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: path.to_owned(),
            source,
        })?;
    }
    std::fs::write(path, rendered).map_err(|source| ConfigError::Write {
        path: path.to_owned(),
        source,
    })?;
    debug!(path = %path.display(), "saved configuration");
    Ok(())
}

/// Persist `config` to the platform location.
pub fn save_config(config: &Config) -> Result<(), ConfigError> {
    save_config_to(config, &config_path()?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        figment::Jail::expect_with(|jail| {
            let config = load_config_from(&jail.directory().join("nope.toml")).unwrap();
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn file_and_env_layer_over_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                default_profile = "staging"

                [profiles.staging]
                base_url = "https://staging.spacebook.test"
                timeout_secs = 10
                "#,
            )?;
            jail.set_env("SPACEBOOK_DEFAULT_PROFILE", "staging");

            let config = load_config_from(Path::new("config.toml")).unwrap();
            let (name, profile) = config.profile(None).unwrap();
            assert_eq!(name, "staging");
            assert_eq!(profile.base_url, "https://staging.spacebook.test");
            assert_eq!(profile.timeout_secs, 10);
            assert!(!profile.insecure);
            Ok(())
        });
    }

    #[test]
    fn unknown_profile_is_an_error() {
        let config = Config::default();
        assert!(matches!(
            config.profile(Some("nope")),
            Err(ConfigError::UnknownProfile(ref name)) if name == "nope"
        ));
    }

    #[test]
    fn save_and_reload_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.profiles.insert(
            "prod".into(),
            Profile {
                base_url: "https://spacebook.example.com".into(),
                insecure: false,
                timeout_secs: 60,
            },
        );
        save_config_to(&config, &path).unwrap();

        let reloaded = load_config_from(&path).unwrap();
        assert_eq!(reloaded.profiles["prod"].timeout_secs, 60);
    }
}
