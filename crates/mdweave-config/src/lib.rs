use mdweave_engine::{ParseOptions, RenderOptions};
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file {0} does not exist")]
    Missing(PathBuf),

    #[error("Failed to read config file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Parse and render options as stored on disk.
///
/// ```toml
/// [parse]
/// inline_math_allow_digit_after_open = true
///
/// [parse.custom_emoji]
/// party = "~/emoji/party.png"
///
/// [render]
/// heading_anchor = true
/// ```
///
/// Every key is optional; missing ones keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub parse: ParseOptions,
    pub render: RenderOptions,
}

impl Config {
    /// `~/.config/mdweave/config.toml`
    pub fn default_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/mdweave");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Loads `explicit`, which has to exist, or else the file at
    /// [`default_path`](Self::default_path) when there is one. With
    /// neither, every option keeps its default.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = explicit.map_or_else(Self::default_path, Path::to_path_buf);
        log::debug!("Config path: {}", path.display());

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return match explicit {
                    Some(_) => Err(ConfigError::Missing(path)),
                    None => Ok(Self::default()),
                };
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };
        Self::from_toml(&content).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Parses config text. Custom emoji targets that are not URLs get `~`
    /// and environment variables expanded.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        let mut config: Config = toml::from_str(content)?;
        for target in config.parse.custom_emoji.values_mut() {
            if let Some(expanded) = expand_path(target) {
                *target = expanded;
            }
        }
        Ok(config)
    }
}

fn expand_path(target: &str) -> Option<String> {
    if target.contains("://") {
        return None;
    }
    shellexpand::full(target)
        .ok()
        .map(|expanded| expanded.into_owned())
}
