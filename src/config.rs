use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::{
    fs::{read_to_string, write},
    io,
    path::{Path, PathBuf},
    sync::LazyLock,
};
use thiserror::Error;

pub static CONFIG_PATH: LazyLock<Option<PathBuf>> = LazyLock::new(|| {
    dirs::config_dir()
        .or_else(|| {
            warn!("can't find the system's config dir!");
            None
        })
        .map(|path| path.join("fit_cursors.toml"))
});

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("can't access {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("can't serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct Config {
    pub cursor: CursorConfig,
    pub plot: PlotConfig,
    pub demo: DemoConfig,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct CursorConfig {
    /// radius of the highlight circle at rest
    pub circle_radius: f32,
    /// scale of the highlight circle while hovered
    pub hover_scale: f32,
    /// distance from the panel edges the hovered circle keeps, in radii
    pub hover_margin: f32,
    /// width of the area around a cursor bar that reacts to the pointer
    pub grab_width: f32,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            circle_radius: 4.0,
            hover_scale: 2.0,
            hover_margin: 2.5,
            grab_width: 10.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct PlotConfig {
    pub fit_height: f32,
    pub residuals_height: f32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            fit_height: 320.0,
            residuals_height: 120.0,
        }
    }
}

/// Shape of the decay shown when no analysis is attached.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct DemoConfig {
    pub bins: usize,
    pub x_inc: f32,
    pub lifetime: f32,
    pub amplitude: f32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            bins: 256,
            x_inc: 0.048_828_125,
            lifetime: 2.5,
            amplitude: 1000.0,
        }
    }
}

impl Config {
    /// Reads the config file, writing the defaults there if it doesn't exist yet.
    /// Any failure is logged and the defaults are used.
    #[must_use]
    pub fn load() -> Self {
        let Some(path) = &*CONFIG_PATH else {
            return Self::default();
        };

        Self::read_from(path).unwrap_or_else(|err| {
            warn!("{err}, using the default config");
            Self::default()
        })
    }

    pub fn read_from(path: &Path) -> Result<Self, ConfigError> {
        match read_to_string(path) {
            Ok(config) => Ok(toml::from_str(&config)?),
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                let config = Self::default();
                config.write_to(path)?;
                info!("wrote default config to {}", path.display());
                Ok(config)
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_owned(),
                source,
            }),
        }
    }

    pub fn write_to(&self, path: &Path) -> Result<(), ConfigError> {
        write(path, toml::to_string(self)?).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })
    }
}
