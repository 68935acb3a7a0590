use serde::{Deserialize, Serialize};
use std::{env, fmt::Display, fs::File, net::SocketAddr, path::Path, path::PathBuf, str::FromStr};
use thiserror::Error;
use tracing::{info, warn};

const WEDDING_CATEGORIES: [&str; 10] = [
    "Bridal Service",
    "Cake",
    "Catering",
    "Decoration",
    "Groom Wear",
    "Music",
    "Photography",
    "Transport",
    "Venue",
    "Videography",
];

const WEDDING_LOCATIONS: [&str; 8] = [
    "Colombo", "Galle", "Gampaha", "Jaffna", "Kandy", "Kurunegala", "Matara", "Negombo",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// An empty list leaves that dimension unrestricted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocatorConfig {
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub locations: Vec<String>,
}

impl AllocatorConfig {
    pub fn new<I, J, S, T>(categories: I, locations: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
            locations: locations.into_iter().map(Into::into).collect(),
        }
    }

    pub fn wedding() -> Self {
        Self::new(WEDDING_CATEGORIES, WEDDING_LOCATIONS)
    }

    pub fn allows_category(&self, category: &str) -> bool {
        self.categories.is_empty() || self.categories.iter().any(|c| c == category)
    }

    pub fn allows_location(&self, location: &str) -> bool {
        self.locations.is_empty() || self.locations.iter().any(|l| l == location)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let blank = self
            .categories
            .iter()
            .chain(self.locations.iter())
            .any(|value| value.trim().is_empty());
        if blank {
            return Err(ConfigError::Invalid(
                "category and location names must not be blank".into(),
            ));
        }
        Ok(())
    }
}

pub fn load_config_from_json<P: AsRef<Path>>(path: P) -> Result<AllocatorConfig, ConfigError> {
    let file = File::open(path)?;
    let config: AllocatorConfig = serde_json::from_reader(file)?;
    config.validate()?;
    Ok(config)
}

pub fn save_config_to_json<P: AsRef<Path>>(
    config: &AllocatorConfig,
    path: P,
) -> Result<(), ConfigError> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, config)?;
    Ok(())
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub addr: SocketAddr,
    pub catalog_path: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
}

impl ServerSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            addr: try_load("BUDGET_ALLOCATOR_HTTP_ADDR", "0.0.0.0:3000")?,
            catalog_path: optional_path("BUDGET_ALLOCATOR_CATALOG"),
            config_path: optional_path("BUDGET_ALLOCATOR_CONFIG"),
        })
    }

    pub fn allocator_config(&self) -> Result<AllocatorConfig, ConfigError> {
        match &self.config_path {
            Some(path) => load_config_from_json(path),
            None => Ok(AllocatorConfig::wedding()),
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.parse().map_err(|e| {
        warn!("Invalid {key} value: {e}");
        ConfigError::Invalid(format!("{key}={raw}: {e}"))
    })
}

fn optional_path(key: &str) -> Option<PathBuf> {
    env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
}
