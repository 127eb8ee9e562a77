use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "farmstand.toml";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// JSON-lines file receiving submitted orders. Orders are only
    /// acknowledged when unset.
    pub orders_file: Option<PathBuf>,
    /// Log destination. Logging stays off when unset since the terminal
    /// belongs to the UI.
    pub log_file: Option<PathBuf>,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            orders_file: None,
            log_file: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Settings {
    /// Loads settings from a TOML file and then applies `FARMSTAND_*`
    /// environment overrides.
    ///
    /// A missing file at the default location is not an error; a missing
    /// file the user asked for explicitly is.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        settings.apply_env(|key| std::env::var(key).ok());
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("FARMSTAND_ORDERS_FILE").filter(|v| !v.is_empty()) {
            self.orders_file = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("FARMSTAND_LOG_FILE").filter(|v| !v.is_empty()) {
            self.log_file = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("FARMSTAND_LOG_LEVEL").filter(|v| !v.is_empty()) {
            self.log_level = v;
        }
    }
}
