use anyhow::{bail, Context};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that anchors relative output and input paths.
pub const BASE_PATH_ENV: &str = "AUDIOFORGE_BASE_PATH";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub base_path: Option<String>,
    #[serde(default)]
    pub unique_names: bool,
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,
    #[serde(default = "default_cleanup_max_age_hours")]
    pub cleanup_max_age_hours: u64,
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: u8,
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
}

impl Config {
    /// Load the config file (project-local first, then the user config dir)
    /// and apply the environment on top.
    pub fn load() -> anyhow::Result<Self> {
        let mut config = Self::load_file()?;
        config.apply_env(std::env::var(BASE_PATH_ENV).ok());
        Ok(config)
    }

    fn load_file() -> anyhow::Result<Self> {
        let project = Self::project_path();
        if project.exists() {
            return Self::load_from_path(&project);
        }

        if let Ok(path) = Self::default_path() {
            if path.exists() {
                return Self::load_from_path(&path);
            }
        }

        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config at {}", path.display()))?;
        let config: Config = serde_json::from_str(&raw)
            .with_context(|| format!("parse config at {}", path.display()))?;
        Ok(config)
    }

    /// Environment wins over the file. Blank values count as unset.
    pub fn apply_env(&mut self, base_path: Option<String>) {
        if let Some(base) = base_path {
            if !base.trim().is_empty() {
                self.base_path = Some(base);
            }
        }
    }

    pub fn init_default() -> anyhow::Result<PathBuf> {
        let path = Self::default_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let config = Self::default();
        fs::write(&path, serde_json::to_string_pretty(&config)?)?;
        Ok(path)
    }

    pub fn default_path() -> anyhow::Result<PathBuf> {
        let base = BaseDirs::new().context("unable to resolve home directory")?;
        Ok(base.config_dir().join("audioforge").join("config.json"))
    }

    /// The configured base, with blank strings treated as absent.
    pub fn base_path(&self) -> Option<&str> {
        self.base_path
            .as_deref()
            .filter(|base| !base.trim().is_empty())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_text_length == 0 {
            bail!("max_text_length must be greater than 0");
        }

        if self.similarity_threshold > 100 {
            bail!("similarity_threshold must be between 0 and 100");
        }

        if self.cleanup_max_age_hours == 0 {
            bail!("cleanup_max_age_hours must be greater than 0");
        }

        if let Some(base) = self.base_path() {
            if base.contains('\0') {
                bail!("base_path contains a NUL byte");
            }
        }

        Ok(())
    }

    fn project_path() -> PathBuf {
        PathBuf::from("audioforge.json")
    }
}

fn default_max_text_length() -> usize {
    10_000
}

fn default_cleanup_max_age_hours() -> u64 {
    24
}

fn default_similarity_threshold() -> u8 {
    70
}

fn default_max_suggestions() -> usize {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_path: None,
            unique_names: false,
            max_text_length: default_max_text_length(),
            cleanup_max_age_hours: default_cleanup_max_age_hours(),
            similarity_threshold: default_similarity_threshold(),
            max_suggestions: default_max_suggestions(),
        }
    }
}
