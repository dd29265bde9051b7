use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    #[serde(default)]
    pub stock: StockConfig,

    #[serde(default)]
    pub thumbnails: ThumbnailConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockConfig {
    /// Directory holding `stock1.jpg` .. `stock5.jpg`, the sample photos a
    /// new catalog is seeded with. The images are not installed with the
    /// binary; point this at a directory that has them. A relative path is
    /// resolved against the working directory. Missing files are still
    /// listed, dated 01/01/1970, and a warning is logged at first run.
    #[serde(default = "default_stock_dir")]
    pub dir: PathBuf,
}

fn default_stock_dir() -> PathBuf {
    PathBuf::from("data")
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            dir: default_stock_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThumbnailConfig {
    #[serde(default = "default_thumbnails_enabled")]
    pub enabled: bool,

    #[serde(default = "default_thumb_cache_path")]
    pub path: PathBuf,

    #[serde(default = "default_thumb_cache_size")]
    pub size: u32,
}

fn default_thumbnails_enabled() -> bool {
    true
}

fn default_thumb_cache_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("shoebox/thumbnails")
}

fn default_thumb_cache_size() -> u32 {
    256
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            enabled: default_thumbnails_enabled(),
            path: default_thumb_cache_path(),
            size: default_thumb_cache_size(),
        }
    }
}

fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("shoebox")
        .join("catalog.json")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            stock: StockConfig::default(),
            thumbnails: ThumbnailConfig::default(),
        }
    }
}

impl Config {
    /// Load from the default location, writing a default config on first run.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Config::default();
            config.save_to(&config_path)?;
            tracing::info!(path = ?config_path, "Wrote default config");
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("shoebox")
    }

    /// `SHOEBOX_CONFIG` if set, otherwise `config.toml` in [`Config::config_dir`].
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("SHOEBOX_CONFIG") {
            return PathBuf::from(path);
        }
        Self::config_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            store_path = "/tmp/catalog.json"

            [thumbnails]
            size = 64
            "#,
        )
        .unwrap();

        assert_eq!(config.store_path, PathBuf::from("/tmp/catalog.json"));
        assert_eq!(config.stock.dir, PathBuf::from("data"));
        assert_eq!(config.thumbnails.size, 64);
        assert!(config.thumbnails.enabled);
    }

    #[test]
    fn test_save_and_load_from() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");

        let mut config = Config::default();
        config.stock.dir = PathBuf::from("/opt/shoebox/stock");
        config.thumbnails.enabled = false;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.stock.dir, PathBuf::from("/opt/shoebox/stock"));
        assert!(!loaded.thumbnails.enabled);
    }

    #[test]
    fn test_invalid_config_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "store_path = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("config.toml"));
    }
}
