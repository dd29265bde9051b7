use anyhow::Result;
use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use crate::config::ThumbnailConfig;

/// Outcome of asking for one photo's thumbnail. Only `Ready` carries an
/// image; the others leave the photo's metadata usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThumbnailStatus {
    Ready(PathBuf),
    /// The photo's file is gone since it was added.
    Missing,
    Failed(String),
    Disabled,
}

/// Manages thumbnail generation and caching
pub struct ThumbnailManager {
    cache_dir: PathBuf,
    size: u32,
    enabled: bool,
}

impl ThumbnailManager {
    pub fn new(config: &ThumbnailConfig) -> Self {
        Self {
            cache_dir: config.path.clone(),
            size: config.size,
            enabled: config.enabled,
        }
    }

    /// Hash of the original path, so distinct photos never collide.
    fn cache_path(&self, original: &Path) -> PathBuf {
        let mut hasher = DefaultHasher::new();
        original.to_string_lossy().hash(&mut hasher);
        let hash = hasher.finish();

        self.cache_dir.join(format!("{:016x}.jpg", hash))
    }

    /// Get the cached thumbnail path if it exists
    pub fn get_cached_path(&self, original: &Path) -> Option<PathBuf> {
        let cache_path = self.cache_path(original);
        cache_path.exists().then_some(cache_path)
    }

    /// Generate and cache a thumbnail for the given image
    pub fn generate(&self, original: &Path) -> Result<PathBuf> {
        if !self.cache_dir.exists() {
            fs::create_dir_all(&self.cache_dir)?;
        }

        let cache_path = self.cache_path(original);
        if cache_path.exists() {
            return Ok(cache_path);
        }

        let img = image::open(original)?;
        let thumbnail = img.thumbnail(self.size, self.size);
        thumbnail.to_rgb8().save(&cache_path)?;

        Ok(cache_path)
    }

    /// Thumbnail for a photo, never failing the caller.
    pub fn thumbnail_for(&self, original: &Path) -> ThumbnailStatus {
        if !self.enabled {
            return ThumbnailStatus::Disabled;
        }
        if !original.exists() {
            tracing::warn!(path = ?original, "Photo file is missing, skipping thumbnail");
            return ThumbnailStatus::Missing;
        }
        match self.generate(original) {
            Ok(path) => ThumbnailStatus::Ready(path),
            Err(e) => {
                tracing::warn!(path = ?original, error = %e, "Failed to generate thumbnail");
                ThumbnailStatus::Failed(e.to_string())
            }
        }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }
}
