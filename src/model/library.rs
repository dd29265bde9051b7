use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use super::Photo;

/// The photos owned by one user, keyed by path.
///
/// Albums refer to photos by path, so every album of a user that holds a
/// given path sees the same `Photo`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoLibrary {
    photos: BTreeMap<String, Photo>,
}

impl PhotoLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&Photo> {
        self.photos.get(path)
    }

    pub fn get_mut(&mut self, path: &str) -> Option<&mut Photo> {
        self.photos.get_mut(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.photos.contains_key(path)
    }

    /// Register `photo` unless its path is already known, and return the
    /// photo now stored under that path.
    pub fn insert(&mut self, photo: Photo) -> &mut Photo {
        self.photos.entry(photo.path().to_string()).or_insert(photo)
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Photo> {
        self.photos.values()
    }

    /// Drop every photo whose path is not in `referenced`.
    pub(crate) fn retain_referenced(&mut self, referenced: &HashSet<&str>) -> usize {
        let before = self.photos.len();
        self.photos.retain(|path, _| referenced.contains(path.as_str()));
        before - self.photos.len()
    }
}
