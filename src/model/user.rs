use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::{Album, Photo, PhotoLibrary};

/// A named owner of albums.
///
/// The user also owns the [`PhotoLibrary`] its albums draw from. A photo added
/// by path to several of this user's albums is one shared object; the library
/// entry goes away once no album refers to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    name: String,
    #[serde(default)]
    library: PhotoLibrary,
    #[serde(default)]
    albums: Vec<Album>,
}

impl User {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            library: PhotoLibrary::new(),
            albums: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    pub fn library(&self) -> &PhotoLibrary {
        &self.library
    }

    pub fn has_album(&self, name: &str) -> bool {
        self.albums.iter().any(|a| a.name() == name)
    }

    pub fn album(&self, name: &str) -> Option<&Album> {
        self.albums.iter().find(|a| a.name() == name)
    }

    pub fn album_mut(&mut self, name: &str) -> Option<&mut Album> {
        self.albums.iter_mut().find(|a| a.name() == name)
    }

    fn album_index(&self, name: &str) -> Option<usize> {
        self.albums.iter().position(|a| a.name() == name)
    }

    /// Attach an album. Paths it holds must already be in this user's library,
    /// which is the case for albums produced by searching this user's albums.
    pub fn add_album(&mut self, album: Album) {
        self.albums.push(album);
    }

    pub fn remove_album(&mut self, name: &str) -> Option<Album> {
        let index = self.album_index(name)?;
        let album = self.albums.remove(index);
        self.prune_library();
        Some(album)
    }

    /// Rename the album currently called `current`. Uniqueness of `new_name`
    /// is checked by the caller.
    pub fn rename_album(&mut self, current: &str, new_name: &str) -> bool {
        match self.album_mut(current) {
            Some(album) => {
                album.set_name(new_name);
                true
            }
            None => false,
        }
    }

    pub fn photo(&self, path: &str) -> Option<&Photo> {
        self.library.get(path)
    }

    pub fn photo_mut(&mut self, path: &str) -> Option<&mut Photo> {
        self.library.get_mut(path)
    }

    /// Add `photo` to the named album.
    ///
    /// When another album of this user already holds the same path, that
    /// photo is shared and `photo` is discarded.
    pub fn add_photo(&mut self, album: &str, photo: Photo) -> bool {
        let Some(index) = self.album_index(album) else {
            return false;
        };
        if self.albums[index].contains(photo.path()) {
            return false;
        }
        let path = self.library.insert(photo).path().to_string();
        self.albums[index].add_photo(&path)
    }

    pub fn remove_photo(&mut self, album: &str, path: &str) -> bool {
        let removed = self
            .album_mut(album)
            .map(|a| a.remove_photo(path))
            .unwrap_or(false);
        if removed {
            self.prune_library();
        }
        removed
    }

    pub fn copy_photo(&mut self, src: &str, path: &str, dest: &str) -> bool {
        match self.album_pair_mut(src, dest) {
            Some((src, dest)) => src.copy_photo(path, dest),
            None => false,
        }
    }

    pub fn move_photo(&mut self, src: &str, path: &str, dest: &str) -> bool {
        match self.album_pair_mut(src, dest) {
            Some((src, dest)) => src.move_photo(path, dest),
            None => false,
        }
    }

    /// Borrow two distinct albums mutably at once.
    fn album_pair_mut(&mut self, a: &str, b: &str) -> Option<(&mut Album, &mut Album)> {
        let i = self.album_index(a)?;
        let j = self.album_index(b)?;
        if i == j {
            return None;
        }
        if i < j {
            let (left, right) = self.albums.split_at_mut(j);
            Some((&mut left[i], &mut right[0]))
        } else {
            let (left, right) = self.albums.split_at_mut(i);
            Some((&mut right[0], &mut left[j]))
        }
    }

    fn prune_library(&mut self) {
        let referenced: HashSet<&str> = self
            .albums
            .iter()
            .flat_map(|a| a.paths().iter().map(String::as_str))
            .collect();
        let dropped = self.library.retain_referenced(&referenced);
        if dropped > 0 {
            tracing::debug!(user = %self.name, dropped, "Pruned unreferenced photos");
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
