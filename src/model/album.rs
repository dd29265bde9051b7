use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Photo, PhotoLibrary, Tag};

/// Name given to albums produced by the search operations before they are
/// attached to a user.
pub const RESULTS_ALBUM: &str = "results";

/// A named, ordered collection of photos.
///
/// Photos are held by path; the photo data itself lives in the owning user's
/// [`PhotoLibrary`], which every query takes as an argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    name: String,
    photos: Vec<String>,
}

impl Album {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            photos: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Paths in insertion order.
    pub fn paths(&self) -> &[String] {
        &self.photos
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    /// Append `path` unless it is already present. Returns whether it was added.
    pub fn add_photo(&mut self, path: &str) -> bool {
        if self.contains(path) {
            return false;
        }
        self.photos.push(path.to_string());
        true
    }

    pub fn remove_photo(&mut self, path: &str) -> bool {
        match self.photos.iter().position(|p| p == path) {
            Some(index) => {
                self.photos.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.photos.iter().any(|p| p == path)
    }

    pub fn find<'a>(&self, path: &str, library: &'a PhotoLibrary) -> Option<&'a Photo> {
        if self.contains(path) {
            library.get(path)
        } else {
            None
        }
    }

    /// The album's photos in order, resolved against `library`.
    pub fn photos<'a>(&'a self, library: &'a PhotoLibrary) -> impl Iterator<Item = &'a Photo> + 'a {
        self.photos.iter().filter_map(move |path| library.get(path))
    }

    /// Add the photo to `dest` as well. Both albums then refer to the same photo.
    pub fn copy_photo(&self, path: &str, dest: &mut Album) -> bool {
        self.contains(path) && dest.add_photo(path)
    }

    pub fn move_photo(&mut self, path: &str, dest: &mut Album) -> bool {
        if !self.remove_photo(path) {
            return false;
        }
        dest.add_photo(path);
        true
    }

    /// The oldest photo; the first one wins a tie.
    pub fn earliest<'a>(&'a self, library: &'a PhotoLibrary) -> Option<&'a Photo> {
        self.photos(library).fold(None::<&Photo>, |min, photo| match min {
            Some(m) if m.last_modified() <= photo.last_modified() => Some(m),
            _ => Some(photo),
        })
    }

    /// The newest photo; the first one wins a tie.
    pub fn latest<'a>(&'a self, library: &'a PhotoLibrary) -> Option<&'a Photo> {
        self.photos(library).fold(None::<&Photo>, |max, photo| match max {
            Some(m) if m.last_modified() >= photo.last_modified() => Some(m),
            _ => Some(photo),
        })
    }

    /// Photos strictly after `start` and strictly before `end`.
    pub fn search_by_date_range(
        &self,
        library: &PhotoLibrary,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Album {
        self.filter(library, |p| p.last_modified() > start && p.last_modified() < end)
    }

    pub fn search_by_tag(&self, library: &PhotoLibrary, tag: &Tag) -> Album {
        self.filter(library, |p| p.has_tag(tag))
    }

    pub fn search_conjunctive(&self, library: &PhotoLibrary, a: &Tag, b: &Tag) -> Album {
        self.filter(library, |p| p.has_tag(a) && p.has_tag(b))
    }

    pub fn search_disjunctive(&self, library: &PhotoLibrary, a: &Tag, b: &Tag) -> Album {
        self.filter(library, |p| p.has_tag(a) || p.has_tag(b))
    }

    fn filter(&self, library: &PhotoLibrary, keep: impl Fn(&Photo) -> bool) -> Album {
        let mut results = Album::new(RESULTS_ALBUM);
        for photo in self.photos(library).filter(|p| keep(p)) {
            results.add_photo(photo.path());
        }
        results
    }

    pub fn summary(&self, library: &PhotoLibrary) -> AlbumSummary {
        AlbumSummary {
            name: self.name.clone(),
            count: self.photos.len(),
            earliest: self.earliest(library).map(Photo::formatted_date),
            latest: self.latest(library).map(Photo::formatted_date),
        }
    }
}

/// One line of an album listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumSummary {
    pub name: String,
    pub count: usize,
    pub earliest: Option<String>,
    pub latest: Option<String>,
}

impl fmt::Display for AlbumSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} - {}",
            self.name,
            self.count,
            self.earliest.as_deref().unwrap_or("N/A"),
            self.latest.as_deref().unwrap_or("N/A"),
        )
    }
}
