use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{Tag, DATE_FORMAT};

/// A photo file reference with its caption and tags.
///
/// The timestamp is captured once from the file's modification time when the
/// photo is created and is never refreshed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    path: String,
    last_modified: DateTime<Utc>,
    caption: String,
    tags: Vec<Tag>,
}

impl Photo {
    /// Create a photo, reading the modification time from disk.
    ///
    /// A file that does not exist (or whose mtime cannot be read) gets the
    /// UNIX epoch as its timestamp.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let last_modified = std::fs::metadata(&path)
            .and_then(|m| m.modified())
            .map(DateTime::<Utc>::from)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        Self::with_timestamp(path, last_modified)
    }

    pub fn with_timestamp(path: impl Into<String>, last_modified: DateTime<Utc>) -> Self {
        Self {
            path: path.into(),
            last_modified,
            caption: String::new(),
            tags: Vec::new(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.caption = caption.into();
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Append a tag. Duplicates are the caller's concern.
    pub fn add_tag(&mut self, tag: Tag) {
        self.tags.push(tag);
    }

    /// Remove the first tag equal to `tag`. Returns whether one was removed.
    pub fn remove_tag(&mut self, tag: &Tag) -> bool {
        match self.tags.iter().position(|t| t == tag) {
            Some(index) => {
                self.tags.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn has_tag_pair(&self, name: &str, value: &str) -> bool {
        self.tags.iter().any(|t| t.matches(name, value))
    }

    /// The timestamp as `MM/DD/YYYY` in local time.
    pub fn formatted_date(&self) -> String {
        self.last_modified
            .with_timezone(&Local)
            .format(DATE_FORMAT)
            .to_string()
    }

    /// Whether the referenced file is still on disk.
    pub fn exists(&self) -> bool {
        Path::new(&self.path).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gets_epoch() {
        let photo = Photo::new("/definitely/not/here.jpg");
        assert_eq!(photo.last_modified(), DateTime::<Utc>::UNIX_EPOCH);
        assert!(!photo.exists());
    }

    #[test]
    fn test_existing_file_reads_mtime() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.jpg");
        File::create(&path).unwrap();

        let photo = Photo::new(path.to_string_lossy());
        assert!(photo.last_modified() > DateTime::<Utc>::UNIX_EPOCH);
        assert!(photo.exists());
    }

    #[test]
    fn test_tags() {
        let mut photo = Photo::with_timestamp("a.jpg", DateTime::<Utc>::UNIX_EPOCH);
        let red = Tag::new("color", "red");
        photo.add_tag(red.clone());
        photo.add_tag(red.clone());
        assert_eq!(photo.tags().len(), 2);
        assert!(photo.has_tag(&red));
        assert!(photo.has_tag_pair("color", "red"));
        assert!(!photo.has_tag_pair("color", "blue"));

        assert!(photo.remove_tag(&red));
        assert_eq!(photo.tags().len(), 1);
        assert!(photo.remove_tag(&red));
        assert!(!photo.remove_tag(&red));
    }

    #[test]
    fn test_formatted_date() {
        let local = Local.with_ymd_and_hms(2021, 3, 7, 12, 0, 0).unwrap();
        let photo = Photo::with_timestamp("a.jpg", local.with_timezone(&Utc));
        assert_eq!(photo.formatted_date(), "03/07/2021");
    }

    #[test]
    fn test_caption_replaced() {
        let mut photo = Photo::with_timestamp("a.jpg", DateTime::<Utc>::UNIX_EPOCH);
        photo.set_caption("first");
        photo.set_caption("");
        assert_eq!(photo.caption(), "");
    }
}
