use std::path::Path;

use super::{find_user, text_or_prompt, update_user, Interaction, NavContext};
use crate::error::{Result, ShoeboxError, ValidationError};
use crate::model::{Album, Photo, Tag, User};
use crate::scanner::{discover_images, is_accepted_image};
use crate::store::CatalogStore;
use crate::thumbnails::{ThumbnailManager, ThumbnailStatus};

/// A photo as listed in an album.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoEntry {
    pub path: String,
    pub caption: String,
    pub date: String,
    pub tags: Vec<Tag>,
    /// Whether the file was still on disk when listed.
    pub present: bool,
}

impl From<&Photo> for PhotoEntry {
    fn from(photo: &Photo) -> Self {
        Self {
            path: photo.path().to_string(),
            caption: photo.caption().to_string(),
            date: photo.formatted_date(),
            tags: photo.tags().to_vec(),
            present: photo.exists(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PhotoDetails {
    pub entry: PhotoEntry,
    pub thumbnail: ThumbnailStatus,
}

/// Result of importing a directory into an album.
#[derive(Debug, Default)]
pub struct ImportReport {
    pub added: Vec<String>,
    pub skipped: Vec<(String, ValidationError)>,
}

/// The photos of one album.
pub struct PhotosScreen<'a> {
    store: &'a dyn CatalogStore,
    user: String,
    album: String,
}

impl<'a> PhotosScreen<'a> {
    pub fn open(store: &'a dyn CatalogStore, user: &str, album: &str) -> Result<Self> {
        let catalog = store.load()?;
        if !find_user(&catalog, user)?.has_album(album) {
            return Err(ValidationError::UnknownAlbum(album.to_string()).into());
        }
        Ok(Self {
            store,
            user: user.to_string(),
            album: album.to_string(),
        })
    }

    pub fn context(&self) -> NavContext {
        NavContext::new(Some(&self.user), Some(&self.album))
    }

    pub fn list(&self) -> Result<Vec<PhotoEntry>> {
        let catalog = self.store.load()?;
        let user = find_user(&catalog, &self.user)?;
        let album = self.album_of(user)?;
        Ok(album.photos(user.library()).map(PhotoEntry::from).collect())
    }

    /// Metadata plus thumbnail. A missing or undecodable file only affects
    /// the thumbnail.
    pub fn details(&self, path: &str, thumbnails: &ThumbnailManager) -> Result<PhotoDetails> {
        let catalog = self.store.load()?;
        let user = find_user(&catalog, &self.user)?;
        let photo = self.photo_of(user, path)?;
        Ok(PhotoDetails {
            entry: PhotoEntry::from(photo),
            thumbnail: thumbnails.thumbnail_for(Path::new(photo.path())),
        })
    }

    /// Add the photo at `address`, prompting for it when not given.
    /// Returns `false` if the prompt was cancelled.
    pub fn add(&self, address: Option<&str>, ui: &mut dyn Interaction) -> Result<bool> {
        let Some(address) = text_or_prompt(address, ui, "Enter full photo address:") else {
            return Ok(false);
        };

        update_user(self.store, &self.user, |user| {
            check_new_photo(self.album_of(user)?, &address)?;
            user.add_photo(&self.album, Photo::new(address.as_str()));
            Ok(Some(()))
        })?;

        tracing::info!(user = %self.user, album = %self.album, path = %address, "Photo added");
        Ok(true)
    }

    /// Add every accepted image under `dir`, skipping the ones the photo-add
    /// rules reject.
    pub fn import_directory(&self, dir: &Path) -> Result<ImportReport> {
        if !dir.is_dir() {
            return Err(ValidationError::NotADirectory(dir.to_path_buf()).into());
        }
        let found = discover_images(dir).map_err(|e| ShoeboxError::Scan(format!("{e:#}")))?;

        let report = update_user(self.store, &self.user, |user| {
            let mut report = ImportReport::default();
            for path in found {
                let address = path.to_string_lossy().to_string();
                match check_new_photo(self.album_of(user)?, &address) {
                    Ok(()) => {
                        user.add_photo(&self.album, Photo::new(address.as_str()));
                        report.added.push(address);
                    }
                    Err(reason) => report.skipped.push((address, reason)),
                }
            }
            Ok(Some(report))
        })?
        .unwrap_or_default();

        tracing::info!(
            user = %self.user,
            album = %self.album,
            added = report.added.len(),
            skipped = report.skipped.len(),
            "Directory imported"
        );
        Ok(report)
    }

    /// Remove a photo from this album after confirmation.
    pub fn remove(&self, path: &str, ui: &mut dyn Interaction) -> Result<bool> {
        let removed = update_user(self.store, &self.user, |user| {
            self.photo_of(user, path)?;
            if !ui.confirm("Do you want to remove this photo? This action cannot be reversed") {
                return Ok(None);
            }
            user.remove_photo(&self.album, path);
            Ok(Some(()))
        })?
        .is_some();

        if removed {
            tracing::info!(user = %self.user, album = %self.album, path = %path, "Photo removed");
        }
        Ok(removed)
    }

    pub fn set_caption(&self, path: &str, caption: &str) -> Result<()> {
        update_user(self.store, &self.user, |user| {
            self.photo_of(user, path)?;
            if let Some(photo) = user.photo_mut(path) {
                photo.set_caption(caption);
            }
            Ok(Some(()))
        })?;

        tracing::info!(user = %self.user, path = %path, "Caption updated");
        Ok(())
    }

    /// Tag a photo from `name:value` text, prompting for it when not given.
    pub fn add_tag(&self, path: &str, text: Option<&str>, ui: &mut dyn Interaction) -> Result<bool> {
        update_user(self.store, &self.user, |user| {
            self.photo_of(user, path)?;
            let Some(text) = text_or_prompt(text, ui, "Use name:value format:") else {
                return Ok(None);
            };
            let tag = Tag::parse_authored(&text)?;
            let Some(photo) = user.photo_mut(path) else {
                return Err(ValidationError::UnknownPhoto(path.to_string()).into());
            };
            if photo.has_tag_pair(tag.name(), tag.value()) {
                return Err(ValidationError::DuplicateTag.into());
            }
            tracing::info!(path = %path, tag = %tag, "Tag added");
            photo.add_tag(tag);
            Ok(Some(()))
        })
        .map(|outcome| outcome.is_some())
    }

    pub fn delete_tag(&self, path: &str, tag: &Tag, ui: &mut dyn Interaction) -> Result<bool> {
        update_user(self.store, &self.user, |user| {
            if !self.photo_of(user, path)?.has_tag(tag) {
                return Err(ValidationError::UnknownTag.into());
            }
            if !ui.confirm("Do you want to delete this tag? This action cannot be reversed") {
                return Ok(None);
            }
            if let Some(photo) = user.photo_mut(path) {
                photo.remove_tag(tag);
            }
            tracing::info!(path = %path, tag = %tag, "Tag deleted");
            Ok(Some(()))
        })
        .map(|outcome| outcome.is_some())
    }

    /// Put the photo in another album too; both albums share it.
    pub fn copy_to(&self, path: &str, dest: Option<&str>, ui: &mut dyn Interaction) -> Result<bool> {
        self.transfer(path, dest, ui, false)
    }

    pub fn move_to(&self, path: &str, dest: Option<&str>, ui: &mut dyn Interaction) -> Result<bool> {
        self.transfer(path, dest, ui, true)
    }

    fn transfer(
        &self,
        path: &str,
        dest: Option<&str>,
        ui: &mut dyn Interaction,
        remove_source: bool,
    ) -> Result<bool> {
        update_user(self.store, &self.user, |user| {
            self.photo_of(user, path)?;
            let Some(dest) = text_or_prompt(dest, ui, "Enter album name:") else {
                return Ok(None);
            };
            let Some(target) = user.album(&dest) else {
                return Err(ValidationError::UnknownAlbum(dest).into());
            };
            if target.contains(path) {
                return Err(ValidationError::AlreadyInDestination(dest).into());
            }

            if remove_source {
                user.move_photo(&self.album, path, &dest);
            } else {
                user.copy_photo(&self.album, path, &dest);
            }
            tracing::info!(
                user = %self.user,
                from = %self.album,
                to = %dest,
                path = %path,
                moved = remove_source,
                "Photo transferred"
            );
            Ok(Some(()))
        })
        .map(|outcome| outcome.is_some())
    }

    fn album_of<'u>(&self, user: &'u User) -> std::result::Result<&'u Album, ValidationError> {
        user.album(&self.album)
            .ok_or_else(|| ValidationError::UnknownAlbum(self.album.clone()))
    }

    fn photo_of<'u>(&self, user: &'u User, path: &str) -> std::result::Result<&'u Photo, ValidationError> {
        self.album_of(user)?
            .find(path, user.library())
            .ok_or_else(|| ValidationError::UnknownPhoto(path.to_string()))
    }
}

/// The photo-add rules, in the order they are reported.
fn check_new_photo(album: &Album, address: &str) -> std::result::Result<(), ValidationError> {
    if address.is_empty() {
        return Err(ValidationError::EmptyAddress);
    }
    if album.contains(address) {
        return Err(ValidationError::DuplicatePhoto);
    }
    if !Path::new(address).exists() {
        return Err(ValidationError::MissingFile(address.to_string()));
    }
    if !is_accepted_image(address) {
        return Err(ValidationError::UnsupportedImage(address.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Catalog;
    use crate::screens::AssumeYes;
    use crate::store::MemoryStore;
    use std::fs::File;
    use tempfile::{tempdir, TempDir};

    struct Answers(Vec<Option<String>>);

    impl Interaction for Answers {
        fn confirm(&mut self, _message: &str) -> bool {
            true
        }

        fn prompt_text(&mut self, _message: &str) -> Option<String> {
            if self.0.is_empty() {
                None
            } else {
                self.0.remove(0)
            }
        }
    }

    fn setup() -> (TempDir, MemoryStore) {
        let dir = tempdir().unwrap();
        for name in ["a.jpg", "b.png", "notes.txt", "loud.JPG"] {
            File::create(dir.path().join(name)).unwrap();
        }
        let mut ann = User::new("ann");
        ann.add_album(Album::new("trip"));
        ann.add_album(Album::new("best"));
        let mut catalog = Catalog::new();
        catalog.add_user(ann);
        (dir, MemoryStore::new(catalog))
    }

    fn addr(dir: &TempDir, name: &str) -> String {
        dir.path().join(name).to_string_lossy().to_string()
    }

    #[test]
    fn test_add_rules() {
        let (dir, store) = setup();
        let photos = PhotosScreen::open(&store, "ann", "trip").unwrap();
        let ui: &mut dyn Interaction = &mut AssumeYes;

        assert!(photos.add(Some(&addr(&dir, "a.jpg")), ui).unwrap());
        assert!(photos.add(Some(&addr(&dir, "b.png")), ui).unwrap());

        let cases = [
            (String::new(), ValidationError::EmptyAddress),
            (addr(&dir, "a.jpg"), ValidationError::DuplicatePhoto),
            (addr(&dir, "gone.jpg"), ValidationError::MissingFile(addr(&dir, "gone.jpg"))),
            (addr(&dir, "notes.txt"), ValidationError::UnsupportedImage(addr(&dir, "notes.txt"))),
            (addr(&dir, "loud.JPG"), ValidationError::UnsupportedImage(addr(&dir, "loud.JPG"))),
        ];
        for (address, expected) in cases {
            let err = photos.add(Some(&address), ui).unwrap_err();
            assert_eq!(err.as_validation(), Some(&expected));
        }
        assert_eq!(photos.list().unwrap().len(), 2);
        assert_eq!(store.saves(), 2);
    }

    #[test]
    fn test_add_prompts_and_cancel() {
        let (dir, store) = setup();
        let photos = PhotosScreen::open(&store, "ann", "trip").unwrap();

        assert!(!photos.add(None, &mut Answers(vec![None])).unwrap());
        assert_eq!(store.saves(), 0);

        let mut ui = Answers(vec![Some(addr(&dir, "a.jpg"))]);
        assert!(photos.add(None, &mut ui).unwrap());
        assert_eq!(photos.list().unwrap()[0].path, addr(&dir, "a.jpg"));
    }

    #[test]
    fn test_add_shares_existing_photo() {
        let (dir, store) = setup();
        let trip = PhotosScreen::open(&store, "ann", "trip").unwrap();
        let best = PhotosScreen::open(&store, "ann", "best").unwrap();
        let a = addr(&dir, "a.jpg");

        trip.add(Some(&a), &mut AssumeYes).unwrap();
        trip.set_caption(&a, "sunrise").unwrap();
        best.add(Some(&a), &mut AssumeYes).unwrap();

        assert_eq!(best.list().unwrap()[0].caption, "sunrise");
        best.set_caption(&a, "dawn").unwrap();
        assert_eq!(trip.list().unwrap()[0].caption, "dawn");
    }

    #[test]
    fn test_tags() {
        let (dir, store) = setup();
        let photos = PhotosScreen::open(&store, "ann", "trip").unwrap();
        let a = addr(&dir, "a.jpg");
        photos.add(Some(&a), &mut AssumeYes).unwrap();

        assert!(photos.add_tag(&a, Some("color:red"), &mut AssumeYes).unwrap());
        let saves = store.saves();
        let err = photos.add_tag(&a, Some("color:red"), &mut AssumeYes).unwrap_err();
        assert_eq!(err.as_validation(), Some(&ValidationError::DuplicateTag));
        let err = photos.add_tag(&a, Some("color"), &mut AssumeYes).unwrap_err();
        assert_eq!(err.as_validation(), Some(&ValidationError::MalformedTag));
        assert_eq!(store.saves(), saves);

        let red = Tag::new("color", "red");
        assert_eq!(photos.list().unwrap()[0].tags, vec![red.clone()]);
        assert!(photos.delete_tag(&a, &red, &mut AssumeYes).unwrap());
        let err = photos.delete_tag(&a, &red, &mut AssumeYes).unwrap_err();
        assert_eq!(err.as_validation(), Some(&ValidationError::UnknownTag));
    }

    #[test]
    fn test_copy_and_move() {
        let (dir, store) = setup();
        let trip = PhotosScreen::open(&store, "ann", "trip").unwrap();
        let best = PhotosScreen::open(&store, "ann", "best").unwrap();
        let a = addr(&dir, "a.jpg");
        let b = addr(&dir, "b.png");
        trip.add(Some(&a), &mut AssumeYes).unwrap();
        trip.add(Some(&b), &mut AssumeYes).unwrap();

        assert!(trip.copy_to(&a, Some("best"), &mut AssumeYes).unwrap());
        let err = trip.copy_to(&a, Some("best"), &mut AssumeYes).unwrap_err();
        assert_eq!(
            err.as_validation(),
            Some(&ValidationError::AlreadyInDestination("best".to_string()))
        );
        let err = trip.copy_to(&a, Some("nowhere"), &mut AssumeYes).unwrap_err();
        assert_eq!(
            err.as_validation(),
            Some(&ValidationError::UnknownAlbum("nowhere".to_string()))
        );

        assert!(trip.move_to(&b, Some("best"), &mut AssumeYes).unwrap());
        let trip_paths: Vec<String> = trip.list().unwrap().into_iter().map(|e| e.path).collect();
        let best_paths: Vec<String> = best.list().unwrap().into_iter().map(|e| e.path).collect();
        assert_eq!(trip_paths, vec![a.clone()]);
        assert_eq!(best_paths, vec![a, b]);
    }

    #[test]
    fn test_remove() {
        let (dir, store) = setup();
        let trip = PhotosScreen::open(&store, "ann", "trip").unwrap();
        let a = addr(&dir, "a.jpg");
        trip.add(Some(&a), &mut AssumeYes).unwrap();

        assert!(trip.remove(&a, &mut AssumeYes).unwrap());
        assert!(trip.list().unwrap().is_empty());
        assert!(store.snapshot().user("ann").unwrap().library().is_empty());
    }

    #[test]
    fn test_import_directory() {
        let (dir, store) = setup();
        let trip = PhotosScreen::open(&store, "ann", "trip").unwrap();
        trip.add(Some(&addr(&dir, "a.jpg")), &mut AssumeYes).unwrap();

        let report = trip.import_directory(dir.path()).unwrap();
        assert_eq!(report.added, vec![addr(&dir, "b.png")]);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].1, ValidationError::DuplicatePhoto);
        assert_eq!(trip.list().unwrap().len(), 2);
    }

    #[test]
    fn test_import_needs_a_directory() {
        let (dir, store) = setup();
        let trip = PhotosScreen::open(&store, "ann", "trip").unwrap();

        for target in [dir.path().join("no_such_dir"), dir.path().join("a.jpg")] {
            let err = trip.import_directory(&target).unwrap_err();
            assert_eq!(
                err.as_validation(),
                Some(&ValidationError::NotADirectory(target.clone()))
            );
        }
        assert_eq!(store.saves(), 0);
    }
}
