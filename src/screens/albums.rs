use super::{find_user, update_user, Interaction, NavContext};
use crate::error::{Result, ValidationError};
use crate::model::{Album, AlbumSummary};
use crate::store::CatalogStore;

/// One user's album list.
pub struct AlbumsScreen<'a> {
    store: &'a dyn CatalogStore,
    user: String,
}

impl<'a> AlbumsScreen<'a> {
    pub fn open(store: &'a dyn CatalogStore, user: &str) -> Result<Self> {
        find_user(&store.load()?, user)?;
        Ok(Self {
            store,
            user: user.to_string(),
        })
    }

    pub fn context(&self) -> NavContext {
        NavContext::new(Some(&self.user), None)
    }

    pub fn list(&self) -> Result<Vec<AlbumSummary>> {
        let catalog = self.store.load()?;
        let user = find_user(&catalog, &self.user)?;
        Ok(user.albums().iter().map(|a| a.summary(user.library())).collect())
    }

    pub fn add(&self, name: &str) -> Result<()> {
        update_user(self.store, &self.user, |user| {
            if name.is_empty() {
                return Err(ValidationError::InvalidAlbumName.into());
            }
            if user.has_album(name) {
                return Err(ValidationError::DuplicateAlbum.into());
            }
            user.add_album(Album::new(name));
            Ok(Some(()))
        })?;

        tracing::info!(user = %self.user, album = %name, "Album added");
        Ok(())
    }

    pub fn rename(&self, current: &str, new_name: &str) -> Result<()> {
        update_user(self.store, &self.user, |user| {
            if !user.has_album(current) {
                return Err(ValidationError::UnknownAlbum(current.to_string()).into());
            }
            if new_name.is_empty() {
                return Err(ValidationError::InvalidRename.into());
            }
            if user.has_album(new_name) {
                return Err(ValidationError::DuplicateRename.into());
            }
            user.rename_album(current, new_name);
            Ok(Some(()))
        })?;

        tracing::info!(user = %self.user, from = %current, to = %new_name, "Album renamed");
        Ok(())
    }

    /// Delete an album after confirmation. Returns `false` if declined.
    pub fn delete(&self, name: &str, ui: &mut dyn Interaction) -> Result<bool> {
        let deleted = update_user(self.store, &self.user, |user| {
            if !user.has_album(name) {
                return Err(ValidationError::UnknownAlbum(name.to_string()).into());
            }
            if !ui.confirm("Do you want to delete this album? This action cannot be reversed") {
                return Ok(None);
            }
            user.remove_album(name);
            Ok(Some(()))
        })?
        .is_some();

        if deleted {
            tracing::info!(user = %self.user, album = %name, "Album deleted");
        }
        Ok(deleted)
    }
}
