use super::{AdminScreen, AlbumsScreen, Route};
use crate::error::{Result, ValidationError};
use crate::model::ADMIN_USER;
use crate::store::CatalogStore;

pub struct LoginScreen<'a> {
    store: &'a dyn CatalogStore,
}

impl<'a> LoginScreen<'a> {
    pub fn new(store: &'a dyn CatalogStore) -> Self {
        Self { store }
    }

    /// `admin` opens the admin screen, a known user opens their albums.
    pub fn attempt(&self, username: &str) -> Result<Route<'a>> {
        if username == ADMIN_USER {
            tracing::info!("Administrator logged in");
            return Ok(Route::Admin(AdminScreen::new(self.store)));
        }

        let catalog = self.store.load()?;
        if !catalog.contains(username) {
            return Err(ValidationError::InvalidLogin.into());
        }

        tracing::info!(user = %username, "User logged in");
        Ok(Route::Albums(AlbumsScreen::open(self.store, username)?))
    }
}
