use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use super::{Album, Photo, User};

/// Reserved login for the administrator. Never stored as a user.
pub const ADMIN_USER: &str = "admin";

pub const STOCK_USER: &str = "stock";
pub const STOCK_ALBUM: &str = "stock";

/// Sample photos bundled with the application, relative to the stock directory.
pub const STOCK_PHOTOS: [&str; 5] = [
    "stock1.jpg",
    "stock2.jpg",
    "stock3.jpg",
    "stock4.jpg",
    "stock5.jpg",
];

/// A broken invariant in a catalog read from outside the program.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityError {
    #[error("reserved name {0:?} is stored as a user")]
    ReservedUser(String),

    #[error("user {0:?} appears more than once")]
    DuplicateUser(String),

    #[error("user {user:?} has more than one album named {album:?}")]
    DuplicateAlbum { user: String, album: String },

    #[error("album {album:?} of user {user:?} lists {path} more than once")]
    DuplicatePath {
        user: String,
        album: String,
        path: String,
    },

    #[error("album {album:?} of user {user:?} lists {path}, which is not in the user's library")]
    MissingPhoto {
        user: String,
        album: String,
        path: String,
    },
}

/// The root of the object graph: every user and everything they own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    users: Vec<User>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A first-run catalog: one `stock` user owning a `stock` album of the
    /// bundled sample photos found under `stock_dir`.
    pub fn seeded(stock_dir: &Path) -> Self {
        let mut stock = User::new(STOCK_USER);
        stock.add_album(Album::new(STOCK_ALBUM));
        for name in STOCK_PHOTOS {
            let path = stock_dir.join(name);
            stock.add_photo(STOCK_ALBUM, Photo::new(path.to_string_lossy()));
        }

        let missing = STOCK_PHOTOS
            .iter()
            .filter(|name| !stock_dir.join(name).exists())
            .count();
        if missing > 0 {
            tracing::warn!(
                dir = ?stock_dir,
                missing,
                "Stock photos not found; set stock.dir in the config"
            );
        }

        let mut catalog = Self::new();
        catalog.add_user(stock);
        catalog
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn contains(&self, name: &str) -> bool {
        self.user(name).is_some()
    }

    pub fn user(&self, name: &str) -> Option<&User> {
        if name == ADMIN_USER {
            return None;
        }
        self.users.iter().find(|u| u.name() == name)
    }

    pub fn user_mut(&mut self, name: &str) -> Option<&mut User> {
        if name == ADMIN_USER {
            return None;
        }
        self.users.iter_mut().find(|u| u.name() == name)
    }

    pub fn add_user(&mut self, user: User) {
        self.users.push(user);
    }

    pub fn remove_user(&mut self, name: &str) -> Option<User> {
        let index = self.users.iter().position(|u| u.name() == name)?;
        Some(self.users.remove(index))
    }

    /// Check the invariants the editing operations maintain: unique user
    /// names, no stored `admin`, unique album names per user, and every
    /// album path present once and backed by the user's library.
    pub fn verify(&self) -> Result<(), IntegrityError> {
        let mut user_names = HashSet::new();
        for user in &self.users {
            if user.name() == ADMIN_USER {
                return Err(IntegrityError::ReservedUser(user.name().to_string()));
            }
            if !user_names.insert(user.name()) {
                return Err(IntegrityError::DuplicateUser(user.name().to_string()));
            }

            let mut album_names = HashSet::new();
            for album in user.albums() {
                if !album_names.insert(album.name()) {
                    return Err(IntegrityError::DuplicateAlbum {
                        user: user.name().to_string(),
                        album: album.name().to_string(),
                    });
                }

                let mut paths = HashSet::new();
                for path in album.paths() {
                    if !paths.insert(path.as_str()) {
                        return Err(IntegrityError::DuplicatePath {
                            user: user.name().to_string(),
                            album: album.name().to_string(),
                            path: path.clone(),
                        });
                    }
                    if !user.library().contains(path) {
                        return Err(IntegrityError::MissingPhoto {
                            user: user.name().to_string(),
                            album: album.name().to_string(),
                            path: path.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
