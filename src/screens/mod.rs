//! Screen controllers and navigation between them.
//!
//! Each controller knows only the names it was opened with (user, album) and
//! loads the catalog from the store on every action: validate, mutate, save.
//! A rejected action returns a [`ValidationError`] and saves nothing.
//!
//! Confirmations and text prompts go through an injected [`Interaction`] so the
//! controllers run the same under a terminal, a test script, or `--yes`.

mod admin;
mod albums;
mod login;
mod photos;
mod search;

pub use admin::AdminScreen;
pub use albums::AlbumsScreen;
pub use login::LoginScreen;
pub use photos::{ImportReport, PhotoDetails, PhotoEntry, PhotosScreen};
pub use search::{SearchOutcome, SearchScreen};

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ValidationError};
use crate::model::{Catalog, User};
use crate::store::CatalogStore;

/// Blocking questions put to the person driving the application.
pub trait Interaction {
    /// Ask a yes/no question. `false` aborts the action.
    fn confirm(&mut self, message: &str) -> bool;

    /// Ask for a line of text. `None` means the prompt was cancelled.
    fn prompt_text(&mut self, message: &str) -> Option<String>;
}

/// Confirms everything and has no text to offer.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Interaction for AssumeYes {
    fn confirm(&mut self, _message: &str) -> bool {
        true
    }

    fn prompt_text(&mut self, _message: &str) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Admin,
    Albums,
    Photos,
    Search,
}

impl Screen {
    pub fn id(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Admin => "admin",
            Self::Albums => "albums",
            Self::Photos => "photos",
            Self::Search => "search",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Screen {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "login" => Ok(Self::Login),
            "admin" => Ok(Self::Admin),
            "albums" => Ok(Self::Albums),
            "photos" => Ok(Self::Photos),
            "search" => Ok(Self::Search),
            other => Err(ValidationError::UnknownScreen(other.to_string())),
        }
    }
}

/// The names a screen is opened with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavContext {
    pub user: Option<String>,
    pub album: Option<String>,
}

impl NavContext {
    pub fn new(user: Option<&str>, album: Option<&str>) -> Self {
        Self {
            user: user.map(str::to_string),
            album: album.map(str::to_string),
        }
    }

    fn require_user(&self) -> std::result::Result<&str, ValidationError> {
        self.user.as_deref().ok_or(ValidationError::MissingContext("user"))
    }

    fn require_album(&self) -> std::result::Result<&str, ValidationError> {
        self.album.as_deref().ok_or(ValidationError::MissingContext("album"))
    }
}

/// An opened screen.
pub enum Route<'a> {
    Login(LoginScreen<'a>),
    Admin(AdminScreen<'a>),
    Albums(AlbumsScreen<'a>),
    Photos(PhotosScreen<'a>),
    Search(SearchScreen<'a>),
}

impl Route<'_> {
    pub fn screen(&self) -> Screen {
        match self {
            Self::Login(_) => Screen::Login,
            Self::Admin(_) => Screen::Admin,
            Self::Albums(_) => Screen::Albums,
            Self::Photos(_) => Screen::Photos,
            Self::Search(_) => Screen::Search,
        }
    }
}

impl fmt::Debug for Route<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Route").field(&self.screen()).finish()
    }
}

/// Resolves screen identifiers into controllers bound to one store.
pub struct Navigator<'a> {
    store: &'a dyn CatalogStore,
}

impl<'a> Navigator<'a> {
    pub fn new(store: &'a dyn CatalogStore) -> Self {
        Self { store }
    }

    /// Open `screen` with the names in `context`. The names are checked
    /// against the current catalog.
    pub fn change_screen(&self, screen: Screen, context: &NavContext) -> Result<Route<'a>> {
        let route = match screen {
            Screen::Login => Route::Login(LoginScreen::new(self.store)),
            Screen::Admin => Route::Admin(AdminScreen::new(self.store)),
            Screen::Albums => {
                Route::Albums(AlbumsScreen::open(self.store, context.require_user()?)?)
            }
            Screen::Photos => Route::Photos(PhotosScreen::open(
                self.store,
                context.require_user()?,
                context.require_album()?,
            )?),
            Screen::Search => {
                Route::Search(SearchScreen::open(self.store, context.require_user()?)?)
            }
        };
        tracing::debug!(screen = %screen, user = ?context.user, album = ?context.album, "Changed screen");
        Ok(route)
    }
}

/// Ask for text unless it was already supplied.
fn text_or_prompt(given: Option<&str>, ui: &mut dyn Interaction, message: &str) -> Option<String> {
    match given {
        Some(text) => Some(text.to_string()),
        None => ui.prompt_text(message),
    }
}

fn find_user<'c>(catalog: &'c Catalog, name: &str) -> std::result::Result<&'c User, ValidationError> {
    catalog
        .user(name)
        .ok_or_else(|| ValidationError::UnknownUser(name.to_string()))
}

/// Load the catalog, run `action` on the named user and save if it reports a
/// change. `Ok(None)` from the action means nothing changed and nothing is saved.
fn update_user<T>(
    store: &dyn CatalogStore,
    user: &str,
    action: impl FnOnce(&mut User) -> Result<Option<T>>,
) -> Result<Option<T>> {
    let mut catalog = store.load()?;
    let target = catalog
        .user_mut(user)
        .ok_or_else(|| ValidationError::UnknownUser(user.to_string()))?;
    let outcome = action(target)?;
    if outcome.is_some() {
        store.save(&catalog)?;
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Album, Catalog, User};
    use crate::store::MemoryStore;

    fn store() -> MemoryStore {
        let mut ann = User::new("ann");
        ann.add_album(Album::new("trip"));
        let mut catalog = Catalog::new();
        catalog.add_user(ann);
        MemoryStore::new(catalog)
    }

    #[test]
    fn test_screen_ids_round_trip() {
        for screen in [Screen::Login, Screen::Admin, Screen::Albums, Screen::Photos, Screen::Search] {
            assert_eq!(screen.id().parse::<Screen>().unwrap(), screen);
        }
        assert!("settings".parse::<Screen>().is_err());
    }

    #[test]
    fn test_change_screen_resolves_context() {
        let store = store();
        let nav = Navigator::new(&store);

        let route = nav
            .change_screen(Screen::Photos, &NavContext::new(Some("ann"), Some("trip")))
            .unwrap();
        assert_eq!(route.screen(), Screen::Photos);

        let err = nav
            .change_screen(Screen::Photos, &NavContext::new(Some("ann"), None))
            .unwrap_err();
        assert_eq!(err.as_validation(), Some(&ValidationError::MissingContext("album")));

        let err = nav
            .change_screen(Screen::Albums, &NavContext::new(Some("zed"), None))
            .unwrap_err();
        assert_eq!(
            err.as_validation(),
            Some(&ValidationError::UnknownUser("zed".to_string()))
        );
    }

    #[test]
    fn test_update_user_skips_save_without_change() {
        let store = store();
        let outcome: Option<()> = update_user(&store, "ann", |_| Ok(None)).unwrap();
        assert!(outcome.is_none());
        assert_eq!(store.saves(), 0);

        update_user(&store, "ann", |u| {
            u.add_album(Album::new("new"));
            Ok(Some(()))
        })
        .unwrap();
        assert_eq!(store.saves(), 1);
    }
}
