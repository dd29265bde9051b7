//! The in-memory photo catalog.
//!
//! `Catalog` → `User` → `Album` → `Photo` → `Tag`. Each user owns a
//! [`PhotoLibrary`] so that albums of the same user share photo objects by path.

pub mod album;
pub mod catalog;
pub mod library;
pub mod photo;
pub mod tag;
pub mod user;

pub use album::{Album, AlbumSummary, RESULTS_ALBUM};
pub use catalog::{Catalog, IntegrityError, ADMIN_USER, STOCK_ALBUM, STOCK_PHOTOS, STOCK_USER};
pub use library::PhotoLibrary;
pub use photo::Photo;
pub use tag::Tag;
pub use user::User;

/// Date text format for display and entry.
pub const DATE_FORMAT: &str = "%m/%d/%Y";
