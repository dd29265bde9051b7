//! Shoebox: a per-user photo catalog.
//!
//! Users own albums of photos; photos carry a caption and `name: value` tags
//! and can be found again by tag or by modification date. The whole catalog
//! is persisted as one JSON document after every change.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod scanner;
pub mod screens;
pub mod search;
pub mod store;
pub mod thumbnails;

pub use error::{Result, ShoeboxError, ValidationError};
pub use model::{Album, Catalog, Photo, PhotoLibrary, Tag, User};
pub use store::{CatalogStore, JsonStore, MemoryStore, StoreError};
