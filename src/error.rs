//! Error types shared across the library.
//!
//! Validation failures carry the message shown to the user and never leave
//! the catalog partially modified. Store failures come from the persistence
//! layer and are always surfaced to the caller.

use std::path::PathBuf;
use thiserror::Error;

use crate::store::StoreError;

/// Rejected user input. The display text is what the front end shows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Login failed: Invalid username")]
    InvalidLogin,

    #[error("Add failed: Invalid username")]
    InvalidUsername,

    #[error("Add failed: User already exists")]
    DuplicateUser,

    #[error("Unknown user: {0}")]
    UnknownUser(String),

    #[error("Add failed: Invalid album name")]
    InvalidAlbumName,

    #[error("Add failed: Album already exists")]
    DuplicateAlbum,

    #[error("Rename failed: Invalid album name")]
    InvalidRename,

    #[error("Rename failed: Album already exists")]
    DuplicateRename,

    #[error("No album named {0}")]
    UnknownAlbum(String),

    #[error("Add failed: Invalid photo address")]
    EmptyAddress,

    #[error("Add failed: Photo already in album")]
    DuplicatePhoto,

    #[error("Add failed: File does not exist: {0}")]
    MissingFile(String),

    #[error("Add failed: Not a supported image: {0}")]
    UnsupportedImage(String),

    #[error("Import failed: Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("No photo {0} in this album")]
    UnknownPhoto(String),

    #[error("Photo is already in album {0}")]
    AlreadyInDestination(String),

    #[error("Tag failed: Use name:value format")]
    MalformedTag,

    #[error("Tag failed: Tag already exists")]
    DuplicateTag,

    #[error("Delete failed: Tag not found")]
    UnknownTag,

    #[error("Please enter tags")]
    NoTagClauses,

    #[error("Invalid tag format: {0}")]
    MalformedClause(String),

    #[error("Select a pairing")]
    MissingCombinator,

    #[error("Invalid date format: {0}")]
    MalformedDate(String),

    #[error("Unknown screen: {0}")]
    UnknownScreen(String),

    #[error("No {0} selected")]
    MissingContext(&'static str),
}

/// Crate-level error.
#[derive(Debug, Error)]
pub enum ShoeboxError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scan failed: {0}")]
    Scan(String),
}

impl ShoeboxError {
    /// The validation failure behind this error, if that is what it is.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ShoeboxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::InvalidLogin.to_string(),
            "Login failed: Invalid username"
        );
        assert_eq!(
            ValidationError::MalformedDate("13/45/2020".to_string()).to_string(),
            "Invalid date format: 13/45/2020"
        );
    }

    #[test]
    fn test_validation_is_transparent() {
        let err: ShoeboxError = ValidationError::DuplicateAlbum.into();
        assert_eq!(err.to_string(), "Add failed: Album already exists");
        assert_eq!(err.as_validation(), Some(&ValidationError::DuplicateAlbum));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ShoeboxError>();
    }
}
