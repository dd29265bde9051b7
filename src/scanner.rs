use anyhow::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Image extensions a photo address may end in. Matched exactly, so `JPG`
/// does not count as `jpg`.
pub const ACCEPTED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "bmp"];

/// Whether the text after the last `.` of `address` is an accepted extension.
pub fn is_accepted_image(address: &str) -> bool {
    match address.rsplit_once('.') {
        Some((_, ext)) => ACCEPTED_EXTENSIONS.contains(&ext),
        None => false,
    }
}

/// Every accepted image file below `directory`, sorted by path.
pub fn discover_images(directory: &Path) -> Result<Vec<PathBuf>> {
    if !directory.is_dir() {
        anyhow::bail!("Not a directory: {}", directory.display());
    }

    let mut images = Vec::new();

    for entry in WalkDir::new(directory)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if path.is_file() && is_accepted_image(&path.to_string_lossy()) {
            images.push(path.to_path_buf());
        }
    }

    // Sort by path for consistent ordering
    images.sort();

    Ok(images)
}
