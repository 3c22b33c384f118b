//! CLI command implementations.

pub mod create;
pub mod form;

use std::io;
use std::path::Path;

use thiserror::Error;
use tracing::debug;
use woo_listing_core::{ImageFile, SUPPORTED_IMAGE_EXTENSIONS, is_supported_image};

/// Errors from running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The terminal could not be read.
    #[error("Failed to read input from terminal: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// The image file is not a JPEG or PNG.
    #[error("Unsupported image {0}: expected one of {exts}", exts = SUPPORTED_IMAGE_EXTENSIONS.join(", "))]
    UnsupportedImage(String),

    /// The image file could not be read.
    #[error("Failed to read image {path}: {source}")]
    ImageRead { path: String, source: io::Error },

    /// Output could not be written.
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Check that a path names a readable image the store accepts.
///
/// # Errors
///
/// Returns a message suitable for showing next to a prompt.
pub fn check_image_path(path: &Path) -> Result<(), String> {
    if !is_supported_image(&file_name(path)) {
        return Err(format!(
            "Only {} files can be uploaded",
            SUPPORTED_IMAGE_EXTENSIONS.join(", ")
        ));
    }
    if !path.is_file() {
        return Err(format!("{} is not a file", path.display()));
    }
    Ok(())
}

/// Read an image file for upload.
///
/// # Errors
///
/// Returns an error if the extension is not jpg, jpeg or png, or the file
/// cannot be read.
pub async fn load_image(path: &Path) -> Result<ImageFile, CommandError> {
    let filename = file_name(path);
    if !is_supported_image(&filename) {
        return Err(CommandError::UnsupportedImage(path.display().to_string()));
    }

    let content = tokio::fs::read(path)
        .await
        .map_err(|source| CommandError::ImageRead {
            path: path.display().to_string(),
            source,
        })?;
    debug!(%filename, bytes = content.len(), "Loaded image");

    Ok(ImageFile::new(filename, content))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_image_keeps_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.JPG");
        std::fs::write(&path, [0xFF_u8, 0xD8, 0xFF]).unwrap();

        let image = load_image(&path).await.unwrap();
        assert_eq!(image.filename(), "photo.JPG");
        assert_eq!(image.content(), &[0xFF_u8, 0xD8, 0xFF]);
        assert_eq!(image.content_type(), "image/jpeg");
    }

    #[tokio::test]
    async fn test_load_image_rejects_other_formats() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.gif");
        std::fs::write(&path, b"GIF89a").unwrap();

        let err = load_image(&path).await.unwrap_err();
        assert!(matches!(err, CommandError::UnsupportedImage(_)));
    }

    #[tokio::test]
    async fn test_load_image_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_image(&dir.path().join("missing.png")).await.unwrap_err();
        assert!(matches!(err, CommandError::ImageRead { .. }));
    }

    #[test]
    fn test_check_image_path() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("photo.png");
        std::fs::write(&png, b"png").unwrap();

        assert!(check_image_path(&png).is_ok());
        assert!(check_image_path(&dir.path().join("other.png")).is_err());
        assert!(check_image_path(&dir.path().join("photo.webp")).is_err());
    }
}
