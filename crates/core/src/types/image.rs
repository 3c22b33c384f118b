//! Product image files.

/// Extensions the product form accepts for the image picker.
pub const SUPPORTED_IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// An image file read from disk, ready to be uploaded.
///
/// Implements `Debug` manually so log lines show the size instead of the bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    filename: String,
    content: Vec<u8>,
}

impl std::fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageFile")
            .field("filename", &self.filename)
            .field("content_len", &self.content.len())
            .finish()
    }
}

impl ImageFile {
    /// Create an image from a filename and its bytes.
    #[must_use]
    pub fn new(filename: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content,
        }
    }

    /// The file name sent in `Content-Disposition`.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// The raw file content.
    #[must_use]
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// The MIME type used for the upload, see [`content_type_for`].
    #[must_use]
    pub fn content_type(&self) -> &'static str {
        content_type_for(&self.filename)
    }

    /// Consumes the image and returns its filename and content.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<u8>) {
        (self.filename, self.content)
    }
}

/// Guess the upload MIME type from the file name.
///
/// `.jpg` and `.jpeg` (any case) are `image/jpeg`; everything else is sent as
/// `image/png`. The bytes are never inspected.
#[must_use]
pub fn content_type_for(filename: &str) -> &'static str {
    let lower = filename.to_ascii_lowercase();
    if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
        "image/jpeg"
    } else {
        "image/png"
    }
}

/// Whether the image picker accepts this file name.
#[must_use]
pub fn is_supported_image(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .is_some_and(|(_, ext)| {
            SUPPORTED_IMAGE_EXTENSIONS
                .iter()
                .any(|supported| supported.eq_ignore_ascii_case(ext))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_uppercase_jpg() {
        assert_eq!(content_type_for("photo.JPG"), "image/jpeg");
    }

    #[test]
    fn test_content_type_jpeg() {
        assert_eq!(content_type_for("photo.jpeg"), "image/jpeg");
    }

    #[test]
    fn test_content_type_png() {
        assert_eq!(content_type_for("photo.png"), "image/png");
    }

    #[test]
    fn test_content_type_gif_falls_back_to_png() {
        assert_eq!(content_type_for("photo.gif"), "image/png");
    }

    #[test]
    fn test_content_type_no_extension() {
        assert_eq!(content_type_for("jpg"), "image/png");
    }

    #[test]
    fn test_supported_images() {
        assert!(is_supported_image("a.PNG"));
        assert!(is_supported_image("dir.v2/a.jpeg"));
        assert!(!is_supported_image("a.gif"));
        assert!(!is_supported_image("png"));
    }

    #[test]
    fn test_debug_hides_content() {
        let image = ImageFile::new("mug.png", vec![0xAB; 2048]);
        let debug_output = format!("{image:?}");
        assert!(debug_output.contains("mug.png"));
        assert!(debug_output.contains("2048"));
        assert!(!debug_output.contains("171"));
    }
}
