use std::path::Path;

use base64::prelude::*;
use cloudinary::ImageFile;
use mime_guess::MimeGuess;

/// The one image file picked as the new thumbnail, with its local preview.
///
/// Owning the selection owns the file contents: dropping it releases them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedThumbnail {
    image: ImageFile,
    preview_url: String,
}

impl SelectedThumbnail {
    pub fn new(image: ImageFile) -> Self {
        let content_type = image
            .content_type
            .as_deref()
            .unwrap_or("application/octet-stream");
        let preview_url = format!(
            "data:{};base64,{}",
            content_type,
            BASE64_STANDARD.encode(&image.bytes)
        );

        Self { image, preview_url }
    }

    /// Reads an image from disk.
    pub async fn open(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "thumbnail".to_string());

        let mut image = ImageFile::new(file_name, bytes);
        if let Some(mime) = MimeGuess::from_path(path).first() {
            image = image.with_content_type(mime.essence_str());
        }

        Ok(Self::new(image))
    }

    pub fn image(&self) -> &ImageFile {
        &self.image
    }

    /// A `data:` URL showing the image before it is uploaded.
    pub fn preview_url(&self) -> &str {
        &self.preview_url
    }
}
