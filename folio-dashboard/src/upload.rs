use async_trait::async_trait;
use cloudinary::{ImageFile, UploadClient, UploadError, UploadedImage};

/// Stores an image with the external host and reports its public URL.
#[async_trait]
pub trait ImageUploader: Send + Sync {
    async fn upload(&self, image: &ImageFile) -> Result<UploadedImage, UploadError>;
}

#[async_trait]
impl ImageUploader for UploadClient {
    async fn upload(&self, image: &ImageFile) -> Result<UploadedImage, UploadError> {
        UploadClient::upload(self, image).await
    }
}
