const API_BASE: &str = "https://api.cloudinary.com/v1_1";

/// Endpoint that image uploads are posted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadUrl(String);

impl AsRef<str> for UploadUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl UploadUrl {
    /// The image upload endpoint of the given cloud.
    pub fn for_cloud(cloud_name: &str) -> Self {
        Self(format!("{}/{}/image/upload", API_BASE, cloud_name.trim_matches('/')))
    }

    /// An explicit endpoint, e.g. an upload proxy.
    pub fn custom(url: impl Into<String>) -> Self {
        Self(url.into())
    }
}
