use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;

use crate::UploadUrl;

/// An image picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// What the host reports back for a stored image.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadedImage {
    /// Public HTTPS URL of the stored image.
    pub secure_url: String,
    #[serde(default)]
    pub public_id: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default, rename = "bytes")]
    pub size_bytes: Option<u64>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("upload failed: {0}")]
    Transport(String),
    #[error("upload rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("unexpected upload response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Deserialize)]
struct HostErrorResponse {
    error: HostError,
}

#[derive(Debug, Deserialize)]
struct HostError {
    message: String,
}

#[derive(Debug, Clone)]
pub struct UploadClient {
    http: reqwest::Client,
    url: UploadUrl,
    upload_preset: String,
}

impl UploadClient {
    pub fn new(cloud_name: &str, upload_preset: impl Into<String>) -> Self {
        Self::with_url(UploadUrl::for_cloud(cloud_name), upload_preset)
    }

    pub fn with_url(url: UploadUrl, upload_preset: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url,
            upload_preset: upload_preset.into(),
        }
    }

    pub fn url(&self) -> &UploadUrl {
        &self.url
    }

    /// Uploads one image and returns where the host stored it.
    ///
    /// No retries: a failure is reported once and the image is not stored.
    #[instrument(skip(self, image), fields(file_name = %image.file_name, size = image.bytes.len()))]
    pub async fn upload(&self, image: &ImageFile) -> Result<UploadedImage, UploadError> {
        let form = Form::new()
            .part("file", file_part(image))
            .text("upload_preset", self.upload_preset.clone());

        let response = self
            .http
            .post(self.url.as_ref())
            .multipart(form)
            .send()
            .await
            .map_err(|e| UploadError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| UploadError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<HostErrorResponse>(&body)
                .map(|r| r.error.message)
                .unwrap_or(body);
            tracing::warn!(status = status.as_u16(), "image host rejected upload: {}", message);
            return Err(UploadError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let uploaded: UploadedImage = serde_json::from_str(&body).map_err(|e| {
            UploadError::MalformedResponse(format!("Failed to parse upload response: {}", e))
        })?;

        if uploaded.secure_url.is_empty() {
            return Err(UploadError::MalformedResponse(
                "upload response has an empty secure_url".to_string(),
            ));
        }

        tracing::debug!(url = %uploaded.secure_url, "image uploaded");
        Ok(uploaded)
    }
}

fn file_part(image: &ImageFile) -> Part {
    let part = || Part::bytes(image.bytes.to_vec()).file_name(image.file_name.clone());

    match image.content_type.as_deref() {
        Some(content_type) => part().mime_str(content_type).unwrap_or_else(|_| {
            tracing::debug!("ignoring unparseable content type '{}'", content_type);
            part()
        }),
        None => part(),
    }
}
