//! Photo transports.
//!
//! Fonnte accepts a photo either as an uploaded multipart file or as a URL
//! (including base64 data URIs) in a JSON body. The two are not
//! interchangeable on the wire, so each is its own [`PhotoSender`] with its
//! own payload type and a dispatcher is built for exactly one of them.

use async_trait::async_trait;

use crate::client::{FonnteClient, FonnteError};

/// A binary photo as received from an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Sends one photo with a caption to the configured admin.
#[async_trait]
pub trait PhotoSender: Send + Sync {
    /// Payload this transport carries.
    type Photo: Send + Sync;

    /// Short name for logs.
    fn transport(&self) -> &'static str;

    async fn send_photo(&self, photo: &Self::Photo, caption: &str) -> Result<(), FonnteError>;
}

/// Uploads binary files as a multipart `file` part.
#[derive(Debug, Clone)]
pub struct MultipartPhotoSender {
    client: FonnteClient,
}

impl MultipartPhotoSender {
    pub fn new(client: FonnteClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PhotoSender for MultipartPhotoSender {
    type Photo = PhotoFile;

    fn transport(&self) -> &'static str {
        "multipart"
    }

    async fn send_photo(&self, photo: &PhotoFile, caption: &str) -> Result<(), FonnteError> {
        self.client.send_file_upload(photo, caption).await?;
        Ok(())
    }
}

/// Sends a hosted URL or data URI string in the JSON `file` field.
#[derive(Debug, Clone)]
pub struct UrlPhotoSender {
    client: FonnteClient,
}

impl UrlPhotoSender {
    pub fn new(client: FonnteClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PhotoSender for UrlPhotoSender {
    type Photo = String;

    fn transport(&self) -> &'static str {
        "url"
    }

    async fn send_photo(&self, photo: &String, caption: &str) -> Result<(), FonnteError> {
        self.client.send_file_url(photo, caption).await?;
        Ok(())
    }
}
