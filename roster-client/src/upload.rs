//! Avatar uploads to the external image host

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use shared::ImageUpload;

use crate::{ClientConfig, ClientError, ClientResult};

/// Uploads image bytes and returns the hosted URL
#[async_trait]
pub trait ImageUploader: Send + Sync {
    async fn upload(&self, bytes: Vec<u8>, file_name: &str) -> ClientResult<ImageUpload>;
}

/// Image host replies either flat or wrapped in `data`
#[derive(Deserialize)]
#[serde(untagged)]
enum UploadReply {
    Flat(ImageUpload),
    Nested { success: bool, data: UploadData },
}

#[derive(Deserialize)]
struct UploadData {
    url: String,
    #[serde(default)]
    delete_url: Option<String>,
}

impl From<UploadReply> for ImageUpload {
    fn from(reply: UploadReply) -> Self {
        match reply {
            UploadReply::Flat(upload) => upload,
            UploadReply::Nested { success, data } => ImageUpload {
                success,
                url: data.url,
                delete_url: data.delete_url,
            },
        }
    }
}

/// Multipart uploader for the configured image host
///
/// Uses its own `reqwest::Client`: uploads are `multipart/form-data`, not JSON.
#[derive(Debug, Clone)]
pub struct ImageHostClient {
    client: Client,
    url: String,
    key: Option<String>,
}

impl ImageHostClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder().timeout(config.timeout_duration()).build()?;
        Ok(Self {
            client,
            url: config.image_host_url.clone(),
            key: config.image_host_key.clone(),
        })
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let ext = file_name.rsplit('.').next().unwrap_or_default().to_ascii_lowercase();
    match ext.as_str() {
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "jpg" | "jpeg" => "image/jpeg",
        _ => "application/octet-stream",
    }
}

#[async_trait]
impl ImageUploader for ImageHostClient {
    async fn upload(&self, bytes: Vec<u8>, file_name: &str) -> ClientResult<ImageUpload> {
        let size = bytes.len();
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime_for(file_name))?;
        let form = reqwest::multipart::Form::new().part("image", part);

        let mut req = self.client.post(&self.url).multipart(form);
        if let Some(key) = &self.key {
            req = req.query(&[("key", key)]);
        }

        let resp = req.send().await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Image host rejected upload");
            return Err(ClientError::Upload(format!("{} {}", status, text.trim())));
        }

        let upload: ImageUpload = resp.json::<UploadReply>().await?.into();
        if !upload.success || upload.url.is_empty() {
            return Err(ClientError::Upload("image host reported failure".into()));
        }
        tracing::info!(url = %upload.url, size, "Avatar uploaded");
        Ok(upload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_shapes() {
        let flat: UploadReply = serde_json::from_str(
            r#"{"success":true,"url":"https://i.example/a.png","delete_url":"https://i.example/d"}"#,
        )
        .unwrap();
        let flat: ImageUpload = flat.into();
        assert_eq!(flat.url, "https://i.example/a.png");

        let nested: UploadReply = serde_json::from_str(
            r#"{"success":true,"status":200,"data":{"url":"https://i.example/b.png","delete_url":null}}"#,
        )
        .unwrap();
        let nested: ImageUpload = nested.into();
        assert!(nested.success);
        assert_eq!(nested.url, "https://i.example/b.png");
        assert!(nested.delete_url.is_none());
    }

    #[test]
    fn test_mime_for() {
        assert_eq!(mime_for("me.PNG"), "image/png");
        assert_eq!(mime_for("me.jpeg"), "image/jpeg");
        assert_eq!(mime_for("noext"), "application/octet-stream");
    }
}
