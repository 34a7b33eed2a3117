//! Image upload for the post editor's rich-text field.

use blogdesk_api_types::UploadedImage;
use tracing::warn;

use crate::application::gateway::{Gateway, GatewayError, MultipartBody, decode};

pub const UPLOAD_IMAGE_PATH: &str = "posts/upload-image";
pub const UPLOAD_FAILED: &str = "Image upload failed. Please try again.";

const UPLOAD_FIELD: &str = "file";
const UPLOADS_PREFIX: &str = "/uploads/";
const IMAGE_ROUTE: &str = "posts/getimage/";

/// Upload an image and return the URL the editor should embed.
pub async fn upload_image(
    gateway: &dyn Gateway,
    file_name: &str,
    bytes: Vec<u8>,
) -> Result<url::Url, GatewayError> {
    let body = MultipartBody::with_file(UPLOAD_FIELD, file_name, bytes);
    let value = gateway.upload(UPLOAD_IMAGE_PATH, body).await?;
    let uploaded: UploadedImage = decode(value)?;
    let Some(location) = uploaded.location else {
        warn!("upload response carried no location");
        return Err(GatewayError::RequestFailed);
    };
    resolve_location(gateway, &location)
}

/// Absolute locations are used as-is; server-relative ones are served from
/// the image route.
pub fn resolve_location(gateway: &dyn Gateway, location: &str) -> Result<url::Url, GatewayError> {
    if location.starts_with("http://") || location.starts_with("https://") {
        return url::Url::parse(location).map_err(|err| {
            warn!(error = %err, "upload location is not a valid URL");
            GatewayError::RequestFailed
        });
    }
    let relative = location.strip_prefix(UPLOADS_PREFIX).unwrap_or(location);
    let relative = relative.trim_start_matches('/');
    gateway.resolve(&format!("{IMAGE_ROUTE}{relative}"))
}
