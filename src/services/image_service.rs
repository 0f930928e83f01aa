// src/services/image_service.rs - decode, validate and store post images
use std::fs;
use std::path::Path;

use base64::{engine::general_purpose, Engine as _};
use uuid::Uuid;

use crate::dtos::post_dtos::ImageUpload;
use crate::validators::{sniff_image_format, validate_image_size, ImageError, ImageFormat};

/// Decode the base64 payload and run it through the upload gate: the 1 MiB
/// size ceiling and the image-format sniff. Returns the raw bytes and the
/// detected format; nothing is written to disk here.
pub fn decode_and_validate(upload: &ImageUpload) -> Result<(Vec<u8>, ImageFormat), ImageError> {
    if !upload.content_type.starts_with("image/") {
        return Err(ImageError::NotAnImage);
    }

    // Strip a data URL prefix if present (data:image/png;base64,...)
    let base64_data = match upload.data.split_once(',') {
        Some((_, rest)) => rest,
        None => upload.data.as_str(),
    };

    let bytes = general_purpose::STANDARD
        .decode(base64_data)
        .map_err(|_| ImageError::BadEncoding)?;

    validate_image_size(bytes.len())?;
    let format = sniff_image_format(&bytes)?;
    Ok((bytes, format))
}

/// Write validated image bytes under `<media_root>/posts/` and return the
/// relative path stored on the post row.
pub fn store_post_image(
    media_root: &str,
    bytes: &[u8],
    format: ImageFormat,
) -> std::io::Result<String> {
    let dir = Path::new(media_root).join("posts");
    fs::create_dir_all(&dir)?;

    let filename = format!("{}.{}", Uuid::new_v4(), format.extension());
    fs::write(dir.join(&filename), bytes)?;
    Ok(format!("posts/{}", filename))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::IMAGE_SIZE_LIMIT;

    fn png_bytes() -> Vec<u8> {
        let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        bytes.extend_from_slice(&[0u8; 32]);
        bytes
    }

    fn upload_of(bytes: &[u8]) -> ImageUpload {
        ImageUpload {
            content_type: "image/png".into(),
            data: general_purpose::STANDARD.encode(bytes),
        }
    }

    #[test]
    fn valid_png_passes_the_gate() {
        let (bytes, format) = decode_and_validate(&upload_of(&png_bytes())).unwrap();
        assert_eq!(format, ImageFormat::Png);
        assert_eq!(bytes, png_bytes());
    }

    #[test]
    fn data_url_prefix_is_stripped() {
        let mut upload = upload_of(&png_bytes());
        upload.data = format!("data:image/png;base64,{}", upload.data);
        assert!(decode_and_validate(&upload).is_ok());
    }

    #[test]
    fn oversized_image_hits_the_size_limit() {
        let mut bytes = png_bytes();
        bytes.resize(IMAGE_SIZE_LIMIT + 1, 0);
        let err = decode_and_validate(&upload_of(&bytes)).unwrap_err();
        assert_eq!(err, ImageError::TooLarge(1));
    }

    #[test]
    fn non_image_payload_is_rejected() {
        let err = decode_and_validate(&upload_of(b"plain text, not pixels")).unwrap_err();
        assert_eq!(err, ImageError::NotAnImage);
    }

    #[test]
    fn garbage_base64_is_rejected() {
        let upload = ImageUpload {
            content_type: "image/png".into(),
            data: "!!!not base64!!!".into(),
        };
        assert_eq!(decode_and_validate(&upload).unwrap_err(), ImageError::BadEncoding);
    }

    #[test]
    fn non_image_content_type_is_rejected() {
        let mut upload = upload_of(&png_bytes());
        upload.content_type = "text/plain".into();
        assert_eq!(decode_and_validate(&upload).unwrap_err(), ImageError::NotAnImage);
    }

    #[test]
    fn stored_path_carries_posts_prefix() {
        let media_root = std::env::temp_dir().join(format!("media-{}", Uuid::new_v4()));
        let path = store_post_image(media_root.to_str().unwrap(), &png_bytes(), ImageFormat::Png)
            .unwrap();
        assert!(path.starts_with("posts/"));
        assert!(path.ends_with(".png"));
        assert!(media_root.join(&path).exists());
        fs::remove_dir_all(&media_root).unwrap();
    }
}
