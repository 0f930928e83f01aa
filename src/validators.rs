// src/validators.rs - upload gate for post images, slug shape check
use regex::Regex;
use thiserror::Error;

/// Hard ceiling for uploaded images: 1 MiB.
pub const IMAGE_SIZE_LIMIT: usize = 1024 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageError {
    #[error("Maximum allowed file size is {0}MB")]
    TooLarge(usize),
    #[error("Upload a valid image. The file you uploaded is corrupted or not an image")]
    NotAnImage,
    #[error("Invalid base64 image data")]
    BadEncoding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Webp,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Png => "png",
            ImageFormat::Gif => "gif",
            ImageFormat::Webp => "webp",
        }
    }
}

/// Size gate only; content checks live in `sniff_image_format`.
pub fn validate_image_size(size: usize) -> Result<(), ImageError> {
    let limit_mb = IMAGE_SIZE_LIMIT / (1024 * 1024);
    if size > IMAGE_SIZE_LIMIT {
        return Err(ImageError::TooLarge(limit_mb));
    }
    Ok(())
}

/// Decode the payload's magic bytes. Anything that is not one of the
/// accepted image formats is rejected with a distinct error so clients
/// can tell "too big" apart from "not an image".
pub fn sniff_image_format(bytes: &[u8]) -> Result<ImageFormat, ImageError> {
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Ok(ImageFormat::Jpeg);
    }
    if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        return Ok(ImageFormat::Png);
    }
    if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        return Ok(ImageFormat::Gif);
    }
    // RIFF....WEBP
    if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
        return Ok(ImageFormat::Webp);
    }
    Err(ImageError::NotAnImage)
}

/// Group slugs are letters, digits, hyphens and underscores. Anything
/// else never reaches the database; the route 404s straight away, the
/// same way a slug-typed URL pattern would refuse to match.
pub fn is_valid_slug(slug: &str) -> bool {
    let re = Regex::new(r"^[-a-zA-Z0-9_]+$").unwrap();
    re.is_match(slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_header() -> Vec<u8> {
        let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        bytes.extend_from_slice(&[0u8; 16]);
        bytes
    }

    #[test]
    fn size_at_limit_is_accepted() {
        assert_eq!(validate_image_size(IMAGE_SIZE_LIMIT), Ok(()));
    }

    #[test]
    fn size_over_limit_is_rejected() {
        let err = validate_image_size(IMAGE_SIZE_LIMIT + 1).unwrap_err();
        assert_eq!(err, ImageError::TooLarge(1));
        assert!(err.to_string().contains("1MB"));
    }

    #[test]
    fn png_magic_is_detected() {
        assert_eq!(sniff_image_format(&png_header()), Ok(ImageFormat::Png));
    }

    #[test]
    fn jpeg_magic_is_detected() {
        let bytes = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        assert_eq!(sniff_image_format(&bytes), Ok(ImageFormat::Jpeg));
    }

    #[test]
    fn webp_needs_riff_container() {
        let mut bytes = b"RIFF".to_vec();
        bytes.extend_from_slice(&[0u8; 4]);
        bytes.extend_from_slice(b"WEBP");
        assert_eq!(sniff_image_format(&bytes), Ok(ImageFormat::Webp));
    }

    #[test]
    fn text_file_is_not_an_image() {
        let err = sniff_image_format(b"actix-web==4.0\nserde==1.0\n").unwrap_err();
        assert_eq!(err, ImageError::NotAnImage);
        assert!(err.to_string().contains("not an image"));
    }

    #[test]
    fn empty_payload_is_not_an_image() {
        assert_eq!(sniff_image_format(&[]), Err(ImageError::NotAnImage));
    }

    #[test]
    fn slug_shape() {
        assert!(is_valid_slug("test"));
        assert!(is_valid_slug("rock-and_roll2"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("has space"));
        assert!(!is_valid_slug("semi;colon"));
    }
}
