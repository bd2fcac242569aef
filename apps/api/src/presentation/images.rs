//! Cover image download helpers.

use base64::{engine::general_purpose::STANDARD, Engine as _};

const FALLBACK_FILENAME: &str = "cover-photo.jpg";

/// `"My Great Title"` → `"my-great-title-cover.jpg"`.
///
/// Whitespace runs become a single `-`; anything that is not ASCII alphanumeric,
/// `-`, `_` or `.` is dropped so the name is safe inside a header.
pub fn cover_filename(title: &str) -> String {
    let slug = title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        .collect::<String>();

    if slug.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        format!("{slug}-cover.jpg")
    }
}

/// Decodes a base64 image payload; a `data:image/...;base64,` prefix is tolerated.
pub fn decode_image(payload: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let payload = payload.trim();
    let data = match payload.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => payload,
    };
    STANDARD.decode(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_filename_slugifies_title() {
        assert_eq!(
            cover_filename("10 Proven  SEO Tips for 2024"),
            "10-proven-seo-tips-for-2024-cover.jpg"
        );
    }

    #[test]
    fn test_cover_filename_drops_header_unsafe_characters() {
        assert_eq!(
            cover_filename("What's \"New\" in Rust?"),
            "whats-new-in-rust-cover.jpg"
        );
    }

    #[test]
    fn test_cover_filename_falls_back_when_empty() {
        assert_eq!(cover_filename(""), "cover-photo.jpg");
        assert_eq!(cover_filename("   "), "cover-photo.jpg");
        assert_eq!(cover_filename("日本語"), "cover-photo.jpg");
    }

    #[test]
    fn test_decode_image_plain_and_data_url() {
        let encoded = STANDARD.encode([0xFF, 0xD8, 0xFF, 0xE0]);
        assert_eq!(decode_image(&encoded).unwrap(), vec![0xFF, 0xD8, 0xFF, 0xE0]);

        let data_url = format!("data:image/jpeg;base64,{encoded}");
        assert_eq!(decode_image(&data_url).unwrap(), vec![0xFF, 0xD8, 0xFF, 0xE0]);
    }

    #[test]
    fn test_decode_image_rejects_garbage() {
        assert!(decode_image("not base64 at all!").is_err());
    }
}
