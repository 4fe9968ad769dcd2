//! Base64 `data:` URLs, the inline image format used by the host application

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::error::ImageLoadError;

const PNG_PREFIX: &str = "data:image/png;base64,";

/// Decode the payload of a `data:<mime>;base64,<payload>` URL
pub fn decode(url: &str) -> Result<Vec<u8>, ImageLoadError> {
    let rest = url
        .trim()
        .strip_prefix("data:")
        .ok_or_else(|| ImageLoadError::DataUrl("missing data: scheme".to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| ImageLoadError::DataUrl("missing ',' separator".to_string()))?;
    if !header.ends_with(";base64") {
        return Err(ImageLoadError::DataUrl(format!(
            "unsupported encoding in header {header:?}"
        )));
    }

    let bytes = STANDARD.decode(payload)?;
    if bytes.is_empty() {
        return Err(ImageLoadError::Empty);
    }
    Ok(bytes)
}

/// Wrap PNG bytes in a `data:image/png;base64,` URL
pub fn encode_png(png: &[u8]) -> String {
    let mut url = String::with_capacity(PNG_PREFIX.len() + png.len().div_ceil(3) * 4);
    url.push_str(PNG_PREFIX);
    STANDARD.encode_string(png, &mut url);
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let url = encode_png(b"\x89PNG fake");
        assert!(url.starts_with(PNG_PREFIX));
        assert_eq!(decode(&url).unwrap(), b"\x89PNG fake");
    }

    #[test]
    fn test_accepts_other_image_types() {
        assert_eq!(decode("data:image/jpeg;base64,AAEC").unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_rejects_malformed_urls() {
        assert!(matches!(
            decode("http://example.com/a.png"),
            Err(ImageLoadError::DataUrl(_))
        ));
        assert!(matches!(
            decode("data:image/png;base64"),
            Err(ImageLoadError::DataUrl(_))
        ));
        assert!(matches!(
            decode("data:text/plain,hello"),
            Err(ImageLoadError::DataUrl(_))
        ));
        assert!(matches!(
            decode("data:image/png;base64,!!!"),
            Err(ImageLoadError::Base64(_))
        ));
        assert!(matches!(
            decode("data:image/png;base64,"),
            Err(ImageLoadError::Empty)
        ));
    }
}
