//! Base image type for annotation sessions

use image::RgbaImage;

use super::data_url;
use crate::error::ImageLoadError;

/// A decoded raster that strokes are drawn over
///
/// The pixels are never modified by a session; flattening produces a new
/// raster instead.
#[derive(Clone, Debug, PartialEq)]
pub struct BaseImage {
    rgba: RgbaImage,
}

impl BaseImage {
    /// Wrap already decoded pixels
    pub fn from_rgba(rgba: RgbaImage) -> Self {
        Self { rgba }
    }

    /// Decode an encoded image (PNG or JPEG)
    pub fn decode(bytes: &[u8]) -> Result<Self, ImageLoadError> {
        if bytes.is_empty() {
            return Err(ImageLoadError::Empty);
        }
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        log::debug!(
            "BaseImage decoded: {}x{} pixels",
            rgba.width(),
            rgba.height()
        );
        Ok(Self { rgba })
    }

    /// Decode a `data:image/...;base64,` URL
    pub fn from_data_url(url: &str) -> Result<Self, ImageLoadError> {
        Self::decode(&data_url::decode(url)?)
    }

    pub fn rgba(&self) -> &RgbaImage {
        &self.rgba
    }

    /// Get the width of the image
    pub fn width(&self) -> u32 {
        self.rgba.width()
    }

    /// Get the height of the image
    pub fn height(&self) -> u32 {
        self.rgba.height()
    }
}

impl From<RgbaImage> for BaseImage {
    fn from(rgba: RgbaImage) -> Self {
        Self::from_rgba(rgba)
    }
}

/// Where a session's base image comes from
#[derive(Clone, Debug)]
pub enum ImageSource {
    /// Encoded image file contents
    Bytes(Vec<u8>),
    /// A `data:` URL as stored by the host application
    DataUrl(String),
    /// Pixels that are already decoded
    Decoded(BaseImage),
}

impl ImageSource {
    /// Decode into a base image
    pub fn load(self) -> Result<BaseImage, ImageLoadError> {
        match self {
            ImageSource::Bytes(bytes) => BaseImage::decode(&bytes),
            ImageSource::DataUrl(url) => BaseImage::from_data_url(&url),
            ImageSource::Decoded(image) => Ok(image),
        }
    }
}

impl From<BaseImage> for ImageSource {
    fn from(image: BaseImage) -> Self {
        ImageSource::Decoded(image)
    }
}

impl From<RgbaImage> for ImageSource {
    fn from(rgba: RgbaImage) -> Self {
        ImageSource::Decoded(BaseImage::from_rgba(rgba))
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(bytes: Vec<u8>) -> Self {
        ImageSource::Bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn png_bytes(img: &RgbaImage) -> Vec<u8> {
        let mut buf = std::io::Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_decode_png() {
        let img = RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 255]));
        let base = BaseImage::decode(&png_bytes(&img)).unwrap();
        assert_eq!((base.width(), base.height()), (3, 2));
        assert_eq!(base.rgba(), &img);
    }

    #[test]
    fn test_decode_failures() {
        assert!(matches!(BaseImage::decode(&[]), Err(ImageLoadError::Empty)));
        assert!(matches!(
            BaseImage::decode(b"definitely not an image"),
            Err(ImageLoadError::Decode(_))
        ));
    }

    #[test]
    fn test_from_data_url() {
        let img = RgbaImage::from_pixel(2, 2, Rgba([9, 8, 7, 255]));
        let url = data_url::encode_png(&png_bytes(&img));
        assert_eq!(BaseImage::from_data_url(&url).unwrap().rgba(), &img);
    }

    #[test]
    fn test_source_load() {
        let img = RgbaImage::new(1, 1);
        let loaded = ImageSource::from(img.clone()).load().unwrap();
        assert_eq!(loaded.rgba(), &img);
        assert!(ImageSource::DataUrl("nope".into()).load().is_err());
    }
}
