use std::io::Cursor;
use std::path::Path;

use base64::{engine::general_purpose, Engine as _};
use image::{ImageFormat, ImageReader};
use tracing::debug;

use crate::common::{QRError, QRResult};

// Format
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoFormat {
    Raster(ImageFormat),
    Svg,
}

impl LogoFormat {
    pub fn mime(&self) -> &'static str {
        match self {
            Self::Raster(format) => format.to_mime_type(),
            Self::Svg => "image/svg+xml",
        }
    }
}

/// True if the document's first element is `<svg`, after any BOM, whitespace, xml prolog,
/// doctype or comments.
fn is_svg(bytes: &[u8]) -> bool {
    let mut rest = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    loop {
        let start = rest.iter().position(|b| !b.is_ascii_whitespace()).unwrap_or(rest.len());
        rest = &rest[start..];
        let skip = if rest.starts_with(b"<?") {
            find(rest, b"?>").map(|i| i + 2)
        } else if rest.starts_with(b"<!--") {
            find(rest, b"-->").map(|i| i + 3)
        } else if rest.starts_with(b"<!") {
            find(rest, b">").map(|i| i + 1)
        } else {
            return rest.starts_with(b"<svg");
        };
        match skip {
            Some(i) => rest = &rest[i..],
            None => return false,
        }
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

// Logo
//------------------------------------------------------------------------------

/// Uploaded overlay image. Only held in memory for the session, as raw bytes plus the data
/// URI that gets embedded in the composed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logo {
    bytes: Vec<u8>,
    format: LogoFormat,
    dimensions: Option<(u32, u32)>,
    data_uri: String,
}

impl Logo {
    /// Accepts SVG documents and any raster format `image` can identify from the bytes
    /// themselves. Raster logos must have readable dimensions.
    pub fn from_bytes(bytes: Vec<u8>) -> QRResult<Self> {
        let (format, dimensions) = if is_svg(&bytes) {
            (LogoFormat::Svg, None)
        } else {
            let reader = ImageReader::new(Cursor::new(bytes.as_slice())).with_guessed_format()?;
            let format = reader
                .format()
                .ok_or_else(|| QRError::InvalidLogo("unrecognized image format".to_string()))?;
            let dimensions = reader.into_dimensions().map_err(|e| QRError::InvalidLogo(e.to_string()))?;
            (LogoFormat::Raster(format), Some(dimensions))
        };

        let data_uri = format!("data:{};base64,{}", format.mime(), general_purpose::STANDARD.encode(&bytes));
        debug!(?format, ?dimensions, len = bytes.len(), "Loaded logo");

        Ok(Self { bytes, format, dimensions, data_uri })
    }

    pub fn from_path(path: impl AsRef<Path>) -> QRResult<Self> {
        Self::from_bytes(std::fs::read(path)?)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn format(&self) -> LogoFormat {
        self.format
    }

    /// Pixel size of a raster logo. `None` for SVG.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }

    pub fn data_uri(&self) -> &str {
        &self.data_uri
    }
}

#[cfg(test)]
pub(crate) fn sample_png(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(w, h, image::Rgb([200, 30, 30]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png).expect("Failed to encode png");
    bytes
}

#[cfg(test)]
mod logo_tests {
    use std::io::Write;

    use image::ImageFormat;

    use test_case::test_case;

    use super::{is_svg, sample_png, Logo, LogoFormat};
    use crate::common::QRError;

    #[test]
    fn test_png() {
        let bytes = sample_png(3, 2);
        let logo = Logo::from_bytes(bytes.clone()).unwrap();
        assert_eq!(logo.format(), LogoFormat::Raster(ImageFormat::Png));
        assert_eq!(logo.dimensions(), Some((3, 2)));
        assert_eq!(logo.bytes(), &bytes[..]);
        assert!(logo.data_uri().starts_with("data:image/png;base64,iVBORw0KGgo"));
    }

    #[test]
    fn test_garbage() {
        let err = Logo::from_bytes(b"definitely not an image".to_vec()).unwrap_err();
        assert!(matches!(err, QRError::InvalidLogo(_)));
    }

    #[test]
    fn test_truncated_png() {
        let mut bytes = sample_png(4, 4);
        bytes.truncate(12);
        assert!(matches!(Logo::from_bytes(bytes), Err(QRError::InvalidLogo(_))));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&sample_png(1, 1)).unwrap();
        let logo = Logo::from_path(file.path()).unwrap();
        assert_eq!(logo.dimensions(), Some((1, 1)));
    }

    #[test]
    fn test_svg() {
        let bytes = br#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 1 1"/>"#.to_vec();
        let logo = Logo::from_bytes(bytes.clone()).unwrap();
        assert_eq!(logo.format(), LogoFormat::Svg);
        assert_eq!(logo.dimensions(), None);
        assert_eq!(logo.bytes(), &bytes[..]);
        assert!(logo.data_uri().starts_with("data:image/svg+xml;base64,PHN2Zy"));
    }

    #[test_case(b"<svg/>" => true; "bare")]
    #[test_case(b"\xEF\xBB\xBF  \n<svg/>" => true; "bom and whitespace")]
    #[test_case(b"<?xml version=\"1.0\"?>\n<!-- logo -->\n<svg/>" => true; "prolog and comment")]
    #[test_case(b"<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \"x\"><svg/>" => true; "doctype")]
    #[test_case(b"<?xml version=\"1.0\"?><html/>" => false; "other xml")]
    #[test_case(b"<!-- never closed <svg/>" => false; "unterminated comment")]
    #[test_case(b"" => false; "empty")]
    fn test_is_svg(bytes: &[u8]) -> bool {
        is_svg(bytes)
    }
}
