//! TMDB image addressing and loading
//!
//! Image references are relative paths appended to a sized base URL.
//! Backdrops are blurred once at load time so the view only has to draw them.

use iced::widget::image::Handle;
use image::DynamicImage;

use super::error::ImageError;

/// Gaussian blur applied to background layers
const BACKDROP_BLUR_SIGMA: f32 = 5.0;

/// Backdrops are shrunk before blurring, they are never shown sharp
const BACKDROP_MAX_WIDTH: u32 = 1280;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSize {
    W342,
    W500,
    W780,
    /// Background layers, blurred after download
    W1280,
}

impl ImageSize {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageSize::W342 => "w342",
            ImageSize::W500 => "w500",
            ImageSize::W780 => "w780",
            ImageSize::W1280 => "w1280",
        }
    }
}

/// How a downloaded image is prepared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageVariant {
    /// Shown as-is (posters)
    Sharp,
    /// Blurred full-bleed background
    Blurred,
}

/// Build the full URL for a relative image path. No path, no image.
pub fn image_url(base: &str, size: ImageSize, path: Option<&str>) -> Option<String> {
    let path = path.map(str::trim).filter(|p| !p.is_empty())?;
    let separator = if path.starts_with('/') { "" } else { "/" };
    Some(format!(
        "{}/{}{}{}",
        base.trim_end_matches('/'),
        size.as_str(),
        separator,
        path
    ))
}

/// Download and decode an image into an iced handle
pub async fn fetch_image(
    http: reqwest::Client,
    url: String,
    variant: ImageVariant,
) -> Result<Handle, ImageError> {
    let response = http.get(&url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ImageError::Status(status.as_u16()));
    }
    let bytes = response.bytes().await?;

    // Decoding and blurring are CPU-bound
    tokio::task::spawn_blocking(move || decode_image(&bytes, variant))
        .await
        .map_err(|e| ImageError::Join(e.to_string()))?
}

/// Decode raw bytes, blurring backdrops
pub fn decode_image(bytes: &[u8], variant: ImageVariant) -> Result<Handle, ImageError> {
    let img = image::load_from_memory(bytes)?;

    let img = match variant {
        ImageVariant::Sharp => img,
        ImageVariant::Blurred => blur_backdrop(img),
    };

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(Handle::from_rgba(width, height, rgba.into_raw()))
}

fn blur_backdrop(img: DynamicImage) -> DynamicImage {
    let img = if img.width() > BACKDROP_MAX_WIDTH {
        img.thumbnail(BACKDROP_MAX_WIDTH, u32::MAX)
    } else {
        img
    };
    img.blur(BACKDROP_BLUR_SIGMA)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    const BASE: &str = "https://image.tmdb.org/t/p";

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([200, 80, 70, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png).unwrap();
        bytes
    }

    #[test]
    fn test_image_url() {
        assert_eq!(
            image_url(BASE, ImageSize::W500, Some("/wkfG7DaExmcVsGLR4kLouMwxeT5.jpg")).as_deref(),
            Some("https://image.tmdb.org/t/p/w500/wkfG7DaExmcVsGLR4kLouMwxeT5.jpg")
        );
        assert_eq!(
            image_url("https://cdn.test/t/p/", ImageSize::W1280, Some("a.jpg")).as_deref(),
            Some("https://cdn.test/t/p/w1280/a.jpg")
        );
    }

    #[test]
    fn test_absent_path_has_no_url() {
        assert_eq!(image_url(BASE, ImageSize::W342, None), None);
        assert_eq!(image_url(BASE, ImageSize::W342, Some("  ")), None);
    }

    #[test]
    fn test_decode_variants() {
        let bytes = png_bytes(8, 4);

        assert!(decode_image(&bytes, ImageVariant::Sharp).is_ok());
        assert!(decode_image(&bytes, ImageVariant::Blurred).is_ok());
    }

    #[test]
    fn test_decode_garbage_fails() {
        let result = decode_image(b"definitely not an image", ImageVariant::Sharp);
        assert!(matches!(result, Err(ImageError::Decode(_))));
    }

    #[test]
    fn test_wide_backdrops_are_shrunk() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(2560, 10));
        let blurred = blur_backdrop(img);

        assert_eq!(blurred.width(), BACKDROP_MAX_WIDTH);
    }
}
