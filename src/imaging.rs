// In: src/imaging.rs

//! The imaging capability the converter needs from an image library.
//!
//! The codec never touches images. The pipeline asks an [`Imaging`] backend to
//! decode, resize and reduce an image to luminance, then applies the panel
//! orientation itself with [`orient_for_panel`]. [`ImageCrateBackend`] is the
//! production backend, built on the `image` crate.

use std::path::Path;

use clap::ValueEnum;
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::error::Rbx430Error;

//==================================================================================
// I. Capability Contract
//==================================================================================

/// The resampling filter used when resizing.
#[derive(Serialize, Deserialize, ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScaleMethod {
    #[value(name = "nearest")]
    Nearest,
    #[value(name = "bilinear")]
    Bilinear,
    #[value(name = "bicubic")]
    Bicubic,
    /// High quality downsampling. Recommended.
    #[default]
    #[value(name = "antialias")]
    Antialias,
}

impl ScaleMethod {
    /// The `image` crate filter for this method.
    pub fn filter_type(self) -> FilterType {
        match self {
            Self::Nearest => FilterType::Nearest,
            Self::Bilinear => FilterType::Triangle,
            Self::Bicubic => FilterType::CatmullRom,
            Self::Antialias => FilterType::Lanczos3,
        }
    }
}

/// What the pipeline needs from an image library.
pub trait Imaging {
    /// The backend's in-memory image. Alpha must already be flattened.
    type Image;

    /// Loads and decodes an image file.
    fn decode(&self, path: &Path) -> Result<Self::Image, Rbx430Error>;

    /// Returns `(width, height)` in pixels.
    fn dimensions(&self, image: &Self::Image) -> (u32, u32);

    /// Resamples to exactly `width` x `height`, ignoring the aspect ratio.
    fn resize(
        &self,
        image: &Self::Image,
        width: u32,
        height: u32,
        method: ScaleMethod,
    ) -> Self::Image;

    /// Returns 8-bit luminance in row-major order, `width * height` samples.
    fn to_grayscale(&self, image: &Self::Image) -> Vec<u8>;
}

//==================================================================================
// II. Panel Orientation
//==================================================================================

/// Mirrors each row left-to-right and inverts every sample, matching how the
/// RBX430-1 LCD scans and lights its pixels.
pub fn orient_for_panel(luma: &mut [u8], width: usize) {
    if width == 0 {
        return;
    }
    for row in luma.chunks_mut(width) {
        row.reverse();
    }
    for sample in luma.iter_mut() {
        *sample = u8::MAX - *sample;
    }
}

//==================================================================================
// III. `image` Crate Backend
//==================================================================================

/// Composites an RGBA image over an opaque white background.
pub fn flatten_onto_white(rgba: &RgbaImage) -> RgbImage {
    let mut rgb = RgbImage::new(rgba.width(), rgba.height());
    for (src, dst) in rgba.pixels().zip(rgb.pixels_mut()) {
        let alpha = u32::from(src[3]);
        let blend = |c: u8| ((u32::from(c) * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        *dst = Rgb([blend(src[0]), blend(src[1]), blend(src[2])]);
    }
    rgb
}

/// ITU-R 601-2 luma, `(r*299 + g*587 + b*114) / 1000` rounded to nearest.
pub fn luma_601(pixel: &Rgb<u8>) -> u8 {
    let [r, g, b] = pixel.0;
    ((u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114 + 500) / 1000) as u8
}

/// The default backend, decoding every format the `image` crate supports.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageCrateBackend;

impl Imaging for ImageCrateBackend {
    type Image = RgbImage;

    fn decode(&self, path: &Path) -> Result<RgbImage, Rbx430Error> {
        let decoded = image::open(path)?;
        log::debug!(
            "Decoded {} ({}x{}, {:?})",
            path.display(),
            decoded.width(),
            decoded.height(),
            decoded.color()
        );
        Ok(flatten_onto_white(&decoded.to_rgba8()))
    }

    fn dimensions(&self, image: &RgbImage) -> (u32, u32) {
        image.dimensions()
    }

    fn resize(
        &self,
        image: &RgbImage,
        width: u32,
        height: u32,
        method: ScaleMethod,
    ) -> RgbImage {
        imageops::resize(image, width, height, method.filter_type())
    }

    fn to_grayscale(&self, image: &RgbImage) -> Vec<u8> {
        image.pixels().map(luma_601).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_flatten_onto_white() {
        let mut rgba = RgbaImage::new(3, 1);
        rgba.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
        rgba.put_pixel(1, 0, Rgba([0, 0, 0, 255]));
        rgba.put_pixel(2, 0, Rgba([10, 20, 30, 255]));

        let rgb = flatten_onto_white(&rgba);
        assert_eq!(rgb.get_pixel(0, 0), &Rgb([255, 255, 255]));
        assert_eq!(rgb.get_pixel(1, 0), &Rgb([0, 0, 0]));
        assert_eq!(rgb.get_pixel(2, 0), &Rgb([10, 20, 30]));
    }

    #[test]
    fn test_orient_mirrors_rows_and_inverts() {
        let mut luma = vec![0, 10, 20, 30, 40, 50];
        orient_for_panel(&mut luma, 3);
        assert_eq!(luma, vec![235, 245, 255, 205, 215, 225]);
    }

    #[test]
    fn test_backend_resize_and_grayscale() {
        let backend = ImageCrateBackend;
        let white = RgbImage::from_pixel(40, 20, Rgb([255, 255, 255]));

        for method in [
            ScaleMethod::Nearest,
            ScaleMethod::Bilinear,
            ScaleMethod::Bicubic,
            ScaleMethod::Antialias,
        ] {
            let resized = backend.resize(&white, 9, 4, method);
            assert_eq!(backend.dimensions(&resized), (9, 4));
            let luma = backend.to_grayscale(&resized);
            assert_eq!(luma.len(), 36);
            assert!(luma.iter().all(|&v| v >= 250), "{:?}", method);
        }
    }

    #[test]
    fn test_grayscale_uses_601_weights() {
        let mut rgb = RgbImage::new(5, 1);
        rgb.put_pixel(0, 0, Rgb([255, 0, 0]));
        rgb.put_pixel(1, 0, Rgb([0, 255, 0]));
        rgb.put_pixel(2, 0, Rgb([0, 0, 255]));
        rgb.put_pixel(3, 0, Rgb([255, 255, 255]));
        rgb.put_pixel(4, 0, Rgb([0, 0, 0]));

        let luma = ImageCrateBackend.to_grayscale(&rgb);
        assert_eq!(luma, vec![76, 150, 29, 255, 0]);
    }

    #[test]
    fn test_backend_decodes_png() {
        let path =
            std::env::temp_dir().join(format!("rbx430-img-decode-{}.png", std::process::id()));
        RgbaImage::from_pixel(6, 2, Rgba([0, 0, 0, 0])).save(&path).unwrap();

        let decoded = ImageCrateBackend.decode(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(decoded.dimensions(), (6, 2));
        assert!(decoded.pixels().all(|p| p == &Rgb([255, 255, 255])));
    }

    #[test]
    fn test_backend_missing_file_is_an_error() {
        let result = ImageCrateBackend.decode(Path::new("/definitely/not/here.png"));
        assert!(result.is_err());
    }
}
