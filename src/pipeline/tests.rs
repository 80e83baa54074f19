use super::*;
use crate::imaging::{ImageCrateBackend, ScaleMethod};
use crate::quantize::QuantizeStrategy;
use crate::render::{render_array, OutputFormat};
use std::cell::Cell;
use std::path::PathBuf;

/// An in-memory backend whose "images" are already luminance buffers.
struct LumaBackend {
    width: u32,
    height: u32,
    luma: Vec<u8>,
    decodes: Cell<usize>,
}

impl LumaBackend {
    fn new(width: u32, height: u32, luma: Vec<u8>) -> Self {
        assert_eq!(luma.len(), (width * height) as usize);
        Self {
            width,
            height,
            luma,
            decodes: Cell::new(0),
        }
    }

    fn filled(width: u32, height: u32, value: u8) -> Self {
        Self::new(width, height, vec![value; (width * height) as usize])
    }
}

impl Imaging for LumaBackend {
    type Image = (u32, u32, Vec<u8>);

    fn decode(&self, _path: &Path) -> Result<Self::Image, Rbx430Error> {
        self.decodes.set(self.decodes.get() + 1);
        Ok((self.width, self.height, self.luma.clone()))
    }

    fn dimensions(&self, image: &Self::Image) -> (u32, u32) {
        (image.0, image.1)
    }

    // Nearest-neighbour, whatever the method.
    fn resize(
        &self,
        image: &Self::Image,
        width: u32,
        height: u32,
        _method: ScaleMethod,
    ) -> Self::Image {
        let (src_w, src_h, ref src) = *image;
        let mut out = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                let sx = x * src_w / width;
                let sy = y * src_h / height;
                out.push(src[(sy * src_w + sx) as usize]);
            }
        }
        (width, height, out)
    }

    fn to_grayscale(&self, image: &Self::Image) -> Vec<u8> {
        image.2.clone()
    }
}

fn config(width: u32) -> ConvertConfig {
    ConvertConfig::with_width(width)
}

#[test]
fn test_encode_all_dark_rows() {
    let encoded = encode_intensities(9, 2, &[0; 18], true).unwrap();
    assert_eq!(encoded.codes, vec![0x06FF]);
    assert_eq!(encoded.words_used(), 3);
    assert_eq!(decode_image(&encoded).unwrap(), vec![0; 18]);
}

#[test]
fn test_encode_rejects_size_mismatch() {
    let result = encode_intensities(6, 2, &[0; 9], true);
    assert!(matches!(
        result,
        Err(Rbx430Error::DimensionMismatch { expected: 12, actual: 9 })
    ));
}

#[test]
fn test_nocompress_emits_raw_words() {
    let intensities: Vec<u8> = (0..12).map(|v| (v * 2) as u8).collect();
    let encoded = encode_intensities(6, 2, &intensities, false).unwrap();

    assert!(!encoded.compressed);
    assert_eq!(encoded.codes, codec::pack(&intensities).unwrap());
    assert_eq!(encoded.words_used(), 6);
    assert_eq!(decode_image(&encoded).unwrap(), intensities);
}

#[test]
fn test_compressed_and_raw_decode_to_the_same_image() {
    let mut intensities = vec![5u8; 30];
    intensities.extend([31u8; 15]);
    intensities.extend([0u8; 3]);

    let compressed = encode_intensities(12, 4, &intensities, true).unwrap();
    let raw = encode_intensities(12, 4, &intensities, false).unwrap();
    assert!(compressed.codes.len() < raw.codes.len());
    assert_eq!(decode_image(&compressed).unwrap(), decode_image(&raw).unwrap());
}

#[test]
fn test_convert_white_source_becomes_dark_panel() {
    // White luminance is inverted to 0, so every word is 0x0000.
    let backend = LumaBackend::filled(6, 2, 255);
    let encoded = convert_image(&backend, Path::new("white.png"), &config(6)).unwrap();

    assert_eq!((encoded.width, encoded.height), (6, 2));
    assert_eq!(encoded.codes, vec![0x04FF]);
}

#[test]
fn test_convert_mirrors_each_row() {
    // One row, bright on the left. After mirroring the bright pixel is last.
    let backend = LumaBackend::new(3, 1, vec![0, 255, 255]);
    let mut cfg = config(3);
    cfg.height = Some(1);
    cfg.quantize = QuantizeStrategy::BwNonzero;

    let encoded = convert_image(&backend, Path::new("row.png"), &cfg).unwrap();
    assert_eq!(decode_image(&encoded).unwrap(), vec![0, 0, 31]);
}

#[test]
fn test_convert_derives_height_from_aspect_ratio() {
    let backend = LumaBackend::filled(12, 8, 0);
    let encoded = convert_image(&backend, Path::new("wide.png"), &config(6)).unwrap();
    assert_eq!(encoded.height, 4);
    assert_eq!(encoded.codes, vec![0x08FE]);
}

#[test]
fn test_convert_rejects_tall_derived_height() {
    let backend = LumaBackend::filled(3, 200, 0);
    let result = convert_image(&backend, Path::new("tall.png"), &config(3));
    assert!(matches!(
        result,
        Err(Rbx430Error::ComputedDimensionOutOfRange { computed: 200, .. })
    ));
}

#[test]
fn test_convert_validates_before_decoding() {
    let backend = LumaBackend::filled(3, 3, 0);
    let result = convert_image(&backend, Path::new("any.png"), &config(0));
    assert!(matches!(result, Err(Rbx430Error::InvalidDimension(_))));
    assert_eq!(backend.decodes.get(), 0);
}

#[test]
fn test_analyze_reports_header_inclusive_size() {
    let encoded = encode_intensities(9, 2, &[0; 18], true).unwrap();
    let stats = analyze(&encoded);

    assert_eq!(stats.pixel_count, 18);
    assert_eq!(stats.packed_words, 6);
    assert_eq!(stats.emitted_codes, 1);
    assert_eq!(stats.total_words, 3);
    assert!((stats.ratio - 1.0 / 6.0).abs() < 1e-9);

    let json = serde_json::to_string(&stats).unwrap();
    assert!(json.contains("\"total_words\":3"));
}

#[test]
fn test_image_crate_end_to_end() {
    let path: PathBuf =
        std::env::temp_dir().join(format!("rbx430-img-pipeline-{}.png", std::process::id()));
    image::RgbImage::from_pixel(12, 4, image::Rgb([0, 0, 0]))
        .save(&path)
        .unwrap();

    let mut cfg = config(6);
    cfg.scale = ScaleMethod::Nearest;
    let result = convert_image(&ImageCrateBackend, &path, &cfg);
    let _ = std::fs::remove_file(&path);
    let encoded = result.unwrap();

    // Black inverts to full intensity on every pixel.
    assert_eq!(encoded.height, 2);
    assert_eq!(encoded.codes, vec![0x04FE]);
    assert_eq!(
        render_array(encoded.width, encoded.height, &encoded.codes, OutputFormat::OneLine),
        "{6,2,0x04fe};\n"
    );
}
