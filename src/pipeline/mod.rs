// In: src/pipeline/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Conversion Pipeline
// ====================================================================================
//
// The pipeline is the public entry point that strings the collaborators together.
// Only `convert_image` touches an image; everything after the grayscale step is a
// pure transform over plain slices.
//
// Data Flow (Conversion):
//
//   1. [Imaging backend]   decode -> resize(ScaleMethod) -> to_grayscale
//         |
//   2. [orient_for_panel]  mirror rows, invert luminance
//         |
//   3. [QuantizeStrategy]  8-bit luminance -> 5-bit intensity
//         |
//   4. [encode_intensities]
//         |
//         `-> a. codec::pack       (intensities -> words)
//         `-> b. codec::compress   (words -> codes), skipped in no-compress mode
//         |
//   5. [EncodedImage]      handed to `render` by the caller
//
// Data Flow (Verification):
//
//   [decode_image]  codes -> codec::decode (if compressed) -> codec::unpack
//
// ====================================================================================

use std::path::Path;

use serde::Serialize;

use crate::codec;
use crate::config::ConvertConfig;
use crate::error::Rbx430Error;
use crate::imaging::{orient_for_panel, Imaging};
use crate::kernels::pack::PIXELS_PER_WORD;

/// Words taken by the `(width, height)` header in front of the codes.
pub const HEADER_WORDS: usize = 2;

//==================================================================================
// I. Pipeline Artifacts
//==================================================================================

/// The output of the pipeline: a header plus the code stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub width: u32,
    pub height: u32,
    /// Escape-compressed codes, or raw packed words when `compressed` is false.
    pub codes: Vec<u16>,
    pub compressed: bool,
}

impl EncodedImage {
    /// The array size on the board, header included.
    pub fn words_used(&self) -> usize {
        self.codes.len() + HEADER_WORDS
    }
}

/// Size statistics for an encoded image.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CompressionStats {
    pub width: u32,
    pub height: u32,
    pub pixel_count: usize,
    pub packed_words: usize,
    pub emitted_codes: usize,
    pub total_words: usize,
    /// `emitted_codes / packed_words`; 1.0 for an empty image.
    pub ratio: f64,
}

//==================================================================================
// II. Public API
//==================================================================================

/// Packs, and optionally compresses, a row-major intensity sequence.
///
/// # Errors
/// `DimensionMismatch` if `intensities` does not hold exactly `width * height`
/// samples, plus any packer precondition error.
pub fn encode_intensities(
    width: u32,
    height: u32,
    intensities: &[u8],
    compress: bool,
) -> Result<EncodedImage, Rbx430Error> {
    let expected = width as usize * height as usize;
    if intensities.len() != expected {
        return Err(Rbx430Error::DimensionMismatch {
            expected,
            actual: intensities.len(),
        });
    }

    let words = codec::pack(intensities)?;
    let codes = if compress {
        codec::compress(&words)
    } else {
        words
    };

    Ok(EncodedImage {
        width,
        height,
        codes,
        compressed: compress,
    })
}

/// Runs the whole conversion for one image file.
pub fn convert_image<B: Imaging>(
    backend: &B,
    path: &Path,
    config: &ConvertConfig,
) -> Result<EncodedImage, Rbx430Error> {
    config.validate()?;

    let source = backend.decode(path)?;
    let (source_width, source_height) = backend.dimensions(&source);
    let width = config.width;
    let height = config.resolve_height(source_width, source_height)?;

    log::info!("Converting {} to size {}x{}", path.display(), width, height);

    let resized = backend.resize(&source, width, height, config.scale);
    let mut luma = backend.to_grayscale(&resized);
    orient_for_panel(&mut luma, width as usize);

    let intensities = config.quantize.apply_all(&luma);
    let encoded = encode_intensities(width, height, &intensities, config.compress)?;

    log::info!("The image uses {} words of space.", encoded.words_used());
    Ok(encoded)
}

/// Reverses `encode_intensities`, returning the intensity sequence.
pub fn decode_image(encoded: &EncodedImage) -> Result<Vec<u8>, Rbx430Error> {
    let intensities = if encoded.compressed {
        codec::unpack(&codec::decode(&encoded.codes)?)?
    } else {
        codec::unpack(&encoded.codes)?
    };

    let expected = encoded.width as usize * encoded.height as usize;
    if intensities.len() != expected {
        return Err(Rbx430Error::DimensionMismatch {
            expected,
            actual: intensities.len(),
        });
    }
    Ok(intensities)
}

/// Computes size statistics without decoding the stream.
pub fn analyze(encoded: &EncodedImage) -> CompressionStats {
    let pixel_count = encoded.width as usize * encoded.height as usize;
    let packed_words = pixel_count / PIXELS_PER_WORD;
    let emitted_codes = encoded.codes.len();
    let ratio = if packed_words == 0 {
        1.0
    } else {
        emitted_codes as f64 / packed_words as f64
    };

    CompressionStats {
        width: encoded.width,
        height: encoded.height,
        pixel_count,
        packed_words,
        emitted_codes,
        total_words: encoded.words_used(),
        ratio,
    }
}

#[cfg(test)]
mod tests;
