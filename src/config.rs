// In: src/config.rs

//! The single source of truth for converter configuration.
//!
//! `ConvertConfig` is built once at the application boundary (the CLI, or a
//! JSON document via serde) and then handed to the pipeline by reference. It is
//! never mutated after construction.
//!
//! This module also owns the dimension rules of the RBX430-1 LCD, because the
//! configuration is where they are first enforced.

use serde::{Deserialize, Serialize};

use crate::error::Rbx430Error;
use crate::imaging::ScaleMethod;
use crate::quantize::QuantizeStrategy;
use crate::render::OutputFormat;

//==================================================================================
// I. Panel Dimension Rules
//==================================================================================

/// Widest image the converter accepts. Must stay a multiple of 3.
pub const MAX_WIDTH: u32 = 159;
/// Tallest image the panel can show.
pub const MAX_HEIGHT: u32 = 160;

/// Checks that `width` is a positive multiple of 3 no larger than [`MAX_WIDTH`].
pub fn validate_width(width: u32) -> Result<u32, Rbx430Error> {
    if width == 0 || width % 3 != 0 || width > MAX_WIDTH {
        return Err(Rbx430Error::InvalidDimension(format!(
            "width must be a multiple of 3 from 3-{}, got {}",
            MAX_WIDTH, width
        )));
    }
    Ok(width)
}

/// Checks that `height` lies in `1..=MAX_HEIGHT`.
pub fn validate_height(height: u32) -> Result<u32, Rbx430Error> {
    if height == 0 || height > MAX_HEIGHT {
        return Err(Rbx430Error::InvalidDimension(format!(
            "height must be from 1-{}, got {}",
            MAX_HEIGHT, height
        )));
    }
    Ok(height)
}

/// Derives a height that keeps the source aspect ratio at the target `width`.
///
/// # Errors
/// Returns `Rbx430Error::ComputedDimensionOutOfRange` if the source has a zero
/// dimension or the derived height falls outside `1..=MAX_HEIGHT`.
pub fn derive_height(
    source_width: u32,
    source_height: u32,
    width: u32,
) -> Result<u32, Rbx430Error> {
    if source_width == 0 || source_height == 0 {
        return Err(Rbx430Error::ComputedDimensionOutOfRange {
            computed: 0,
            max: MAX_HEIGHT,
        });
    }

    let ratio = f64::from(source_height) / f64::from(source_width);
    let computed = (ratio * f64::from(width)).round_ties_even() as u64;
    if computed == 0 || computed > u64::from(MAX_HEIGHT) {
        return Err(Rbx430Error::ComputedDimensionOutOfRange {
            computed,
            max: MAX_HEIGHT,
        });
    }
    Ok(computed as u32)
}

//==================================================================================
// II. The Unified ConvertConfig
//==================================================================================

/// Everything the pipeline needs to turn one image into an LCD array.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct ConvertConfig {
    /// Target width in pixels.
    pub width: u32,

    /// Target height in pixels. `None` derives it from the source aspect ratio.
    #[serde(default)]
    pub height: Option<u32>,

    /// Layout of the rendered array.
    #[serde(default)]
    pub format: OutputFormat,

    /// Luminance to 5-bit mapping.
    #[serde(default)]
    pub quantize: QuantizeStrategy,

    /// Filter used when resizing the source image.
    #[serde(default)]
    pub scale: ScaleMethod,

    /// If false, packed words are emitted without run-length compression.
    /// Easier to read when debugging a display.
    #[serde(default = "default_true")]
    pub compress: bool,
}

impl ConvertConfig {
    /// A config with defaults for everything but the width.
    pub fn with_width(width: u32) -> Self {
        Self {
            width,
            height: None,
            format: OutputFormat::default(),
            quantize: QuantizeStrategy::default(),
            scale: ScaleMethod::default(),
            compress: true,
        }
    }

    /// Checks the dimensions eagerly, before any image work starts.
    pub fn validate(&self) -> Result<(), Rbx430Error> {
        validate_width(self.width)?;
        if let Some(height) = self.height {
            validate_height(height)?;
        }
        Ok(())
    }

    /// Resolves the final height given the source image's size.
    pub fn resolve_height(
        &self,
        source_width: u32,
        source_height: u32,
    ) -> Result<u32, Rbx430Error> {
        match self.height {
            Some(height) => validate_height(height),
            None => derive_height(source_width, source_height, self.width),
        }
    }
}

/// Helper for `serde` to default a boolean field to true.
fn default_true() -> bool {
    true
}
