// In: src/error.rs

//! This module defines the single, unified error type for the entire rbx430-img library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Rbx430Error {
    // =========================================================================
    // === Dimension Errors (raised before any pipeline work begins)
    // =========================================================================
    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),

    #[error("The calculated new height ({computed}) is outside the supported range 1-{max}")]
    ComputedDimensionOutOfRange { computed: u64, max: u32 },

    #[error("Image has {actual} intensities, but the requested size needs {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    // =========================================================================
    // === Codec Errors (a breach of the packer/decoder contracts)
    // =========================================================================
    #[error("Intensity sequence length {len} is not a multiple of 3")]
    InvalidInputLength { len: usize },

    #[error("Intensity {value} at index {index} exceeds the 5-bit maximum of 31")]
    InvalidIntensity { index: usize, value: u8 },

    #[error("Word {0:#06x} has the reserved padding bit set")]
    ReservedBitSet(u16),

    #[error("Truncated stream: run escape at position {position} has no following literal")]
    TruncatedStream { position: usize },

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// An error originating from the `image` crate while decoding a source file.
    #[error("Image operation failed: {0}")]
    Image(#[from] image::ImageError),

    /// An error originating from the underlying I/O subsystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error from the Serde JSON library, typically while emitting statistics.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}
