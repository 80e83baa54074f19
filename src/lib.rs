//! This file is the root of the `rbx430_img` Rust crate.
//!
//! The crate converts raster images into the packed, run-length compressed
//! `uint16` arrays drawn by the RBX430-1 development board's LCD driver.
//!
//! Its responsibilities are split as follows:
//! 1.  `kernels` and `codec`: the pure word codec (packing and escape RLE).
//! 2.  `quantize`, `imaging`, `render`: the collaborators around the codec.
//! 3.  `config` and `pipeline`: the immutable configuration and the entry points
//!     that string everything together.

//==================================================================================
// 1. Module Declarations
//==================================================================================
pub mod codec;
pub mod config;
pub mod error;
pub mod imaging;
pub mod kernels;
pub mod pipeline;
pub mod quantize;
pub mod render;

//==================================================================================
// 2. Re-exports
//==================================================================================
pub use config::ConvertConfig;
pub use error::Rbx430Error;
pub use imaging::{ImageCrateBackend, Imaging, ScaleMethod};
pub use pipeline::{
    analyze, convert_image, decode_image, encode_intensities, CompressionStats, EncodedImage,
};
pub use quantize::QuantizeStrategy;
pub use render::OutputFormat;
