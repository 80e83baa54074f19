// In: src/codec.rs

//! The stateless, owned-value facade over the codec kernels.
//!
//! The kernels write into caller-supplied buffers so they can be reused in hot
//! loops; these wrappers allocate a fresh `Vec` per call, which is what the
//! pipeline and most callers want.

use crate::error::Rbx430Error;
use crate::kernels::{pack as pack_kernel, rle};

/// Packs a row-major sequence of 5-bit intensities into LCD words.
pub fn pack(intensities: &[u8]) -> Result<Vec<u16>, Rbx430Error> {
    let mut words = Vec::new();
    pack_kernel::encode(intensities, &mut words)?;
    Ok(words)
}

/// Recovers the intensity sequence from packed words.
pub fn unpack(words: &[u16]) -> Result<Vec<u8>, Rbx430Error> {
    let mut intensities = Vec::new();
    pack_kernel::decode(words, &mut intensities)?;
    Ok(intensities)
}

/// Run-length compresses a packed word sequence.
pub fn compress(words: &[u16]) -> Vec<u16> {
    let mut codes = Vec::with_capacity(words.len());
    rle::encode(words, &mut codes);
    log::debug!("rle: {} words -> {} codes", words.len(), codes.len());
    codes
}

/// Expands a compressed code sequence back into packed words.
pub fn decode(codes: &[u16]) -> Result<Vec<u16>, Rbx430Error> {
    let mut words = Vec::new();
    rle::decode(codes, &mut words)?;
    Ok(words)
}
