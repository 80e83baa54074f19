//! This module contains the pure, stateless kernels for packing 5-bit pixel
//! intensities into 16-bit LCD words and unpacking them again.
//!
//! Three consecutive intensities `(p0, p1, p2)` become one word laid out as:
//!
//! ```text
//!  15      11 10       6   5   4       0
//! +----------+----------+---+----------+
//! |    p2    |    p1    | 0 |    p0    |
//! +----------+----------+---+----------+
//! ```
//!
//! Bit 5 is never set by `encode`. The run-length escapes in `rle` rely on this:
//! every escape low byte (0xFF, 0xFE, 0xF0) has bit 5 set, so a packed literal
//! can never be mistaken for one. The shift amounts are a wire contract with the
//! board's LCD driver and must not change.

use crate::error::Rbx430Error;

//==================================================================================
// 0. Layout Constants
//==================================================================================

/// The largest intensity a 5-bit channel can hold.
pub const MAX_INTENSITY: u8 = 31;
/// Number of intensities packed into each word.
pub const PIXELS_PER_WORD: usize = 3;

const P0_SHIFT: u16 = 0;
const P1_SHIFT: u16 = 6;
const P2_SHIFT: u16 = 11;
const CHANNEL_MASK: u16 = 0x1F;

/// The always-zero padding bit between `p0` and `p1`.
pub const RESERVED_BIT: u16 = 1 << 5;

//==================================================================================
// 1. Single-Word Operations
//==================================================================================

/// Packs one triple into a word. Callers must pass values no larger than 31.
#[inline]
pub const fn pack_triple(p0: u8, p1: u8, p2: u8) -> u16 {
    ((p2 as u16) << P2_SHIFT) | ((p1 as u16) << P1_SHIFT) | ((p0 as u16) << P0_SHIFT)
}

/// Splits a word back into its `[p0, p1, p2]` triple, ignoring the padding bit.
#[inline]
pub const fn unpack_word(word: u16) -> [u8; 3] {
    [
        ((word >> P0_SHIFT) & CHANNEL_MASK) as u8,
        ((word >> P1_SHIFT) & CHANNEL_MASK) as u8,
        ((word >> P2_SHIFT) & CHANNEL_MASK) as u8,
    ]
}

//==================================================================================
// 2. Public API (Slice Operations)
//==================================================================================

/// Packs a row-major intensity sequence into words, one word per triple.
pub fn encode(input_slice: &[u8], output_buf: &mut Vec<u16>) -> Result<(), Rbx430Error> {
    output_buf.clear();

    if input_slice.len() % PIXELS_PER_WORD != 0 {
        return Err(Rbx430Error::InvalidInputLength {
            len: input_slice.len(),
        });
    }
    if let Some(index) = input_slice.iter().position(|&v| v > MAX_INTENSITY) {
        return Err(Rbx430Error::InvalidIntensity {
            index,
            value: input_slice[index],
        });
    }

    output_buf.reserve(input_slice.len() / PIXELS_PER_WORD);
    output_buf.extend(
        input_slice
            .chunks_exact(PIXELS_PER_WORD)
            .map(|t| pack_triple(t[0], t[1], t[2])),
    );
    Ok(())
}

/// Unpacks words back into the flat intensity sequence.
///
/// # Errors
/// Returns `Rbx430Error::ReservedBitSet` for a word that `encode` could not have
/// produced, which usually means an escape code leaked into the word stream.
pub fn decode(input_slice: &[u16], output_buf: &mut Vec<u8>) -> Result<(), Rbx430Error> {
    output_buf.clear();
    output_buf.reserve(input_slice.len() * PIXELS_PER_WORD);

    for &word in input_slice {
        if word & RESERVED_BIT != 0 {
            return Err(Rbx430Error::ReservedBitSet(word));
        }
        output_buf.extend_from_slice(&unpack_word(word));
    }
    Ok(())
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
