//! This module contains the pure, stateless kernels for the escape-based
//! Run-Length Encoding used by the RBX430-1 LCD driver.
//!
//! Unlike a classic `(value, run_length)` RLE, literals are written as-is and only
//! runs longer than one word are replaced by an escape code. An escape is a word
//! whose low byte is a reserved sentinel and whose high byte is the run length:
//!
//! | low byte | meaning                                          |
//! |----------|--------------------------------------------------|
//! | `0xFF`   | run of `0x0000` (all pixels dark)                |
//! | `0xFE`   | run of `0xFFDF` (all pixels at full intensity)   |
//! | `0xF0`   | run of the literal word that follows the escape  |
//!
//! The scheme carries no tag bit. It is only unambiguous for words produced by
//! `pack::encode`, which never sets bit 5, while every sentinel has bit 5 set.

use crate::error::Rbx430Error;

//==================================================================================
// 0. Format Constants
//==================================================================================

/// Low byte of an escape standing for a run of `0x0000`.
pub const ZERO_RUN_ESCAPE: u8 = 0xFF;
/// Low byte of an escape standing for a run of [`FULL_WORD`].
pub const FULL_RUN_ESCAPE: u8 = 0xFE;
/// Low byte of an escape followed by the literal word being repeated.
pub const GENERIC_RUN_ESCAPE: u8 = 0xF0;

/// The packed word for three pixels at intensity 31.
pub const FULL_WORD: u16 = 0xFFDF;
/// The longest run a single escape can describe.
pub const MAX_RUN_LEN: u8 = u8::MAX;

#[inline]
fn escape(sentinel: u8, run_len: u8) -> u16 {
    ((run_len as u16) << 8) | sentinel as u16
}

//==================================================================================
// 1. Private Core Logic
//==================================================================================

/// Writes the codes for one finished run.
fn emit_run(value: u16, run_len: u8, output_buf: &mut Vec<u16>) {
    match (value, run_len) {
        (_, 1) => output_buf.push(value),
        (0x0000, _) => output_buf.push(escape(ZERO_RUN_ESCAPE, run_len)),
        (FULL_WORD, _) => output_buf.push(escape(FULL_RUN_ESCAPE, run_len)),
        _ => {
            output_buf.push(escape(GENERIC_RUN_ESCAPE, run_len));
            output_buf.push(value);
        }
    }
}

//==================================================================================
// 2. Public API
//==================================================================================

/// Compresses a word sequence in a single left-to-right pass.
///
/// Runs longer than [`MAX_RUN_LEN`] are split into consecutive escapes. The output
/// is never longer than the input.
pub fn encode(input_slice: &[u16], output_buf: &mut Vec<u16>) {
    output_buf.clear();

    let mut run: Option<(u16, u8)> = None;
    for &word in input_slice {
        run = match run {
            Some((value, len)) if value == word && len < MAX_RUN_LEN => Some((value, len + 1)),
            Some((value, len)) => {
                emit_run(value, len, output_buf);
                Some((word, 1))
            }
            None => Some((word, 1)),
        };
    }

    // Flush the final run.
    if let Some((value, len)) = run {
        emit_run(value, len, output_buf);
    }
}

/// Expands a compressed code sequence back into the original words.
///
/// # Errors
/// Returns `Rbx430Error::TruncatedStream` if a generic run escape is the last code
/// in the stream.
pub fn decode(input_slice: &[u16], output_buf: &mut Vec<u16>) -> Result<(), Rbx430Error> {
    output_buf.clear();

    let mut codes = input_slice.iter().copied().enumerate();
    while let Some((position, code)) = codes.next() {
        let run_len = (code >> 8) as usize;
        match (code & 0xFF) as u8 {
            ZERO_RUN_ESCAPE => output_buf.extend(std::iter::repeat(0x0000).take(run_len)),
            FULL_RUN_ESCAPE => output_buf.extend(std::iter::repeat(FULL_WORD).take(run_len)),
            GENERIC_RUN_ESCAPE => {
                let (_, value) = codes
                    .next()
                    .ok_or(Rbx430Error::TruncatedStream { position })?;
                output_buf.extend(std::iter::repeat(value).take(run_len));
            }
            _ => output_buf.push(code),
        }
    }

    Ok(())
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
