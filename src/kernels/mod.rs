//! This module serves as the home of the pure, stateless codec kernels that turn
//! quantized pixel intensities into the word stream read by the LCD driver.
//!
//! The kernels are layered:
//! 1. `pack` folds three 5-bit intensities into one 16-bit word.
//! 2. `rle` replaces runs of identical words with escape codes.
//!
//! Both layers are lossless. `rle` is only unambiguous on the output of `pack`,
//! so the two must always be used in this order.

//==================================================================================
// 1. Module Declarations
//==================================================================================

/// Layer 1: Bit Packing
pub mod pack;

/// Layer 2: Run Exploitation
pub mod rle;
