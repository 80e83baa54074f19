//! Maps 8-bit luminance onto the 5-bit intensity scale of the LCD.
//!
//! Strategies are a closed enum picked once when the configuration is built.
//! Every strategy maps `0` to `0` and `255` to `31`.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::kernels::pack::MAX_INTENSITY;

/// The function used to reduce a luminance sample to 5 bits.
#[derive(
    Serialize, Deserialize, ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum QuantizeStrategy {
    /// Square-root curve. Spends more levels on the dark end, where the panel
    /// is least able to tell shades apart.
    #[default]
    #[value(name = "squareroot")]
    SquareRoot,
    /// Nearest level on an evenly spaced scale. More accurate than `Linear`.
    #[value(name = "round")]
    Round,
    /// Plain truncation to the top five bits.
    #[value(name = "linear")]
    Linear,
    /// Black or white, split at the midpoint.
    #[value(name = "bwround")]
    BwRound,
    /// White for anything that is not pure black.
    #[value(name = "bwnonzero")]
    BwNonzero,
}

impl QuantizeStrategy {
    /// Quantizes one luminance sample.
    pub fn apply(self, luma: u8) -> u8 {
        let v = f64::from(luma);
        let level = match self {
            Self::SquareRoot => ((v + 1.0).sqrt() - 1.0) * 2.05,
            Self::Round => v / 8.225806451612904,
            Self::Linear => return luma / 8,
            Self::BwRound => (v / 256.0).round_ties_even() * f64::from(MAX_INTENSITY),
            Self::BwNonzero => {
                return if luma != 0 { MAX_INTENSITY } else { 0 };
            }
        };
        (level.round_ties_even() as u8).min(MAX_INTENSITY)
    }

    /// Quantizes a whole luminance buffer.
    pub fn apply_all(self, luma: &[u8]) -> Vec<u8> {
        luma.iter().map(|&v| self.apply(v)).collect()
    }
}
