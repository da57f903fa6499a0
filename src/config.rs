//! Configuration for the DTW engine's algorithm-selection knobs.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DtwError, Result};

/// Which DTW engine to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Classical O(nm) algorithm; always exact.
    Exact,
    /// Sakoe-Chiba banded O(nδ) algorithm.
    Stripe,
}

/// Runtime configuration for [`crate::aligner::Aligner`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DtwConfig {
    pub dtw_algorithm: Algorithm,
    /// Margin, in seconds, used to derive the stripe width.
    pub dtw_margin: f64,
    /// MFCC analysis window shift, in seconds.
    pub mfcc_win_shift: f64,
    /// Whether a native fast path is available to the caller.
    ///
    /// This crate has no native fast path of its own; the flag only affects
    /// algorithm selection (see [`crate::aligner::Aligner`]).
    #[serde(default)]
    pub native_available: bool,
}

impl Default for DtwConfig {
    fn default() -> Self {
        Self {
            dtw_algorithm: Algorithm::Stripe,
            dtw_margin: 60.0,
            mfcc_win_shift: 0.040,
            native_available: false,
        }
    }
}

impl DtwConfig {
    /// Validates field ranges, returning `InvalidInput` on violation.
    pub fn validate(&self) -> Result<()> {
        if self.mfcc_win_shift <= 0.0 {
            return Err(DtwError::InvalidInput(format!(
                "mfcc_win_shift must be positive, got {}",
                self.mfcc_win_shift
            )));
        }
        if self.dtw_margin < 0.0 {
            return Err(DtwError::InvalidInput(format!(
                "dtw_margin must be non-negative, got {}",
                self.dtw_margin
            )));
        }
        Ok(())
    }

    /// Deserializes and validates a config from an arbitrary reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let config: DtwConfig = serde_json::from_reader(BufReader::new(reader))
            .map_err(|err| DtwError::InvalidInput(format!("invalid dtw config JSON: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a config from a JSON file on disk.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|err| {
            DtwError::InvalidInput(format!("failed to open dtw config at {path:?}: {err}"))
        })?;
        Self::from_reader(file)
    }

    /// δ, the stripe width in frames: `floor(2 * dtw_margin / mfcc_win_shift)`.
    pub fn delta(&self) -> usize {
        ((2.0 * self.dtw_margin) / self.mfcc_win_shift).floor() as usize
    }
}
