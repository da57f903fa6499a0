//! Coordinator: validates inputs, selects an engine, and translates results
//! back to absolute frame indices.

use ndarray::{Array2, ArrayView2};
use tracing::info;

use crate::config::{Algorithm, DtwConfig};
use crate::error::{DtwError, Result};
use crate::path::Path;
use crate::{exact, stripe};

/// The two MFCC matrices (middle region, coefficients dropped lazily inside
/// the cost kernel) that a single alignment call needs.
#[derive(Debug, Clone)]
pub struct MfccSequences<'a> {
    pub real: ArrayView2<'a, f64>,
    pub synt: ArrayView2<'a, f64>,
}

impl<'a> MfccSequences<'a> {
    pub fn new(real: ArrayView2<'a, f64>, synt: ArrayView2<'a, f64>) -> Self {
        Self { real, synt }
    }

    fn validate(&self) -> Result<()> {
        if self.real.ncols() == 0 {
            return Err(DtwError::NotInitialized(
                "real MFCC sequence has no frames".to_string(),
            ));
        }
        if self.synt.ncols() == 0 {
            return Err(DtwError::NotInitialized(
                "synt MFCC sequence has no frames".to_string(),
            ));
        }
        Ok(())
    }
}

/// Selects between the exact and banded DTW engines and runs them.
#[derive(Debug, Clone)]
pub struct Aligner {
    config: DtwConfig,
}

impl Aligner {
    pub fn new(config: DtwConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DtwConfig {
        &self.config
    }

    /// Returns the accumulated cost matrix from the selected engine.
    pub fn compute_accumulated_cost_matrix(&self, sequences: &MfccSequences) -> Result<Array2<f64>> {
        sequences.validate()?;
        match self.select_algorithm(sequences)? {
            Selected::Exact => exact::accumulated_cost_matrix(sequences.real, sequences.synt),
            Selected::Stripe(delta) => {
                stripe::accumulated_cost_matrix(sequences.real, sequences.synt, delta)
                    .map(|acc| acc.acm)
            }
        }
    }

    /// Computes the min-cost path and offsets real-sequence indices by
    /// `head_length`.
    pub fn compute_path(&self, sequences: &MfccSequences, head_length: usize) -> Result<Path> {
        sequences.validate()?;
        let path = match self.select_algorithm(sequences)? {
            Selected::Exact => exact::best_path(sequences.real, sequences.synt)?,
            Selected::Stripe(delta) => stripe::best_path(sequences.real, sequences.synt, delta)?,
        };
        Ok(path.offset_real(head_length))
    }

    fn select_algorithm(&self, sequences: &MfccSequences) -> Result<Selected> {
        let delta = self.config.delta();
        if delta == 0 {
            return Err(DtwError::InvalidInput(
                "derived stripe delta must be positive".to_string(),
            ));
        }
        let m = sequences.synt.ncols();
        let n = sequences.real.ncols();

        let mut algorithm = self.config.dtw_algorithm;
        if m <= delta && !self.config.native_available {
            algorithm = Algorithm::Exact;
        }

        info!(n, m, delta, algorithm = ?algorithm, "selected DTW algorithm");

        Ok(match algorithm {
            Algorithm::Exact => Selected::Exact,
            Algorithm::Stripe => Selected::Stripe(delta.min(m)),
        })
    }
}

enum Selected {
    Exact,
    Stripe(usize),
}
