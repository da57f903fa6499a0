//! Typed error surface for the DTW engine.

/// Convenience alias for results returned by this crate.
pub type Result<T> = std::result::Result<T, DtwError>;

/// Error kinds surfaced by the DTW engine.
///
/// `NumericalDegenerate` (zero-norm MFCC columns) is intentionally not a
/// variant here: it is absorbed locally by the cost kernel and must never
/// reach a caller as an `Err`.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DtwError {
    /// A matrix shape, algorithm name, or configuration value was invalid.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The coordinator was invoked before both MFCC sequences were supplied.
    #[error("aligner not initialized: {0}")]
    NotInitialized(String),

    /// Both a native fast path and its portable fallback failed.
    ///
    /// Unreachable today since this crate ships only the portable path; kept
    /// so a downstream crate with a native extension can report through the
    /// same type.
    #[error("computation failed: {0}")]
    ComputationFailure(String),
}
