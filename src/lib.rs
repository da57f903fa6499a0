//! Dynamic time warping alignment between a real (recorded) and a synthesized
//! (reference) sequence of MFCC frames.
//!
//! [`Aligner`] is the single entry point: it validates a pair of
//! [`MfccSequences`], picks between the exact and banded engines per
//! [`DtwConfig`], and returns a [`Path`] with real-sequence indices already
//! shifted back to absolute frame numbers.

mod aligner;
mod config;
mod cost;
mod error;
mod exact;
mod path;
mod stripe;

pub use aligner::{Aligner, MfccSequences};
pub use config::{Algorithm, DtwConfig};
pub use error::{DtwError, Result};
pub use path::Path;
