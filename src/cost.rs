//! Cosine-distance cost matrices shared by [`crate::exact`] and [`crate::stripe`].

use ndarray::{s, Array1, Array2, ArrayView2, Axis};

use crate::error::{DtwError, Result};

/// Below this magnitude a column norm is treated as zero.
const NORM_EPSILON: f64 = 1e-12;

/// Validates raw MFCC matrix shape and drops coefficient 0 (energy).
///
/// Returns a view with shape `(C-1, L)`.
fn reduced_view<'a>(m: ArrayView2<'a, f64>, label: &str) -> Result<ArrayView2<'a, f64>> {
    let (coeffs, frames) = m.dim();
    if coeffs < 2 {
        return Err(DtwError::InvalidInput(format!(
            "{label} MFCC matrix has {coeffs} coefficient rows, need at least 2"
        )));
    }
    if frames == 0 {
        return Err(DtwError::InvalidInput(format!(
            "{label} MFCC matrix has zero frames"
        )));
    }
    Ok(m.slice(s![1.., ..]))
}

/// Per-column L2 norms of a `(C-1, L)` matrix, one entry per frame.
fn column_norms(m: ArrayView2<f64>) -> Array1<f64> {
    m.map_axis(Axis(0), |column| column.dot(&column).sqrt())
}

/// Cosine distance for a single column pair, with the zero-norm substitution.
fn cosine_distance(dot: f64, norm_i: f64, norm_j: f64, i: usize, j: usize) -> f64 {
    let denom = norm_i * norm_j;
    if denom <= NORM_EPSILON {
        tracing::debug!(i, j, "zero-norm MFCC column; substituting cost 1.0");
        1.0
    } else {
        1.0 - dot / denom
    }
}

/// Full `(n, m)` cosine-distance cost matrix, `n` and `m` the frame counts of
/// `real` and `synt` respectively.
pub(crate) fn exact_cost_matrix(real: ArrayView2<f64>, synt: ArrayView2<f64>) -> Result<Array2<f64>> {
    let real = reduced_view(real, "real")?;
    let synt = reduced_view(synt, "synt")?;
    let n = real.ncols();
    let m = synt.ncols();

    let norms_real = column_norms(real);
    let norms_synt = column_norms(synt);
    let gram = real.t().dot(&synt);

    let mut cost = Array2::<f64>::zeros((n, m));
    for i in 0..n {
        for j in 0..m {
            cost[[i, j]] = cosine_distance(gram[[i, j]], norms_real[i], norms_synt[j], i, j);
        }
    }
    Ok(cost)
}

/// Banded `(n, delta)` cost matrix along a Sakoe-Chiba stripe, plus the
/// per-row absolute center offsets.
///
/// `delta` is clamped to `m` (the synthesized frame count) before use.
pub(crate) fn stripe_cost_matrix(
    real: ArrayView2<f64>,
    synt: ArrayView2<f64>,
    delta: usize,
) -> Result<(Array2<f64>, Vec<usize>)> {
    let real = reduced_view(real, "real")?;
    let synt = reduced_view(synt, "synt")?;
    let n = real.ncols();
    let m = synt.ncols();

    if delta == 0 {
        return Err(DtwError::InvalidInput(
            "stripe delta must be positive".to_string(),
        ));
    }
    let delta = delta.min(m);

    let norms_real = column_norms(real);
    let norms_synt = column_norms(synt);

    let mut cost = Array2::<f64>::zeros((n, delta));
    let mut centers = vec![0usize; n];
    for i in 0..n {
        let center_j = (m * i) / n;
        let half = delta / 2;
        let mut range_start = center_j.saturating_sub(half);
        let mut range_end = range_start + delta;
        if range_end > m {
            range_end = m;
            range_start = range_end - delta;
        }
        centers[i] = range_start;

        for k in 0..delta {
            let j = range_start + k;
            let dot: f64 = (0..real.nrows()).map(|c| real[[c, i]] * synt[[c, j]]).sum();
            cost[[i, k]] = cosine_distance(dot, norms_real[i], norms_synt[j], i, j);
        }
        debug_assert_eq!(range_end - range_start, delta);
    }
    Ok((cost, centers))
}
