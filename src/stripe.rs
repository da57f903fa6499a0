//! Sakoe-Chiba banded O(nδ) dynamic time warping.

use ndarray::{Array2, ArrayView2};

use crate::cost::stripe_cost_matrix;
use crate::error::Result;
use crate::path::Path;

/// Banded accumulated cost matrix and the per-row absolute center offsets.
pub(crate) struct StripeAccumulated {
    pub acm: Array2<f64>,
    pub centers: Vec<usize>,
}

/// Computes the banded accumulated cost matrix, in place over the banded
/// cosine-distance cost matrix.
pub(crate) fn accumulated_cost_matrix(
    real: ArrayView2<f64>,
    synt: ArrayView2<f64>,
    delta: usize,
) -> Result<StripeAccumulated> {
    let (mut acm, centers) = stripe_cost_matrix(real, synt, delta)?;
    let (n, delta) = acm.dim();

    for k in 1..delta {
        acm[[0, k]] += acm[[0, k - 1]];
    }
    for i in 1..n {
        let offset = centers[i] - centers[i - 1];
        for k in 0..delta {
            let cost_up = step(&acm, i - 1, k, offset, delta);
            let cost_left = if k > 0 { Some(acm[[i, k - 1]]) } else { None };
            let cost_diag = diag_step(&acm, i - 1, k, offset, delta);
            let best = min3(cost_up, cost_left, cost_diag);
            acm[[i, k]] += best;
        }
    }
    Ok(StripeAccumulated { acm, centers })
}

/// `A[i, k + offset]` if `k + offset` lands inside the band, else `None`.
fn step(acm: &Array2<f64>, i: usize, k: usize, offset: usize, delta: usize) -> Option<f64> {
    let shifted = k + offset;
    (shifted < delta).then(|| acm[[i, shifted]])
}

/// `A[i, k + offset - 1]` if that index lands inside the band, else `None`.
fn diag_step(acm: &Array2<f64>, i: usize, k: usize, offset: usize, delta: usize) -> Option<f64> {
    let shifted = k + offset;
    if shifted == 0 {
        return None;
    }
    let shifted = shifted - 1;
    (shifted < delta).then(|| acm[[i, shifted]])
}

fn min3(a: Option<f64>, b: Option<f64>, c: Option<f64>) -> f64 {
    [a, b, c]
        .into_iter()
        .flatten()
        .fold(f64::INFINITY, f64::min)
}

/// Computes the minimum-cost monotone path, translated to absolute indices.
pub(crate) fn best_path(real: ArrayView2<f64>, synt: ArrayView2<f64>, delta: usize) -> Result<Path> {
    let StripeAccumulated { acm, centers } = accumulated_cost_matrix(real, synt, delta)?;
    Ok(backtrack(&acm, &centers))
}

fn backtrack(acm: &Array2<f64>, centers: &[usize]) -> Path {
    let (n, delta) = acm.dim();
    let mut i = n - 1;
    let mut j = delta - 1 + centers[i];
    let mut reals = vec![i];
    let mut synts = vec![j];

    while i > 0 || j > 0 {
        if i == 0 {
            j -= 1;
        } else if j == 0 {
            i -= 1;
        } else {
            let offset = centers[i] - centers[i - 1];
            let r_j = j - centers[i];
            let cost_up = step(acm, i - 1, r_j, offset, delta);
            let cost_left = if r_j > 0 {
                Some(acm[[i, r_j - 1]])
            } else {
                None
            };
            let cost_diag = if r_j > 0 {
                diag_step(acm, i - 1, r_j, offset, delta)
            } else {
                None
            };
            match argmin(cost_up, cost_left, cost_diag) {
                Move::Up => i -= 1,
                Move::Left => j -= 1,
                Move::Diag => {
                    i -= 1;
                    j -= 1;
                }
            }
        }
        reals.push(i);
        synts.push(j);
    }
    reals.reverse();
    synts.reverse();
    Path::new(reals, synts)
}

enum Move {
    Up,
    Left,
    Diag,
}

/// First argmin among `(up, left, diag)`, `None` costs treated as +infinity.
fn argmin(up: Option<f64>, left: Option<f64>, diag: Option<f64>) -> Move {
    let up = up.unwrap_or(f64::INFINITY);
    let left = left.unwrap_or(f64::INFINITY);
    let diag = diag.unwrap_or(f64::INFINITY);
    if up <= left && up <= diag {
        Move::Up
    } else if left <= diag {
        Move::Left
    } else {
        Move::Diag
    }
}
