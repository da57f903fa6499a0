//! Classical O(nm) dynamic time warping: exact cost matrix, exact path.

use ndarray::{Array2, ArrayView2};

use crate::cost::exact_cost_matrix;
use crate::error::Result;
use crate::path::Path;

/// Computes the accumulated cost matrix `A` for the exact algorithm, in
/// place over the cosine-distance cost matrix.
pub(crate) fn accumulated_cost_matrix(real: ArrayView2<f64>, synt: ArrayView2<f64>) -> Result<Array2<f64>> {
    let mut acm = exact_cost_matrix(real, synt)?;
    let (n, m) = acm.dim();

    for j in 1..m {
        acm[[0, j]] += acm[[0, j - 1]];
    }
    for i in 1..n {
        acm[[i, 0]] += acm[[i - 1, 0]];
        for j in 1..m {
            let best = acm[[i - 1, j]].min(acm[[i, j - 1]]).min(acm[[i - 1, j - 1]]);
            acm[[i, j]] += best;
        }
    }
    Ok(acm)
}

/// Computes the minimum-cost monotone path between `real` and `synt`.
pub(crate) fn best_path(real: ArrayView2<f64>, synt: ArrayView2<f64>) -> Result<Path> {
    let acm = accumulated_cost_matrix(real, synt)?;
    Ok(backtrack(&acm))
}

fn backtrack(acm: &Array2<f64>) -> Path {
    let (n, m) = acm.dim();
    let mut i = n - 1;
    let mut j = m - 1;
    let mut reals = vec![i];
    let mut synts = vec![j];

    while i > 0 || j > 0 {
        if i == 0 {
            j -= 1;
        } else if j == 0 {
            i -= 1;
        } else {
            let candidates = [acm[[i - 1, j]], acm[[i, j - 1]], acm[[i - 1, j - 1]]];
            let best = argmin(&candidates);
            match best {
                0 => i -= 1,
                1 => j -= 1,
                _ => {
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

/// Index of the first minimum, so ties prefer up, then left, then diagonal.
fn argmin(costs: &[f64; 3]) -> usize {
    let mut best_idx = 0;
    for idx in 1..3 {
        if costs[idx] < costs[best_idx] {
            best_idx = idx;
        }
    }
    best_idx
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn col2(row0: &[f64], row1: &[f64]) -> ndarray::Array2<f64> {
        ndarray::Array2::from_shape_fn((2, row0.len()), |(r, c)| if r == 0 { row0[c] } else { row1[c] })
    }

    #[test]
    fn identical_constant_sequences_align_diagonally_at_zero_cost() {
        let m = array![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]];
        let acm = accumulated_cost_matrix(m.view(), m.view()).unwrap();
        assert_relative_eq!(acm[[2, 2]], 0.0, epsilon = 1e-12);

        let path = best_path(m.view(), m.view()).unwrap();
        assert_eq!(path.real_indices, vec![0, 1, 2]);
        assert_eq!(path.synt_indices, vec![0, 1, 2]);
    }

    #[test]
    fn uniform_orthogonal_cost_prefers_the_diagonal_path() {
        // C = 3; after dropping row 0, columns are (1,0),(1,0) vs (0,1),(0,1):
        // every pairwise cosine distance is 1, so the diagonal-heavy path
        // (fewer cells visited) strictly beats any path with an orthogonal step.
        let real = ndarray::array![[0.0, 0.0], [1.0, 1.0], [0.0, 0.0]];
        let synt = ndarray::array![[0.0, 0.0], [0.0, 0.0], [1.0, 1.0]];
        let cost = exact_cost_matrix(real.view(), synt.view()).unwrap();
        for v in cost.iter() {
            assert_relative_eq!(*v, 1.0, epsilon = 1e-12);
        }

        let acm = accumulated_cost_matrix(real.view(), synt.view()).unwrap();
        assert_relative_eq!(acm[[1, 1]], 2.0, epsilon = 1e-12);

        let path = best_path(real.view(), synt.view()).unwrap();
        assert_eq!(path.real_indices, vec![0, 1]);
        assert_eq!(path.synt_indices, vec![0, 1]);
    }

    #[test]
    fn single_degenerate_column_breaks_ties_toward_up_then_left() {
        // n=3, m=5; the middle synt frame has zero energy in the surviving
        // coefficient, so exactly one column pair is degenerate (cost 1) and
        // every other pair is parallel (cost 0). Optimal total cost is 1,
        // with the up/left/diag tie-break picking the "hug the top row, then
        // drop down the last column" path.
        let real = col2(&[0.0, 0.0, 0.0], &[1.0, 1.0, 1.0]);
        let synt = col2(&[0.0, 0.0, 0.0, 0.0, 0.0], &[1.0, 1.0, 0.0, 1.0, 1.0]);

        let acm = accumulated_cost_matrix(real.view(), synt.view()).unwrap();
        assert_relative_eq!(acm[[2, 4]], 1.0, epsilon = 1e-9);

        let path = best_path(real.view(), synt.view()).unwrap();
        assert_eq!(path.real_indices, vec![0, 0, 0, 0, 0, 1, 2]);
        assert_eq!(path.synt_indices, vec![0, 1, 2, 3, 4, 4, 4]);
    }

    #[test]
    fn path_is_monotone_and_anchored() {
        let real = col2(&[0.1, 0.4, 0.9, 0.2], &[0.9, 0.6, 0.1, 0.8]);
        let synt = col2(&[0.2, 0.3, 0.95], &[0.8, 0.7, 0.05]);
        let path = best_path(real.view(), synt.view()).unwrap();

        assert_eq!((path.real_indices[0], path.synt_indices[0]), (0, 0));
        assert_eq!(
            (*path.real_indices.last().unwrap(), *path.synt_indices.last().unwrap()),
            (3, 2)
        );
        for w in path.real_indices.windows(2).zip(path.synt_indices.windows(2)) {
            let (ri, si) = w;
            let dr = ri[1] as i64 - ri[0] as i64;
            let ds = si[1] as i64 - si[0] as i64;
            assert!(matches!((dr, ds), (1, 0) | (0, 1) | (1, 1)));
        }
    }

    #[test]
    fn cost_consistency_matches_accumulated_value() {
        let real = col2(&[0.1, 0.9, 0.2], &[0.9, 0.1, 0.8]);
        let synt = col2(&[0.2, 0.3], &[0.8, 0.7]);
        let cost = exact_cost_matrix(real.view(), synt.view()).unwrap();
        let acm = accumulated_cost_matrix(real.view(), synt.view()).unwrap();
        let path = best_path(real.view(), synt.view()).unwrap();

        let path_cost: f64 = path
            .real_indices
            .iter()
            .zip(path.synt_indices.iter())
            .map(|(&i, &j)| cost[[i, j]])
            .sum();
        let (n, m) = acm.dim();
        assert_relative_eq!(path_cost, acm[[n - 1, m - 1]], epsilon = 1e-9);
    }
}
