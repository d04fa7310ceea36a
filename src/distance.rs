//! Squared Euclidean distances between query rows and training rows.

use ndarray::{Array1, Array2, ArrayView2, Axis};

pub(crate) fn row_sq_norms(matrix: ArrayView2<f64>) -> Array1<f64> {
    matrix.map_axis(Axis(1), |row| row.dot(&row))
}

/// Computes the `queries.nrows() × train.nrows()` tile of squared distances.
///
/// Uses the expansion `|q − t|² = |q|² + |t|² − 2 q·t` so the bulk of the work
/// is a single matrix product. Rounding can push an exact match slightly
/// below zero, so every entry is clamped at 0.
pub(crate) fn sq_distances(
    queries: ArrayView2<f64>,
    train: ArrayView2<f64>,
    train_norms: &Array1<f64>,
) -> Array2<f64> {
    debug_assert_eq!(queries.ncols(), train.ncols());
    debug_assert_eq!(train.nrows(), train_norms.len());

    let query_norms = row_sq_norms(queries);
    let mut out = queries.dot(&train.t());

    for (mut row, &q) in out.outer_iter_mut().zip(query_norms.iter()) {
        row.zip_mut_with(train_norms, |d, &t| *d = (q + t - 2.0 * *d).max(0.0));
    }

    out
}
