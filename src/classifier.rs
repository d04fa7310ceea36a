use ndarray::ArrayView2;

use crate::error::Result;

/// The capability the sweep and the reporter need from a model: learn from
/// labeled rows, then label new rows.
pub trait Classifier {
    fn fit(&mut self, features: ArrayView2<f64>, labels: &[u8]) -> Result<()>;

    /// Returns one label per row of `features`, in row order.
    fn predict(&self, features: ArrayView2<f64>) -> Result<Vec<u8>>;
}
