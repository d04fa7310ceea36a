use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis, Slice};
use rayon::prelude::*;
use tracing::debug;

use crate::classifier::Classifier;
use crate::distance::{row_sq_norms, sq_distances};
use crate::error::{Error, Result};
use crate::parse::NUM_CLASSES;

/// Query rows handled per distance tile. A tile holds
/// `QUERY_BLOCK × n_train` distances.
const QUERY_BLOCK: usize = 32;

struct Fitted {
    features: Array2<f64>,
    labels: Vec<u8>,
    norms: Array1<f64>,
}

/// Brute-force K-nearest-neighbors classifier with uniform majority vote.
///
/// Neighbors are ranked by squared Euclidean distance, ties broken by the
/// lower training index. When several labels collect the same number of
/// votes the smallest label wins.
pub struct KNearestNeighbors {
    k: usize,
    fitted: Option<Fitted>,
}

impl KNearestNeighbors {
    pub fn new(k: usize) -> Self {
        Self { k, fitted: None }
    }

    pub fn k(&self) -> usize {
        self.k
    }
}

impl Classifier for KNearestNeighbors {
    fn fit(&mut self, features: ArrayView2<f64>, labels: &[u8]) -> Result<()> {
        let samples_count = features.nrows();

        if samples_count == 0 {
            return Err(Error::EmptyDataset {
                name: "training".to_string(),
            });
        }
        if labels.len() != samples_count {
            return Err(Error::LabelCountMismatch {
                labels: labels.len(),
                rows: samples_count,
            });
        }
        if self.k == 0 || self.k > samples_count {
            return Err(Error::InvalidK {
                k: self.k,
                n_train: samples_count,
            });
        }
        if let Some(&label) = labels.iter().find(|&&l| usize::from(l) >= NUM_CLASSES) {
            return Err(Error::LabelOutOfRange { label });
        }

        self.fitted = Some(Fitted {
            norms: row_sq_norms(features),
            features: features.to_owned(),
            labels: labels.to_vec(),
        });
        debug!(k = self.k, samples_count, "fitted knn");

        Ok(())
    }

    fn predict(&self, features: ArrayView2<f64>) -> Result<Vec<u8>> {
        let fitted = self.fitted.as_ref().ok_or(Error::NotFitted)?;

        if features.ncols() != fitted.features.ncols() {
            return Err(Error::WidthMismatch {
                expected: fitted.features.ncols(),
                found: features.ncols(),
            });
        }

        let queries_count = features.nrows();
        let blocks_count = queries_count.div_ceil(QUERY_BLOCK);

        let blocks: Vec<Vec<u8>> = (0..blocks_count)
            .into_par_iter()
            .map(|block| {
                let start = block * QUERY_BLOCK;
                let end = (start + QUERY_BLOCK).min(queries_count);
                let tile = sq_distances(
                    features.slice_axis(Axis(0), Slice::from(start..end)),
                    fitted.features.view(),
                    &fitted.norms,
                );

                tile.outer_iter()
                    .map(|distances| vote(distances, &fitted.labels, self.k))
                    .collect::<Vec<u8>>()
            })
            .collect();

        Ok(blocks.concat())
    }
}

fn vote(distances: ArrayView1<f64>, labels: &[u8], k: usize) -> u8 {
    let mut order: Vec<usize> = (0..distances.len()).collect();
    order.select_nth_unstable_by(k - 1, |&a, &b| {
        distances[a].total_cmp(&distances[b]).then(a.cmp(&b))
    });

    let mut votes = [0usize; NUM_CLASSES];
    for &neighbor in &order[..k] {
        votes[usize::from(labels[neighbor])] += 1;
    }

    let mut winner = 0u8;
    for (label, &count) in (0u8..).zip(votes.iter()) {
        if count > votes[usize::from(winner)] {
            winner = label;
        }
    }

    winner
}
