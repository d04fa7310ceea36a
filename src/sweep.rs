use serde::Deserialize;
use tracing::{info, info_span};

use crate::classifier::Classifier;
use crate::error::{Error, Result};
use crate::metrics::accuracy;
use crate::preprocess::LabeledFeatures;

/// Accuracy per candidate neighbor count, in sweep order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepResult {
    points: Vec<(usize, f64)>,
}

impl SweepResult {
    pub fn points(&self) -> &[(usize, f64)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Candidate with the highest accuracy; the earliest one wins ties.
    pub fn best(&self) -> Option<(usize, f64)> {
        self.points
            .iter()
            .copied()
            .fold(None, |best: Option<(usize, f64)>, point| match best {
                Some(b) if b.1 >= point.1 => Some(b),
                _ => Some(point),
            })
    }
}

impl From<Vec<(usize, f64)>> for SweepResult {
    fn from(points: Vec<(usize, f64)>) -> Self {
        Self { points }
    }
}

/// How the reported neighbor count is chosen.
///
/// `Fixed` reports at the configured `report.k`; `Argmax` picks the sweep
/// candidate with the best accuracy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Selection {
    Fixed,
    Argmax,
}

impl Selection {
    pub fn choose(self, fixed_k: usize, result: &SweepResult) -> Result<usize> {
        match self {
            Selection::Fixed => Ok(fixed_k),
            Selection::Argmax => result.best().map(|(k, _)| k).ok_or(Error::EmptySweep),
        }
    }
}

/// Trains and scores one classifier per candidate, in order.
///
/// Any failing candidate aborts the sweep; the error names the candidate.
pub fn sweep<C, F>(
    train: &LabeledFeatures,
    eval: &LabeledFeatures,
    candidates: impl IntoIterator<Item = usize>,
    make_classifier: F,
) -> Result<SweepResult>
where
    C: Classifier,
    F: Fn(usize) -> C,
{
    let _span = info_span!("sweep").entered();
    let mut points = Vec::new();

    for k in candidates {
        let score = || -> Result<f64> {
            let mut model = make_classifier(k);
            model.fit(train.features.view(), &train.labels)?;
            let predictions = model.predict(eval.features.view())?;
            accuracy(&eval.labels, &predictions)
        };

        let acc = score().map_err(|source| Error::Candidate {
            k,
            source: Box::new(source),
        })?;
        info!(k, accuracy = acc, "candidate evaluated");

        points.push((k, acc));
    }

    Ok(SweepResult { points })
}
