use std::fmt;

use tracing::info_span;

use crate::classifier::Classifier;
use crate::error::Result;
use crate::metrics::{accuracy, ConfusionMatrix};
use crate::preprocess::LabeledFeatures;

/// Final evaluation of a single neighbor count.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub k: usize,
    pub accuracy: f64,
    pub weighted_f1: f64,
    pub confusion: ConfusionMatrix,
}

/// Trains `classifier` once and scores it on `eval`.
pub fn report<C: Classifier>(
    train: &LabeledFeatures,
    eval: &LabeledFeatures,
    k: usize,
    mut classifier: C,
) -> Result<Report> {
    let _span = info_span!("report", k).entered();

    classifier.fit(train.features.view(), &train.labels)?;
    let predictions = classifier.predict(eval.features.view())?;

    let confusion = ConfusionMatrix::from_predictions(&eval.labels, &predictions)?;

    Ok(Report {
        k,
        accuracy: accuracy(&eval.labels, &predictions)?,
        weighted_f1: confusion.weighted_f1(),
        confusion,
    })
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Accuracy of model at K={} is {:?}", self.k, self.accuracy)?;
        writeln!(f, "F1 score of model at K={} is {:?}", self.k, self.weighted_f1)?;
        writeln!(f, "Confusion Matrix:")?;
        write!(f, "{}", self.confusion)
    }
}
