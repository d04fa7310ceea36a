use std::fmt;

use crate::error::{Error, Result};
use crate::parse::NUM_CLASSES;

fn check_lengths(truth: &[u8], predicted: &[u8]) -> Result<()> {
    if truth.len() != predicted.len() {
        return Err(Error::PredictionLengthMismatch {
            truth: truth.len(),
            predicted: predicted.len(),
        });
    }
    if truth.is_empty() {
        return Err(Error::EmptyDataset {
            name: "evaluation".to_string(),
        });
    }
    Ok(())
}

/// Percentage of predictions that exactly match the true label.
pub fn accuracy(truth: &[u8], predicted: &[u8]) -> Result<f64> {
    check_lengths(truth, predicted)?;

    let correct_predictions = truth
        .iter()
        .zip(predicted)
        .filter(|(t, p)| t == p)
        .count();

    Ok((correct_predictions as f64 / truth.len() as f64) * 100.0)
}

/// Counts of (true label, predicted label) pairs over the ten digit classes.
/// Rows are indexed by the true label, columns by the predicted label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfusionMatrix {
    counts: [[usize; NUM_CLASSES]; NUM_CLASSES],
}

impl ConfusionMatrix {
    pub fn from_predictions(truth: &[u8], predicted: &[u8]) -> Result<Self> {
        check_lengths(truth, predicted)?;

        let mut counts = [[0; NUM_CLASSES]; NUM_CLASSES];
        for (&t, &p) in truth.iter().zip(predicted) {
            for label in [t, p] {
                if usize::from(label) >= NUM_CLASSES {
                    return Err(Error::LabelOutOfRange { label });
                }
            }
            counts[usize::from(t)][usize::from(p)] += 1;
        }

        Ok(Self { counts })
    }

    pub fn get(&self, truth: u8, predicted: u8) -> usize {
        self.counts[usize::from(truth)][usize::from(predicted)]
    }

    pub fn rows(&self) -> &[[usize; NUM_CLASSES]; NUM_CLASSES] {
        &self.counts
    }

    /// Number of samples whose true label is `label`.
    pub fn support(&self, label: u8) -> usize {
        self.counts[usize::from(label)].iter().sum()
    }

    /// Number of samples predicted as `label`.
    pub fn predicted_count(&self, label: u8) -> usize {
        self.counts.iter().map(|row| row[usize::from(label)]).sum()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    pub fn f1(&self, label: u8) -> f64 {
        let true_positives = self.get(label, label);
        let denominator = self.support(label) + self.predicted_count(label);
        if denominator == 0 {
            0.0
        } else {
            2.0 * true_positives as f64 / denominator as f64
        }
    }

    /// Per-class F1 averaged with class support as weight, as a percentage.
    pub fn weighted_f1(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }

        let weighted_sum: f64 = (0u8..)
            .take(NUM_CLASSES)
            .map(|label| self.f1(label) * self.support(label) as f64)
            .sum();

        weighted_sum / total as f64 * 100.0
    }
}

impl fmt::Display for ConfusionMatrix {
    /// Bracketed grid with every column right-aligned to the widest count.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .counts
            .iter()
            .flatten()
            .map(|count| count.to_string().len())
            .max()
            .unwrap_or(1);

        for (i, row) in self.counts.iter().enumerate() {
            f.write_str(if i == 0 { "[[" } else { " [" })?;
            for (j, count) in row.iter().enumerate() {
                if j > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{count:>width$}")?;
            }
            f.write_str(if i + 1 == NUM_CLASSES { "]]" } else { "]\n" })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn accuracy_counts_exact_matches() {
        let acc = accuracy(&[1, 2, 3, 4], &[1, 2, 0, 4]).unwrap();
        assert_abs_diff_eq!(acc, 75.0);
    }

    #[test]
    fn accuracy_rejects_mismatched_lengths() {
        let err = accuracy(&[1, 2], &[1]).unwrap_err();
        assert!(matches!(
            err,
            Error::PredictionLengthMismatch {
                truth: 2,
                predicted: 1
            }
        ));
    }

    #[test]
    fn accuracy_rejects_empty() {
        let err = accuracy(&[], &[]).unwrap_err();
        assert!(matches!(err, Error::EmptyDataset { .. }));
    }

    #[test]
    fn row_sums_equal_label_counts() {
        let truth = [0, 0, 1, 1, 1, 9, 9, 5];
        let predicted = [0, 1, 1, 1, 7, 9, 8, 5];
        let matrix = ConfusionMatrix::from_predictions(&truth, &predicted).unwrap();

        assert_eq!(matrix.total(), truth.len());
        for label in (0u8..).take(NUM_CLASSES) {
            let expected = truth.iter().filter(|&&t| t == label).count();
            assert_eq!(matrix.support(label), expected);
        }
        assert_eq!(matrix.get(1, 7), 1);
        assert_eq!(matrix.get(9, 8), 1);
        assert_eq!(matrix.predicted_count(1), 3);
    }

    #[test]
    fn weighted_f1_hand_computed() {
        // class 0: tp=1, support=2, predicted=1 -> f1 = 2/3
        // class 1: tp=2, support=2, predicted=3 -> f1 = 4/5
        // class 2: tp=0, support=1, predicted=0 -> f1 = 0
        // class 3: tp=0, support=0, predicted=1 -> weight 0
        let truth = [0, 0, 1, 1, 2];
        let predicted = [0, 1, 1, 1, 3];
        let matrix = ConfusionMatrix::from_predictions(&truth, &predicted).unwrap();

        let expected = (2.0 / 3.0 * 2.0 + 0.8 * 2.0 + 0.0 * 1.0) / 5.0 * 100.0;
        assert_abs_diff_eq!(matrix.weighted_f1(), expected, epsilon = 1e-9);
    }

    #[test]
    fn perfect_predictions_score_one_hundred() {
        let labels = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 3, 3];
        let matrix = ConfusionMatrix::from_predictions(&labels, &labels).unwrap();

        assert_abs_diff_eq!(matrix.weighted_f1(), 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(accuracy(&labels, &labels).unwrap(), 100.0);
    }

    #[test]
    fn rejects_labels_outside_digit_classes() {
        let err = ConfusionMatrix::from_predictions(&[1], &[12]).unwrap_err();
        assert!(matches!(err, Error::LabelOutOfRange { label: 12 }));
    }

    #[test]
    fn display_right_aligns_columns() {
        let mut truth = vec![0; 974];
        truth.push(1);
        let mut predicted = vec![0; 974];
        predicted.push(0);
        let matrix = ConfusionMatrix::from_predictions(&truth, &predicted).unwrap();

        let rendered = matrix.to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), NUM_CLASSES);
        assert!(lines[0].starts_with("[[974   0   0"));
        assert!(lines[1].starts_with(" [  1   0"));
        assert!(lines[9].ends_with("0]]"));
    }
}
