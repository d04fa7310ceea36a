use ndarray::Array2;

use crate::parse::Dataset;

/// Raw intensities are divided by this constant, not by a data-derived maximum.
pub const PIXEL_SCALE: f64 = 255.0;

/// Labels paired with a row-major feature matrix, one row per sample.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledFeatures {
    pub labels: Vec<u8>,
    pub features: Array2<f64>,
}

impl LabeledFeatures {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn width(&self) -> usize {
        self.features.ncols()
    }
}

pub fn rescale(features: &Array2<f64>) -> Array2<f64> {
    features / PIXEL_SCALE
}

pub fn preprocess(dataset: &Dataset) -> LabeledFeatures {
    let raw = Array2::from_shape_fn((dataset.len(), dataset.width()), |(i, j)| {
        f64::from(dataset.samples()[i].pixels[j])
    });

    LabeledFeatures {
        labels: dataset.labels(),
        features: rescale(&raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::Sample;
    use approx::assert_abs_diff_eq;

    fn dataset() -> Dataset {
        Dataset::new(
            "d",
            vec![
                Sample {
                    label: 3,
                    pixels: vec![0, 51, 255],
                },
                Sample {
                    label: 9,
                    pixels: vec![255, 255, 1],
                },
            ],
        )
        .unwrap()
    }

    #[test]
    fn scales_into_unit_interval() {
        let prepared = preprocess(&dataset());

        assert_eq!(prepared.labels, vec![3, 9]);
        assert_eq!(prepared.features.dim(), (2, 3));
        assert_abs_diff_eq!(prepared.features[(0, 0)], 0.0);
        assert_abs_diff_eq!(prepared.features[(0, 1)], 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(prepared.features[(1, 0)], 1.0);
        assert!(prepared
            .features
            .iter()
            .all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn every_raw_intensity_maps_into_unit_interval() {
        let samples = (0..=255u8)
            .map(|p| Sample {
                label: p % 10,
                pixels: vec![p],
            })
            .collect();
        let prepared = preprocess(&Dataset::new("all", samples).unwrap());

        assert!(prepared
            .features
            .iter()
            .all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn double_scaling_is_not_idempotent() {
        let once = preprocess(&dataset()).features;
        let twice = rescale(&once);

        assert_ne!(once, twice);
        assert_abs_diff_eq!(twice[(1, 0)], 1.0 / 255.0, epsilon = 1e-12);
    }
}
