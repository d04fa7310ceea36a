use csv::ReaderBuilder;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

use crate::error::{Error, Result};

pub const NUM_CLASSES: usize = 10;
pub const DEFAULT_LABEL_COLUMN: &str = "label";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub label: u8,
    pub pixels: Vec<u8>,
}

/// An ordered, non-empty sequence of samples sharing one feature width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    name: String,
    width: usize,
    samples: Vec<Sample>,
}

impl Dataset {
    pub fn new(name: impl Into<String>, samples: Vec<Sample>) -> Result<Self> {
        let name = name.into();
        let Some(first) = samples.first() else {
            return Err(Error::EmptyDataset { name });
        };
        let width = first.pixels.len();

        for (row, sample) in samples.iter().enumerate() {
            if sample.pixels.len() != width {
                return Err(Error::RaggedSample {
                    row,
                    expected: width,
                    found: sample.pixels.len(),
                });
            }
            if usize::from(sample.label) >= NUM_CLASSES {
                return Err(Error::LabelOutOfRange {
                    label: sample.label,
                });
            }
        }

        Ok(Self {
            name,
            width,
            samples,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn labels(&self) -> Vec<u8> {
        self.samples.iter().map(|s| s.label).collect()
    }

    /// Splits into a head of `floor(len * train_ratio)` samples and the
    /// remaining tail, without shuffling.
    pub fn split(self, train_ratio: f64) -> Result<(Dataset, Dataset)> {
        if train_ratio.is_nan() || train_ratio <= 0.0 || train_ratio >= 1.0 {
            return Err(Error::InvalidSplitRatio { ratio: train_ratio });
        }

        #[allow(clippy::cast_possible_truncation)]
        #[allow(clippy::cast_sign_loss)]
        let train_size = (self.samples.len() as f64 * train_ratio) as usize;

        let mut first = self.samples;
        let second = first.split_off(train_size);

        let train = Dataset::new(format!("{}[train]", self.name), first)?;
        let eval = Dataset::new(format!("{}[eval]", self.name), second)?;

        Ok((train, eval))
    }
}

/// Reads a headed CSV file: the `label_column` holds the digit, every other
/// column is a pixel intensity in `0..=255`.
pub fn parse(file_path: impl AsRef<Path>, label_column: &str) -> Result<Dataset> {
    let path = file_path.as_ref();
    let csv_error = |source| Error::Csv {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(BufReader::new(file));

    let label_index = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .position(|header| header.trim() == label_column)
        .ok_or_else(|| Error::MissingLabelColumn {
            path: path.to_path_buf(),
            column: label_column.to_string(),
        })?;

    let mut samples = Vec::new();

    for (index, result) in reader.records().enumerate() {
        let record = result.map_err(csv_error)?;
        let row = index + 1;

        let label_str = record.get(label_index).unwrap_or_default().trim();
        let label = match label_str.parse::<u8>() {
            Ok(label) if usize::from(label) < NUM_CLASSES => label,
            _ => {
                return Err(Error::InvalidLabel {
                    path: path.to_path_buf(),
                    row,
                    value: label_str.to_string(),
                })
            }
        };

        let pixels = record
            .iter()
            .enumerate()
            .filter(|&(column, _)| column != label_index)
            .map(|(column, value)| {
                value.trim().parse::<u8>().map_err(|_| Error::InvalidPixel {
                    path: path.to_path_buf(),
                    row,
                    column,
                    value: value.to_string(),
                })
            })
            .collect::<Result<Vec<u8>>>()?;

        samples.push(Sample { label, pixels });
    }

    let dataset = Dataset::new(path.display().to_string(), samples)?;
    debug!(
        path = %path.display(),
        rows = dataset.len(),
        width = dataset.width(),
        "parsed dataset"
    );

    Ok(dataset)
}
