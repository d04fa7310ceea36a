use std::path::PathBuf;

/// Error type for every fallible operation in the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to open {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed csv in {}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("column '{column}' not found in {}", path.display())]
    MissingLabelColumn { path: PathBuf, column: String },

    /// A pixel field that is not an integer in `0..=255`.
    #[error("row {row}, column {column} of {}: invalid pixel value '{value}'", path.display())]
    InvalidPixel {
        path: PathBuf,
        row: usize,
        column: usize,
        value: String,
    },

    #[error("row {row} of {}: invalid label '{value}', expected a digit 0-9", path.display())]
    InvalidLabel {
        path: PathBuf,
        row: usize,
        value: String,
    },

    #[error("label {label} is outside the digit classes 0-9")]
    LabelOutOfRange { label: u8 },

    #[error("dataset {name} is empty")]
    EmptyDataset { name: String },

    #[error("sample {row} has {found} features, expected {expected}")]
    RaggedSample {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("feature width mismatch: expected {expected}, got {found}")]
    WidthMismatch { expected: usize, found: usize },

    #[error("{labels} labels for {rows} feature rows")]
    LabelCountMismatch { labels: usize, rows: usize },

    #[error("k must be >= 1 and <= {n_train} training samples, got {k}")]
    InvalidK { k: usize, n_train: usize },

    #[error("classifier has not been fitted")]
    NotFitted,

    #[error("train ratio must lie strictly between 0 and 1, got {ratio}")]
    InvalidSplitRatio { ratio: f64 },

    #[error("{truth} true labels but {predicted} predictions")]
    PredictionLengthMismatch { truth: usize, predicted: usize },

    #[error("candidate K={k} failed")]
    Candidate {
        k: usize,
        #[source]
        source: Box<Error>,
    },

    #[error("sweep produced no results to select from")]
    EmptySweep,

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to render {}: {message}", path.display())]
    Plot { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
