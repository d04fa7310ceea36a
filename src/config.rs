use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::parse::DEFAULT_LABEL_COLUMN;
use crate::plot::{DEFAULT_ACCURACY_CURVE, DEFAULT_DIGIT_GRID};
use crate::sweep::Selection;

/// Top-level run configuration, normally read from a TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub sweep: SweepConfig,

    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub plots: PlotsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataConfig {
    #[serde(default = "default_train")]
    pub train: PathBuf,
    #[serde(default = "default_test")]
    pub test: PathBuf,
    #[serde(default = "default_label_column")]
    pub label_column: String,
    /// When set, the training file alone is split head/tail at this ratio
    /// and the test file is not read.
    #[serde(default)]
    pub split: Option<f64>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            train: default_train(),
            test: default_test(),
            label_column: default_label_column(),
            split: None,
        }
    }
}

fn default_train() -> PathBuf {
    PathBuf::from("mnist_train.csv")
}
fn default_test() -> PathBuf {
    PathBuf::from("mnist_test.csv")
}
fn default_label_column() -> String {
    DEFAULT_LABEL_COLUMN.to_string()
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SweepConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_k_min")]
    pub k_min: usize,
    #[serde(default = "default_k_max")]
    pub k_max: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            k_min: default_k_min(),
            k_max: default_k_max(),
        }
    }
}

impl SweepConfig {
    pub fn candidates(&self) -> std::ops::RangeInclusive<usize> {
        self.k_min..=self.k_max
    }
}

fn default_k_min() -> usize {
    1
}
fn default_k_max() -> usize {
    10
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    #[serde(default = "default_selection")]
    pub selection: Selection,
    #[serde(default = "default_k")]
    pub k: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            selection: default_selection(),
            k: default_k(),
        }
    }
}

fn default_selection() -> Selection {
    Selection::Fixed
}
fn default_k() -> usize {
    3
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlotsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_digit_grid")]
    pub digit_grid: PathBuf,
    #[serde(default = "default_accuracy_curve")]
    pub accuracy_curve: PathBuf,
}

impl Default for PlotsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            digit_grid: default_digit_grid(),
            accuracy_curve: default_accuracy_curve(),
        }
    }
}

fn default_digit_grid() -> PathBuf {
    PathBuf::from(DEFAULT_DIGIT_GRID)
}
fn default_accuracy_curve() -> PathBuf {
    PathBuf::from(DEFAULT_ACCURACY_CURVE)
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.report.k == 0 {
            return Err(Error::Config("report.k must be >= 1".to_string()));
        }
        if let Some(ratio) = self.data.split {
            if ratio.is_nan() || ratio <= 0.0 || ratio >= 1.0 {
                return Err(Error::InvalidSplitRatio { ratio });
            }
        }
        if self.sweep.enabled {
            if self.sweep.k_min == 0 {
                return Err(Error::Config("sweep.k_min must be >= 1".to_string()));
            }
            if self.sweep.k_min > self.sweep.k_max {
                return Err(Error::Config(format!(
                    "empty sweep range: k_min {} > k_max {}",
                    self.sweep.k_min, self.sweep.k_max
                )));
            }
        } else if self.report.selection == Selection::Argmax {
            return Err(Error::Config(
                "argmax selection requires the sweep to be enabled".to_string(),
            ));
        }
        Ok(())
    }
}
