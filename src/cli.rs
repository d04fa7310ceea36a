use std::path::PathBuf;

use clap::Parser;

use digit_knn::config::Config;
use digit_knn::sweep::Selection;

/// Evaluate a K-nearest-neighbors digit classifier on MNIST-style CSV files.
#[derive(Parser)]
#[command(name = "digit-knn", version)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to an optional TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the training CSV path.
    #[arg(long)]
    pub train: Option<PathBuf>,

    /// Override the test CSV path.
    #[arg(long)]
    pub test: Option<PathBuf>,

    /// Split the training file head/tail at this train ratio instead of reading the test file.
    #[arg(long, value_name = "RATIO")]
    pub split: Option<f64>,

    /// Neighbor count used for the final report.
    #[arg(short = 'k', long = "neighbors", value_name = "K")]
    pub neighbors: Option<usize>,

    /// Report at the neighbor count with the best sweep accuracy.
    #[arg(long, conflicts_with = "neighbors")]
    pub argmax: bool,

    /// Skip the neighbor-count sweep.
    #[arg(long)]
    pub no_sweep: bool,

    /// Do not write any images.
    #[arg(long)]
    pub no_plots: bool,
}

impl Cli {
    /// Applies command-line overrides on top of `config`.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(train) = &self.train {
            config.data.train.clone_from(train);
        }
        if let Some(test) = &self.test {
            config.data.test.clone_from(test);
        }
        if self.split.is_some() {
            config.data.split = self.split;
        }
        if let Some(k) = self.neighbors {
            config.report.k = k;
            config.report.selection = Selection::Fixed;
        }
        if self.argmax {
            config.report.selection = Selection::Argmax;
        }
        if self.no_sweep {
            config.sweep.enabled = false;
        }
        if self.no_plots {
            config.plots.enabled = false;
        }
        config
    }
}
