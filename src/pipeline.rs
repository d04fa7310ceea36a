//! Load → preprocess → sweep → report, with images written along the way.

use tracing::{info, info_span, warn};

use crate::config::{Config, DataConfig};
use crate::error::{Error, Result};
use crate::k_nearest_neighbors::KNearestNeighbors;
use crate::parse::{parse, Dataset};
use crate::plot::{draw_accuracy_curve, draw_digit_grid};
use crate::preprocess::preprocess;
use crate::report::{report, Report};
use crate::sweep::{sweep, SweepResult};

#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// `None` when the sweep is disabled.
    pub sweep: Option<SweepResult>,
    pub report: Report,
}

/// Returns the (training, evaluation) datasets, either from two files or by
/// splitting the training file.
pub fn load(config: &DataConfig) -> Result<(Dataset, Dataset)> {
    let _span = info_span!("load").entered();

    let train = parse(&config.train, &config.label_column)?;
    info!(path = %config.train.display(), rows = train.len(), "training data loaded");

    let (train, eval) = match config.split {
        Some(ratio) => train.split(ratio)?,
        None => {
            let eval = parse(&config.test, &config.label_column)?;
            info!(path = %config.test.display(), rows = eval.len(), "test data loaded");
            (train, eval)
        }
    };

    if train.width() != eval.width() {
        return Err(Error::WidthMismatch {
            expected: train.width(),
            found: eval.width(),
        });
    }
    info!(
        train = train.len(),
        eval = eval.len(),
        width = train.width(),
        "datasets ready"
    );

    Ok((train, eval))
}

pub fn run(config: &Config) -> Result<Outcome> {
    config.validate()?;

    let (train_set, eval_set) = load(&config.data)?;

    if config.plots.enabled {
        if let Err(e) = draw_digit_grid(&config.plots.digit_grid, &train_set) {
            warn!(error = %e, "digit grid not written");
        }
    }

    let train = preprocess(&train_set);
    let eval = preprocess(&eval_set);
    drop((train_set, eval_set));

    let sweep_result = if config.sweep.enabled {
        let result = sweep(
            &train,
            &eval,
            config.sweep.candidates(),
            KNearestNeighbors::new,
        )?;
        if config.plots.enabled {
            if let Err(e) = draw_accuracy_curve(&config.plots.accuracy_curve, &result) {
                warn!(error = %e, "accuracy curve not written");
            }
        }
        Some(result)
    } else {
        None
    };

    let k = config.report.selection.choose(
        config.report.k,
        sweep_result.as_ref().unwrap_or(&SweepResult::default()),
    )?;
    info!(k, selection = ?config.report.selection, "neighbor count chosen");

    let report = report(&train, &eval, k, KNearestNeighbors::new(k))?;

    Ok(Outcome {
        sweep: sweep_result,
        report,
    })
}
