//! PNG renderings of the input digits and of the accuracy curve.

use std::path::Path;

use plotters::prelude::*;
use tracing::info;

use crate::error::{Error, Result};
use crate::parse::Dataset;
use crate::sweep::SweepResult;

pub const DEFAULT_DIGIT_GRID: &str = "mnist_plot.png";
pub const DEFAULT_ACCURACY_CURVE: &str = "acc_plot.png";

const GRID: usize = 3;
const PIXEL_SIZE: i32 = 8;
const TILE_PADDING: i32 = 8;
const LABEL_HEIGHT: i32 = 18;

fn plot_error<E: std::fmt::Display>(path: &Path) -> impl Fn(E) -> Error + '_ {
    move |e| Error::Plot {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

/// Side length of a square image with `width` pixels.
fn image_side(width: usize) -> Option<usize> {
    #[allow(clippy::cast_possible_truncation)]
    #[allow(clippy::cast_sign_loss)]
    let side = (width as f64).sqrt().round() as usize;
    (side > 0 && side * side == width).then_some(side)
}

/// Draws the first nine samples as grayscale tiles on a 3×3 grid, each
/// titled with its label.
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_possible_wrap)]
#[allow(clippy::cast_sign_loss)]
pub fn draw_digit_grid(path: &Path, dataset: &Dataset) -> Result<()> {
    let side = image_side(dataset.width()).ok_or_else(|| Error::Plot {
        path: path.to_path_buf(),
        message: format!("{} features do not form a square image", dataset.width()),
    })?;

    let tile_width = side as i32 * PIXEL_SIZE + 2 * TILE_PADDING;
    let tile_height = tile_width + LABEL_HEIGHT;
    let extent = (
        (tile_width * GRID as i32) as u32,
        (tile_height * GRID as i32) as u32,
    );

    let root = BitMapBackend::new(path, extent).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error(path))?;

    let panels = root.split_evenly((GRID, GRID));
    for (panel, sample) in panels.iter().zip(dataset.samples()) {
        panel
            .draw(&Text::new(
                sample.label.to_string(),
                (TILE_PADDING, TILE_PADDING / 2),
                ("sans-serif", 14).into_font().color(&BLACK),
            ))
            .map_err(plot_error(path))?;
        for (index, &value) in sample.pixels.iter().enumerate() {
            let x = (index % side) as i32 * PIXEL_SIZE + TILE_PADDING;
            let y = (index / side) as i32 * PIXEL_SIZE + TILE_PADDING + LABEL_HEIGHT;
            panel
                .draw(&Rectangle::new(
                    [(x, y), (x + PIXEL_SIZE, y + PIXEL_SIZE)],
                    RGBColor(value, value, value).filled(),
                ))
                .map_err(plot_error(path))?;
        }
    }

    root.present().map_err(plot_error(path))?;
    info!(path = %path.display(), "digit grid written");

    Ok(())
}

/// Line plot of accuracy against the neighbor count.
pub fn draw_accuracy_curve(path: &Path, result: &SweepResult) -> Result<()> {
    let points: Vec<(f64, f64)> = result
        .points()
        .iter()
        .map(|&(k, acc)| (k as f64, acc))
        .collect();
    if points.is_empty() {
        return Err(Error::EmptySweep);
    }

    let (k_min, k_max) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.0), hi.max(p.0))
        });
    let (acc_min, acc_max) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.1), hi.max(p.1))
        });
    let acc_pad = ((acc_max - acc_min) * 0.1).max(0.5);

    let root = BitMapBackend::new(path, (640, 480)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error(path))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(
            (k_min - 0.5)..(k_max + 0.5),
            (acc_min - acc_pad)..(acc_max + acc_pad),
        )
        .map_err(plot_error(path))?;

    chart
        .configure_mesh()
        .x_desc("Number of Neighbors (value of \"K\")")
        .y_desc("Accuracy %")
        .draw()
        .map_err(plot_error(path))?;

    chart
        .draw_series(LineSeries::new(points.iter().copied(), &RED))
        .map_err(plot_error(path))?;
    chart
        .draw_series(
            points
                .iter()
                .map(|&point| Circle::new(point, 3, RED.filled())),
        )
        .map_err(plot_error(path))?;

    root.present().map_err(plot_error(path))?;
    info!(path = %path.display(), "accuracy curve written");

    Ok(())
}
