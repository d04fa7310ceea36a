pub mod classifier;
pub mod config;
pub mod error;
pub mod k_nearest_neighbors;
pub mod metrics;
pub mod parse;
pub mod pipeline;
pub mod plot;
pub mod preprocess;
pub mod report;
pub mod sweep;

mod distance;

pub use error::{Error, Result};
