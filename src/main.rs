mod cli;
mod logging;

use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use digit_knn::config::Config;
use digit_knn::pipeline;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config file: {}", path.display()))?,
        None => Config::default(),
    };
    let config = cli.apply(config);

    let outcome = pipeline::run(&config).context("evaluation failed")?;

    if let Some(sweep) = &outcome.sweep {
        for &(k, accuracy) in sweep.points() {
            println!("K={k}: accuracy {accuracy:.3}%");
        }
    }
    println!("{}", outcome.report);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use digit_knn::sweep::Selection;

    #[test]
    fn no_flags_keep_defaults() {
        let cli = Cli::parse_from(["digit-knn"]);
        let config = cli.apply(Config::default());

        assert_eq!(config.report.k, 3);
        assert!(config.sweep.enabled);
        assert!(config.plots.enabled);
        assert_eq!(config.data.split, None);
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from([
            "digit-knn",
            "--train",
            "t.csv",
            "--split",
            "0.9",
            "-k",
            "5",
            "--no-plots",
            "--no-sweep",
        ]);
        let config = cli.apply(Config::default());

        assert_eq!(config.data.train, std::path::PathBuf::from("t.csv"));
        assert_eq!(config.data.split, Some(0.9));
        assert_eq!(config.report.k, 5);
        assert_eq!(config.report.selection, Selection::Fixed);
        assert!(!config.sweep.enabled);
        assert!(!config.plots.enabled);
    }

    #[test]
    fn argmax_flag() {
        let cli = Cli::parse_from(["digit-knn", "--argmax", "-vv"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.apply(Config::default()).report.selection, Selection::Argmax);
    }

    #[test]
    fn argmax_conflicts_with_fixed_k() {
        assert!(Cli::try_parse_from(["digit-knn", "--argmax", "-k", "3"]).is_err());
    }
}
