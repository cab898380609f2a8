use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lossypng::settings::{DEFAULT_EXTENSION, DEFAULT_STRENGTH};
use lossypng::{optimize_paths, ColorConversion, OptimizeSettings};

#[derive(Parser)]
#[command(name = "lossypng")]
#[command(about = "Lossy PNG pre-processing: quantize filter residuals for smaller files")]
struct Cli {
    /// Convert images to 32-bit RGBA
    #[arg(short = 'c', long, conflicts_with = "grayscale")]
    rgba: bool,

    /// Convert images to grayscale
    #[arg(short, long)]
    grayscale: bool,

    /// Quantization strength, zero is lossless
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_STRENGTH,
        value_parser = clap::value_parser!(i32).range(0..)
    )]
    strength: i32,

    /// Suffix replacing the input extension in output file names
    #[arg(short, long, default_value = DEFAULT_EXTENSION)]
    extension: String,

    /// Number of files processed in parallel (default: available cores)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Re-compress the output losslessly with oxipng
    #[arg(long)]
    oxipng: bool,

    /// Images to optimize
    #[arg(required = true)]
    paths: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lossypng=warn,lossy_filter=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let mut settings = OptimizeSettings::new()
        .conversion(ColorConversion::from_flags(cli.rgba, cli.grayscale))
        .strength(cli.strength)
        .extension(cli.extension)
        .oxipng(cli.oxipng);
    if let Some(jobs) = cli.jobs {
        settings = settings.jobs(jobs);
    }

    let results = optimize_paths(&cli.paths, &settings)?;

    let mut failed = 0usize;
    for result in &results {
        match result {
            Ok(report) => println!("{report}"),
            Err(e) => {
                tracing::error!(%e, "Failed to optimize");
                failed += 1;
            }
        }
    }
    tracing::info!(files = results.len(), failed, "Batch finished");

    if failed > 0 {
        anyhow::bail!("{failed} of {} files failed", results.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["lossypng", "a.png"]).unwrap();
        assert_eq!(cli.strength, 20);
        assert_eq!(cli.extension, "-lossy.png");
        assert!(!cli.rgba && !cli.grayscale && !cli.oxipng);
        assert_eq!(cli.jobs, None);
    }

    #[test]
    fn test_rgba_and_grayscale_conflict() {
        assert!(Cli::try_parse_from(["lossypng", "-c", "-g", "a.png"]).is_err());
    }

    #[test]
    fn test_negative_strength_is_rejected() {
        assert!(Cli::try_parse_from(["lossypng", "-s", "-3", "a.png"]).is_err());
    }

    #[test]
    fn test_paths_are_required() {
        assert!(Cli::try_parse_from(["lossypng"]).is_err());
    }
}
