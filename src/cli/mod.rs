// ============================================================
// Layer 1 - CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and hands a PipelineConfig to the
// application layer. All work happens in Layer 2.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{ClusterArgs, Commands};

use crate::application::cluster_use_case::PipelineConfig;

#[derive(Parser, Debug)]
#[command(
    name = "station-climate",
    version,
    about = "Learn weather-station embeddings from daily observations, then cluster them into climate groups."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Cluster(args) => run_cluster(args),
        }
    }
}

fn run_cluster(args: ClusterArgs) -> Result<()> {
    use crate::application::cluster_use_case::ClusterUseCase;

    let base = match &args.config {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None       => PipelineConfig::default(),
    };
    let config = args.apply(base);

    tracing::info!(
        "Clustering stations from '{}' into {} groups",
        args.data.display(),
        config.cluster_count
    );

    let use_case = ClusterUseCase::from_files(config, &args.data, &args.stations, args.report_target());
    let report   = use_case.execute()?;

    let sizes = report.assignment.group_sizes();
    let (rows, dims) = report.embeddings.shape();
    let final_loss = report.history.last().map_or(f64::NAN, |m| m.train_loss);
    tracing::info!(
        "Done: {} stations ({}x{} embeddings), seed {}, final loss {:.4}, group sizes {:?}",
        report.pairs.len(),
        rows,
        dims,
        report.seed,
        final_loss,
        sizes
    );
    Ok(())
}
