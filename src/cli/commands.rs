// ============================================================
// Layer 1 - CLI Commands and Arguments
// ============================================================
// One subcommand, `cluster`, with flags for the input files,
// the model and clustering hyperparameters, and the output.
//
// Hyperparameter flags are optional: an unset flag falls back to
// the `--config` JSON file, then to the built-in default.
//
// Reference: Rust Book §12 (Building a CLI Program)

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::application::cluster_use_case::PipelineConfig;
use crate::infra::report::ReportTarget;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train station embeddings on daily observations and cluster them
    Cluster(ClusterArgs),
}

#[derive(Args, Debug)]
pub struct ClusterArgs {
    /// .npz archive holding the `data` matrix
    /// (station_id, month, day, max_temp, min_temp, precipitation)
    #[arg(long, default_value = "data/weather.npz")]
    pub data: PathBuf,

    /// Text file with one station identifier per line, in id order
    #[arg(long, default_value = "data/stations.txt")]
    pub stations: PathBuf,

    /// JSON file with a base PipelineConfig
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Length of each station's learned vector [default: 20]
    #[arg(long)]
    pub embedding_size: Option<usize>,

    /// Units in the hidden ReLU layer [default: 40]
    #[arg(long)]
    pub hidden_units: Option<usize>,

    /// Number of climate groups [default: 6]
    #[arg(long)]
    pub clusters: Option<usize>,

    /// Observations per mini-batch [default: 50]
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Passes over the observation table [default: 1]
    #[arg(long)]
    pub epochs: Option<usize>,

    /// Adam learning rate [default: 0.001]
    #[arg(long)]
    pub lr: Option<f64>,

    /// Seed for weight init, batch order and k-means; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print `station<TAB>label` lines to stdout
    #[arg(long, conflicts_with = "output")]
    pub emit: bool,

    /// Write `station<TAB>label` lines to this file
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl ClusterArgs {
    /// Apply explicitly passed flags on top of `base`.
    pub fn apply(&self, base: PipelineConfig) -> PipelineConfig {
        PipelineConfig {
            embedding_size: self.embedding_size.unwrap_or(base.embedding_size),
            hidden_units:   self.hidden_units.unwrap_or(base.hidden_units),
            cluster_count:  self.clusters.unwrap_or(base.cluster_count),
            batch_size:     self.batch_size.unwrap_or(base.batch_size),
            epochs:         self.epochs.unwrap_or(base.epochs),
            learning_rate:  self.lr.unwrap_or(base.learning_rate),
            seed:           self.seed.or(base.seed),
            ..base
        }
    }

    pub fn report_target(&self) -> ReportTarget {
        match (&self.output, self.emit) {
            (Some(path), _) => ReportTarget::File(path.clone()),
            (None, true)    => ReportTarget::Stdout,
            (None, false)   => ReportTarget::None,
        }
    }
}

/// Flags over built-in defaults, without a config file
impl From<&ClusterArgs> for PipelineConfig {
    fn from(a: &ClusterArgs) -> Self {
        a.apply(PipelineConfig::default())
    }
}
