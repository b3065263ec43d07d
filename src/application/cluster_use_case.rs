// ============================================================
// Layer 2 - ClusterUseCase
// ============================================================
// Runs the whole pipeline once, in a straight line:
//
//   Step 1: Load and validate observations   (Layer 4 - data)
//   Step 2: Load the station catalog         (Layer 4 - data)
//   Step 3: Check catalog against the data   (Layer 3 - domain)
//           before any training starts
//   Step 4: Train, keep the embeddings       (Layer 5 - ml)
//   Step 5: Cluster the embeddings           (Layer 5 - ml)
//   Step 6: Pair names with labels, emit     (Layer 6 - infra)
//
// Any failure aborts the run. Nothing is retried.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::loader::{NpzObservationLoader, StationListLoader};
use crate::domain::{
    assignment::{ClusterAssignment, StationLabel},
    embedding::EmbeddingTable,
    error::ValidationError,
    observation::ObservationTable,
    station::StationCatalog,
    traits::{ObservationSource, StationClusterer, StationSource},
};
use crate::infra::{
    metrics::EpochMetrics,
    report::{ReportTarget, ResultReporter},
};
use crate::ml::{clusterer::KMeansClusterer, trainer::run_training};

// ─── Pipeline Configuration ──────────────────────────────────────────────────
// Every tunable of a run. Serialisable so a base config can be
// kept in a JSON file and overridden from the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub embedding_size:        usize,
    pub hidden_units:          usize,
    pub cluster_count:         usize,
    pub batch_size:            usize,
    pub epochs:                usize,
    pub learning_rate:         f64,
    /// Drives weight init, batch shuffling and k-means; drawn at random when unset
    pub seed:                  Option<u64>,
    pub kmeans_max_iterations: u64,
    pub kmeans_tolerance:      f64,
    pub kmeans_runs:           usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            embedding_size:        20,
            hidden_units:          40,
            cluster_count:         6,
            batch_size:            50,
            epochs:                1,
            learning_rate:         1e-3,
            seed:                  None,
            kmeans_max_iterations: 300,
            kmeans_tolerance:      1e-4,
            kmeans_runs:           10,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let positive = [
            ("embedding_size", self.embedding_size),
            ("hidden_units",   self.hidden_units),
            ("cluster_count",  self.cluster_count),
            ("batch_size",     self.batch_size),
            ("epochs",         self.epochs),
            ("kmeans_runs",    self.kmeans_runs),
        ];
        if let Some((name, _)) = positive.iter().find(|(_, v)| *v == 0) {
            return Err(ValidationError::Config(format!("{name} must be at least 1")));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(ValidationError::Config(format!(
                "learning_rate must be a positive number, got {}", self.learning_rate
            )));
        }
        if !(self.kmeans_tolerance.is_finite() && self.kmeans_tolerance > 0.0) {
            return Err(ValidationError::Config(format!(
                "kmeans_tolerance must be a positive number, got {}", self.kmeans_tolerance
            )));
        }
        Ok(())
    }

    /// The configured seed, or a fresh random one
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// Read a JSON config file; missing fields take their defaults
    pub fn from_json_file(path: &std::path::Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read config from '{}'", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Invalid config JSON in '{}'", path.display()))
    }
}

/// Everything a run produces
#[derive(Debug, Clone)]
pub struct ClusterReport {
    pub seed:       u64,
    pub embeddings: EmbeddingTable,
    pub assignment: ClusterAssignment,
    pub pairs:      Vec<StationLabel>,
    pub history:    Vec<EpochMetrics>,
}

// ─── ClusterUseCase ──────────────────────────────────────────────────────────
pub struct ClusterUseCase {
    config:       PipelineConfig,
    observations: Box<dyn ObservationSource>,
    stations:     Box<dyn StationSource>,
    reporter:     ResultReporter,
}

impl ClusterUseCase {
    pub fn new(
        config:       PipelineConfig,
        observations: Box<dyn ObservationSource>,
        stations:     Box<dyn StationSource>,
        target:       ReportTarget,
    ) -> Self {
        Self { config, observations, stations, reporter: ResultReporter::new(target) }
    }

    /// Wire the file loaders for a .npz matrix and a station list
    pub fn from_files(
        config:        PipelineConfig,
        data_path:     impl Into<std::path::PathBuf>,
        stations_path: impl Into<std::path::PathBuf>,
        target:        ReportTarget,
    ) -> Self {
        Self::new(
            config,
            Box::new(NpzObservationLoader::new(data_path)),
            Box::new(StationListLoader::new(stations_path)),
            target,
        )
    }

    pub fn execute(&self) -> Result<ClusterReport> {
        let cfg = &self.config;
        cfg.validate()?;

        // ── Step 1: Observations ─────────────────────────────────────────────
        let table = self.observations.load_observations().context("Cannot load observations")?;
        tracing::info!("Loaded {} observations for {} stations", table.len(), table.num_stations());

        // ── Step 2: Station catalog ──────────────────────────────────────────
        let catalog = self.stations.load_stations().context("Cannot load station list")?;
        tracing::info!("Loaded {} station names", catalog.len());

        // ── Steps 3-6 ────────────────────────────────────────────────────────
        let report = run_pipeline(cfg, &table, &catalog)?;
        self.reporter.emit(&report.pairs)?;
        Ok(report)
    }
}

/// Train, cluster and pair labels with names for already-loaded inputs.
pub fn run_pipeline(
    cfg:     &PipelineConfig,
    table:   &ObservationTable,
    catalog: &StationCatalog,
) -> Result<ClusterReport> {
    cfg.validate()?;

    // ── Step 3: Catalog must match the data ─────────────────────────────────
    catalog.ensure_matches(table.num_stations())?;

    let seed = cfg.resolve_seed();
    if cfg.seed.is_none() {
        tracing::info!("No seed configured, using {}", seed);
    }

    // ── Step 4: Train; only the embedding snapshot comes back ───────────────
    let outcome = run_training(cfg, seed, catalog.len(), table).context("Training failed")?;

    // ── Step 5: Cluster ─────────────────────────────────────────────────────
    let clusterer = KMeansClusterer::new(cfg.cluster_count, seed)
        .with_max_iterations(cfg.kmeans_max_iterations)
        .with_tolerance(cfg.kmeans_tolerance)
        .with_runs(cfg.kmeans_runs);
    let assignment = clusterer.cluster(&outcome.embeddings).context("Clustering failed")?;
    tracing::info!(
        "{} stations in {} clusters, sizes {:?}",
        assignment.len(),
        assignment.distinct_labels().len(),
        assignment.group_sizes()
    );

    // ── Step 6: station → label ─────────────────────────────────────────────
    let pairs = assignment.pair_with(catalog)?;

    Ok(ClusterReport {
        seed,
        embeddings: outcome.embeddings,
        assignment,
        pairs,
        history: outcome.history,
    })
}
