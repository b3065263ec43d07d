// ============================================================
// Layer 3 - Core Traits (Abstractions)
// ============================================================
// The application layer talks to its collaborators through
// these traits, so the input formats and the clustering
// algorithm can change without touching the pipeline.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::{
    assignment::ClusterAssignment,
    embedding::EmbeddingTable,
    observation::ObservationTable,
    station::StationCatalog,
};

// ─── ObservationSource ────────────────────────────────────────────────────────
/// Anything that can produce the validated observation table.
///
/// Implementations:
///   - NpzObservationLoader → reads the `data` array of a .npz file
pub trait ObservationSource {
    fn load_observations(&self) -> Result<ObservationTable>;
}

// ─── StationSource ────────────────────────────────────────────────────────────
/// Anything that can produce the ordered station catalog.
///
/// Implementations:
///   - StationListLoader → one identifier per line of a text file
pub trait StationSource {
    fn load_stations(&self) -> Result<StationCatalog>;
}

// ─── StationClusterer ─────────────────────────────────────────────────────────
/// Partitions embedding rows into groups, one label per station.
///
/// Implementations:
///   - KMeansClusterer → linfa k-means with a seeded RNG
pub trait StationClusterer {
    fn cluster(&self, embeddings: &EmbeddingTable) -> Result<ClusterAssignment>;
}
