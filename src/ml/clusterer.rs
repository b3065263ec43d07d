// ============================================================
// Layer 5 - Station Clusterer
// ============================================================
// Groups stations by their learned embeddings with k-means
// (linfa-clustering). The RNG driving centroid initialisation
// is seeded, so a fixed seed gives a fixed assignment.
//
// Reference: linfa-clustering KMeans documentation

use anyhow::Result;
use linfa::{
    traits::{Fit, Predict},
    DatasetBase,
};
use linfa_clustering::KMeans;
use ndarray::Array1;
use rand::SeedableRng;
use rand_isaac::Isaac64Rng;

use crate::domain::{
    assignment::ClusterAssignment,
    embedding::EmbeddingTable,
    error::ValidationError,
    traits::StationClusterer,
};
use crate::ml::error::ModelError;

#[derive(Debug, Clone)]
pub struct KMeansClusterer {
    cluster_count:  usize,
    max_iterations: u64,
    tolerance:      f64,
    runs:           usize,
    seed:           u64,
}

impl KMeansClusterer {
    pub fn new(cluster_count: usize, seed: u64) -> Self {
        Self {
            cluster_count,
            max_iterations: 300,
            tolerance:      1e-4,
            runs:           10,
            seed,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Independent restarts; the lowest-inertia run wins
    pub fn with_runs(mut self, runs: usize) -> Self {
        self.runs = runs;
        self
    }
}

impl StationClusterer for KMeansClusterer {
    fn cluster(&self, embeddings: &EmbeddingTable) -> Result<ClusterAssignment> {
        let stations = embeddings.num_stations();
        if self.cluster_count == 0 || self.cluster_count > stations {
            return Err(ValidationError::TooFewStations {
                clusters: self.cluster_count,
                stations,
            }
            .into());
        }

        let dataset = DatasetBase::from(embeddings.to_f64());
        let rng     = Isaac64Rng::seed_from_u64(self.seed);

        let model = KMeans::params_with_rng(self.cluster_count, rng)
            .max_n_iterations(self.max_iterations)
            .tolerance(self.tolerance)
            .n_runs(self.runs)
            .fit(&dataset)
            .map_err(ModelError::from)?;

        let labels: Array1<usize> = model.predict(&dataset.records);
        tracing::debug!("k-means assigned {} stations to {} clusters", labels.len(), self.cluster_count);

        Ok(ClusterAssignment::new(labels.to_vec(), self.cluster_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    fn two_blobs() -> EmbeddingTable {
        EmbeddingTable::new(array![
            [0.0, 0.1],
            [0.1, 0.0],
            [0.05, 0.05],
            [9.0, 9.1],
            [9.1, 9.0],
        ])
    }

    #[test]
    fn test_one_label_per_station() {
        let a = KMeansClusterer::new(2, 42).cluster(&two_blobs()).unwrap();
        assert_eq!(a.len(), 5);
        assert!(a.labels().iter().all(|&l| l < 2));
    }

    #[test]
    fn test_separates_blobs() {
        let a = KMeansClusterer::new(2, 42).cluster(&two_blobs()).unwrap();
        let l = a.labels();
        assert_eq!(l[0], l[1]);
        assert_eq!(l[1], l[2]);
        assert_eq!(l[3], l[4]);
        assert_ne!(l[0], l[3]);
    }

    #[test]
    fn test_never_more_labels_than_clusters() {
        let rows: Vec<f32> = (0..40).map(|i| (i * 7 % 13) as f32).collect();
        let table = EmbeddingTable::new(Array2::from_shape_vec((20, 2), rows).unwrap());
        let a = KMeansClusterer::new(6, 1).cluster(&table).unwrap();
        assert_eq!(a.len(), 20);
        assert!(a.distinct_labels().len() <= 6);
    }

    #[test]
    fn test_seed_makes_it_deterministic() {
        let table = two_blobs();
        let a = KMeansClusterer::new(3, 8).cluster(&table).unwrap();
        let b = KMeansClusterer::new(3, 8).cluster(&table).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_more_clusters_than_stations() {
        let err = KMeansClusterer::new(6, 0).cluster(&two_blobs()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::TooFewStations { clusters: 6, stations: 5 })
        );
    }
}
