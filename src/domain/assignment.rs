// ============================================================
// Layer 3 - Cluster Assignment
// ============================================================
// One integer label per station index, in [0, cluster_count).
// Label values carry no meaning across runs: any permutation
// of them describes the same partition.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::error::ValidationError;
use crate::domain::station::StationCatalog;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterAssignment {
    labels:        Vec<usize>,
    cluster_count: usize,
}

/// A station name paired with its cluster label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationLabel {
    pub station: String,
    pub label:   usize,
}

impl ClusterAssignment {
    /// `labels[i]` is the label of station `i`
    pub fn new(labels: Vec<usize>, cluster_count: usize) -> Self {
        debug_assert!(labels.iter().all(|&l| l < cluster_count));
        Self { labels, cluster_count }
    }

    pub fn len(&self) -> usize { self.labels.len() }

    #[cfg(test)]
    pub fn label(&self, station: usize) -> Option<usize> {
        self.labels.get(station).copied()
    }

    #[cfg(test)]
    pub fn labels(&self) -> &[usize] { &self.labels }

    /// Labels actually in use; never more than `cluster_count`
    pub fn distinct_labels(&self) -> BTreeSet<usize> {
        self.labels.iter().copied().collect()
    }

    /// Number of stations carrying each label, indexed by label
    pub fn group_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0usize; self.cluster_count];
        for &l in &self.labels {
            sizes[l] += 1;
        }
        sizes
    }

    /// Pair every station name with its label, in station order
    pub fn pair_with(&self, catalog: &StationCatalog) -> Result<Vec<StationLabel>, ValidationError> {
        catalog.ensure_matches(self.labels.len())?;
        Ok(catalog
            .names()
            .iter()
            .zip(&self.labels)
            .map(|(name, &label)| StationLabel { station: name.clone(), label })
            .collect())
    }
}
