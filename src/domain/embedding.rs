// ============================================================
// Layer 3 - Embedding Snapshot
// ============================================================
// A copy of the trained embedding matrix, one row per station.
// Once the trainer hands it over nothing mutates it and no
// reference to the trained model survives.

use ndarray::Array2;
#[cfg(test)]
use ndarray::ArrayView1;

#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingTable {
    weights: Array2<f32>,
}

impl EmbeddingTable {
    pub fn new(weights: Array2<f32>) -> Self {
        Self { weights }
    }

    pub fn num_stations(&self) -> usize { self.weights.nrows() }

    /// (num_stations, embedding_size)
    pub fn shape(&self) -> (usize, usize) { self.weights.dim() }

    #[cfg(test)]
    pub fn row(&self, station: usize) -> ArrayView1<'_, f32> {
        self.weights.row(station)
    }

    /// True when no entry is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.weights.iter().all(|v| v.is_finite())
    }

    /// Double-precision copy for the clustering stage
    pub fn to_f64(&self) -> Array2<f64> {
        self.weights.mapv(f64::from)
    }

    /// Euclidean distance between two station embeddings
    #[cfg(test)]
    pub fn distance(&self, a: usize, b: usize) -> f32 {
        let diff = &self.row(a) - &self.row(b);
        diff.dot(&diff).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_shape_and_distance() {
        let t = EmbeddingTable::new(array![[0.0, 0.0], [3.0, 4.0], [0.0, 1.0]]);
        assert_eq!(t.shape(), (3, 2));
        assert!((t.distance(0, 1) - 5.0).abs() < 1e-6);
        assert!(t.is_finite());
    }

    #[test]
    fn test_nan_detected() {
        let t = EmbeddingTable::new(array![[0.0, f32::NAN]]);
        assert!(!t.is_finite());
    }
}
