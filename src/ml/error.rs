use thiserror::Error;

/// Failures inside the numeric stages: training read-back and clustering.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("cannot read tensor data back from the backend: {0}")]
    TensorReadback(String),

    #[error("embedding matrix has an inconsistent shape")]
    Shape(#[from] ndarray::ShapeError),

    #[error("trained embedding table ({rows}x{cols}) contains NaN or infinite values")]
    NonFiniteEmbeddings { rows: usize, cols: usize },

    #[error("k-means clustering failed")]
    KMeans(#[from] linfa_clustering::KMeansError),
}
