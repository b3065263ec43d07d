// ============================================================
// Layer 5 - ML Layer (Burn + linfa)
// ============================================================
// All Burn framework code lives here, together with the k-means
// stage that consumes its output.
//
//   model.rs     - embedding lookup ++ day-of-year → dense(ReLU)
//                  → dense(3): predicts max/min temperature and
//                  precipitation for a station on a given day
//
//   trainer.rs   - Adam + MSE training loop; returns only the
//                  embedding snapshot and per-epoch losses
//
//   clusterer.rs - k-means over the embedding rows
//
// Reference: Burn Book §3 (Building Blocks), §5 (Training)

/// Station embedding regression model
pub mod model;

/// Training loop producing the embedding snapshot
pub mod trainer;

/// k-means clustering of station embeddings
pub mod clusterer;

/// Numeric-stage failures
pub mod error;
