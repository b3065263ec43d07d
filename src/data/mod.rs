// ============================================================
// Layer 4 - Data Pipeline
// ============================================================
// Everything from the input files to tensor batches:
//
//   weather.npz + stations.txt
//       │
//       ▼
//   loader            → ObservationTable + StationCatalog
//       │
//       ▼
//   ObservationDataset → implements Burn's Dataset trait
//       │
//       ▼
//   ObservationBatcher → stacks items into tensor batches
//       │
//       ▼
//   DataLoader         → feeds shuffled mini-batches to training
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Reads the .npz observation matrix and the station list
pub mod loader;

/// Implements Burn's Dataset trait for observations
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

#[cfg(test)]
pub mod synthetic;
