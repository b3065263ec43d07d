// ============================================================
// Layer 3 - Domain Layer
// ============================================================
// Plain Rust types describing the climate clustering problem:
// observations, the station catalog, the learned embedding
// snapshot and the final cluster assignment.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

/// One daily weather observation and the table of all of them
pub mod observation;

/// Ordered list of station identifiers
pub mod station;

/// Snapshot of the learned station embedding matrix
pub mod embedding;

/// Cluster label per station and station→label pairs
pub mod assignment;

/// Validation failures raised before training starts
pub mod error;

/// Core abstractions (traits) that other layers implement
pub mod traits;
