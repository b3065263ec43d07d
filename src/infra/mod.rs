// ============================================================
// Layer 6 - Infrastructure Layer
// ============================================================
// Cross-cutting concerns used by the other layers:
//
//   metrics.rs - per-epoch training loss records, logged with
//                tracing and returned with the embeddings
//
//   report.rs  - emits `station<TAB>label` lines to stdout or
//                a file
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Training metrics per epoch
pub mod metrics;

/// station→label output
pub mod report;
