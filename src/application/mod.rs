// ============================================================
// Layer 2 - Application / Use Cases
// ============================================================
// Orchestrates the other layers: load inputs, train, cluster,
// report. No ML math and no file formats live here, only the
// order in which things happen.
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

/// The load → train → cluster → report workflow
pub mod cluster_use_case;
