// ============================================================
// Layer 3 - Validation Errors
// ============================================================
// Shape and range problems in the inputs or the configuration.
// Every variant is fatal: the pipeline aborts before training.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("observation table is empty")]
    EmptyTable,

    #[error("row {row}: month {month} is outside 1..=12")]
    MonthOutOfRange { row: usize, month: i64 },

    #[error("row {row}: day {day} is outside 1..=31")]
    DayOutOfRange { row: usize, day: i64 },

    #[error("row {row}: station id {station_id} is negative")]
    NegativeStationId { row: usize, station_id: i64 },

    #[error("row {row}: station id {station_id} exceeds the last station index {max_id}")]
    StationIdOutOfRange { row: usize, station_id: usize, max_id: usize },

    #[error("station catalog lists {catalog} stations but the observations reference {observed}")]
    CatalogMismatch { catalog: usize, observed: usize },

    #[error("cannot form {clusters} clusters from {stations} stations")]
    TooFewStations { clusters: usize, stations: usize },

    #[error("invalid configuration: {0}")]
    Config(String),
}
