// ============================================================
// Layer 4 - Input Loaders
// ============================================================
// Two external inputs feed the pipeline:
//
//   1. A NumPy .npz archive holding one 2-D integer matrix named
//      `data`, six columns in the fixed order
//        station_id, month, day, max_temp, min_temp, precipitation
//   2. A text file with one station identifier per line; line N
//      names the station with integer id N
//
// Both are read once. Any problem is a LoadError and ends the run.
//
// Reference: ndarray-npy crate documentation
//            Rust Book §9 (Error Handling)

use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use ndarray::Array2;
use ndarray_npy::{NpzReader, ReadNpzError};
use thiserror::Error;

use crate::domain::{
    observation::{Observation, ObservationTable, OBSERVATION_COLUMNS},
    station::StationCatalog,
    traits::{ObservationSource, StationSource},
};

/// Name of the observation matrix inside the archive
pub const DATA_ARRAY: &str = "data";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open '{0}'")]
    Open(PathBuf, #[source] std::io::Error),

    #[error("'{path}' is not a readable .npz archive")]
    Archive {
        path: PathBuf,
        #[source]
        source: ReadNpzError,
    },

    #[error("'{path}' has no array named '{name}'")]
    MissingArray { path: PathBuf, name: String },

    #[error("array '{name}' in '{path}' is not a 2-D i64 or i32 matrix")]
    UnsupportedArray {
        path: PathBuf,
        name: String,
        #[source]
        source: ReadNpzError,
    },

    #[error("array in '{path}' has {found} columns, expected {expected}")]
    ColumnCount { path: PathBuf, found: usize, expected: usize },

    #[error("station list '{0}' is empty")]
    EmptyStationList(PathBuf),
}

// ─── NpzObservationLoader ─────────────────────────────────────────────────────
pub struct NpzObservationLoader {
    path: PathBuf,
}

impl NpzObservationLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the raw `data` matrix and check its column count.
    pub fn load_matrix(&self) -> Result<Array2<i64>, LoadError> {
        let matrix = read_integer_matrix(&self.path, DATA_ARRAY)?;
        if matrix.ncols() != OBSERVATION_COLUMNS {
            return Err(LoadError::ColumnCount {
                path:     self.path.clone(),
                found:    matrix.ncols(),
                expected: OBSERVATION_COLUMNS,
            });
        }
        Ok(matrix)
    }
}

impl ObservationSource for NpzObservationLoader {
    fn load_observations(&self) -> Result<ObservationTable> {
        let matrix = self.load_matrix()?;
        let rows: Vec<Observation> = matrix
            .rows()
            .into_iter()
            .map(|r| Observation::from_row([r[0], r[1], r[2], r[3], r[4], r[5]]))
            .collect();

        tracing::debug!("Read {} observation rows from '{}'", rows.len(), self.path.display());

        let table = ObservationTable::new(rows)
            .with_context(|| format!("Invalid observations in '{}'", self.path.display()))?;
        Ok(table)
    }
}

/// Open an archive and read `name` as i64, falling back to i32
/// for matrices saved with a 32-bit integer dtype.
fn read_integer_matrix(path: &Path, name: &str) -> Result<Array2<i64>, LoadError> {
    let open = || -> Result<NpzReader<File>, LoadError> {
        let file = File::open(path).map_err(|e| LoadError::Open(path.to_path_buf(), e))?;
        NpzReader::new(file).map_err(|source| LoadError::Archive { path: path.to_path_buf(), source })
    };

    let mut npz = open()?;
    let names = npz
        .names()
        .map_err(|source| LoadError::Archive { path: path.to_path_buf(), source })?;

    // numpy stores arrays as `<name>.npy`; some readers strip the suffix
    let entry = names
        .into_iter()
        .find(|n| n == name || n.strip_suffix(".npy") == Some(name))
        .ok_or_else(|| LoadError::MissingArray { path: path.to_path_buf(), name: name.to_string() })?;

    match npz.by_name::<ndarray::OwnedRepr<i64>, ndarray::Ix2>(&entry) {
        Ok(matrix) => Ok(matrix),
        Err(wide_err) => {
            let mut npz = open()?;
            match npz.by_name::<ndarray::OwnedRepr<i32>, ndarray::Ix2>(&entry) {
                Ok(matrix) => Ok(matrix.mapv(i64::from)),
                Err(_) => Err(LoadError::UnsupportedArray {
                    path:   path.to_path_buf(),
                    name:   entry,
                    source: wide_err,
                }),
            }
        }
    }
}

// ─── StationListLoader ────────────────────────────────────────────────────────
pub struct StationListLoader {
    path: PathBuf,
}

impl StationListLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StationSource for StationListLoader {
    fn load_stations(&self) -> Result<StationCatalog> {
        let text = fs::read_to_string(&self.path)
            .map_err(|e| LoadError::Open(self.path.clone(), e))?;

        let mut names: Vec<String> = text.lines().map(|l| l.trim_end().to_string()).collect();

        // Blank lines inside the list keep their slot; only a blank tail is dropped
        while names.last().is_some_and(|n| n.is_empty()) {
            names.pop();
        }

        if names.is_empty() {
            return Err(LoadError::EmptyStationList(self.path.clone()).into());
        }

        tracing::debug!("Read {} station names from '{}'", names.len(), self.path.display());
        Ok(StationCatalog::new(names))
    }
}
