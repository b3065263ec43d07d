// ============================================================
// Layer 3 - Station Catalog
// ============================================================
// Ordered station identifiers. The position of a name is the
// integer station id used in the observation matrix.

use serde::{Deserialize, Serialize};

use crate::domain::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationCatalog {
    names: Vec<String>,
}

impl StationCatalog {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn len(&self) -> usize { self.names.len() }

    /// Name of the station with integer id `id`
    #[cfg(test)]
    pub fn name(&self, id: usize) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    pub fn names(&self) -> &[String] { &self.names }

    /// The catalog must name exactly the stations the data refers to.
    /// A mismatch is fatal rather than silently truncated or padded.
    pub fn ensure_matches(&self, num_stations: usize) -> Result<(), ValidationError> {
        if self.names.len() != num_stations {
            return Err(ValidationError::CatalogMismatch {
                catalog:  self.names.len(),
                observed: num_stations,
            });
        }
        Ok(())
    }
}
