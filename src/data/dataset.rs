use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

use crate::domain::observation::ObservationTable;

/// One training example: station id and day feature in, three targets out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationItem {
    pub station_id:  usize,
    pub day_of_year: f32,
    /// max_temp, min_temp, precipitation
    pub targets:     [f32; 3],
}

pub struct ObservationDataset {
    items: Vec<ObservationItem>,
}

impl ObservationDataset {
    pub fn from_table(table: &ObservationTable) -> Self {
        let items = table
            .rows()
            .iter()
            .map(|obs| ObservationItem {
                station_id:  obs.station_id as usize,
                day_of_year: obs.day_of_year_index() as f32,
                targets:     obs.targets(),
            })
            .collect();
        Self { items }
    }
}

impl Dataset<ObservationItem> for ObservationDataset {
    fn get(&self, index: usize) -> Option<ObservationItem> {
        self.items.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}
