// ============================================================
// Layer 3 - Observation Domain Types
// ============================================================
// One row of the packed observation matrix, in the fixed column
// order: station_id, month, day, max_temp, min_temp, precipitation.
//
// The day-of-year feature treats every month as 31 days long:
//   index = 31 * (month - 1) + (day - 1)
// It is an ordinal, not a calendar count, and is kept exactly so
// because the trained model's inputs are defined by it.

use serde::{Deserialize, Serialize};

use crate::domain::error::ValidationError;

/// Number of columns in one packed observation row
pub const OBSERVATION_COLUMNS: usize = 6;

/// Largest value `day_of_year_index` can take (December 31st)
pub const MAX_DAY_OF_YEAR_INDEX: i64 = 31 * 11 + 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub station_id:    i64,
    pub month:         i64,
    pub day:           i64,
    pub max_temp:      i64,
    pub min_temp:      i64,
    pub precipitation: i64,
}

impl Observation {
    /// Build an observation from one matrix row in column order
    pub fn from_row(row: [i64; OBSERVATION_COLUMNS]) -> Self {
        let [station_id, month, day, max_temp, min_temp, precipitation] = row;
        Self { station_id, month, day, max_temp, min_temp, precipitation }
    }

    /// Approximate ordinal day, all months counted as 31 days
    pub fn day_of_year_index(&self) -> i64 {
        31 * (self.month - 1) + (self.day - 1)
    }

    /// Regression targets: (max_temp, min_temp, precipitation)
    pub fn targets(&self) -> [f32; 3] {
        [self.max_temp as f32, self.min_temp as f32, self.precipitation as f32]
    }

    fn validate(&self, row: usize) -> Result<(), ValidationError> {
        if self.station_id < 0 {
            return Err(ValidationError::NegativeStationId { row, station_id: self.station_id });
        }
        if !(1..=12).contains(&self.month) {
            return Err(ValidationError::MonthOutOfRange { row, month: self.month });
        }
        if !(1..=31).contains(&self.day) {
            return Err(ValidationError::DayOutOfRange { row, day: self.day });
        }
        debug_assert!((0..=MAX_DAY_OF_YEAR_INDEX).contains(&self.day_of_year_index()));
        Ok(())
    }
}

/// The full, validated observation table. Immutable once built.
#[derive(Debug, Clone)]
pub struct ObservationTable {
    rows:         Vec<Observation>,
    num_stations: usize,
}

impl ObservationTable {
    /// Validate every row and infer `num_stations = max(station_id) + 1`.
    pub fn new(rows: Vec<Observation>) -> Result<Self, ValidationError> {
        if rows.is_empty() {
            return Err(ValidationError::EmptyTable);
        }
        for (i, obs) in rows.iter().enumerate() {
            obs.validate(i)?;
        }
        // validate() guarantees every id is non-negative
        let max_id = rows.iter().map(|o| o.station_id).max().unwrap_or(0) as usize;
        Ok(Self { rows, num_stations: max_id + 1 })
    }

    pub fn len(&self) -> usize { self.rows.len() }

    pub fn rows(&self) -> &[Observation] { &self.rows }

    /// Embedding table row count implied by the data
    pub fn num_stations(&self) -> usize { self.num_stations }

    /// Every station id must index a row of an embedding table
    /// with `num_stations` rows.
    pub fn check_station_bounds(&self, num_stations: usize) -> Result<(), ValidationError> {
        let max_id = num_stations.saturating_sub(1);
        for (row, obs) in self.rows.iter().enumerate() {
            let station_id = obs.station_id as usize;
            if station_id >= num_stations {
                return Err(ValidationError::StationIdOutOfRange { row, station_id, max_id });
            }
        }
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn obs(station_id: i64, month: i64, day: i64) -> Observation {
        Observation::from_row([station_id, month, day, 250, 120, 3])
    }

    #[test]
    fn test_day_index_bounds() {
        assert_eq!(obs(0, 1, 1).day_of_year_index(), 0);
        assert_eq!(obs(0, 12, 31).day_of_year_index(), MAX_DAY_OF_YEAR_INDEX);
        assert_eq!(MAX_DAY_OF_YEAR_INDEX, 360);

        for month in 1..=12 {
            for day in 1..=31 {
                let idx = obs(0, month, day).day_of_year_index();
                assert!((0..=MAX_DAY_OF_YEAR_INDEX).contains(&idx));
            }
        }
    }

    #[test]
    fn test_day_index_monotonic_within_month() {
        for month in 1..=12 {
            let indices: Vec<i64> = (1..=31)
                .map(|day| obs(0, month, day).day_of_year_index())
                .collect();
            assert!(indices.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn test_every_month_is_31_days() {
        // Feb 1st follows Jan 31st with no gap, even though January
        // and February differ in real length
        assert_eq!(obs(0, 2, 1).day_of_year_index(), 31);
        assert_eq!(obs(0, 3, 1).day_of_year_index(), 62);
    }

    #[test]
    fn test_targets_column_order() {
        let o = Observation::from_row([3, 6, 15, 281, 140, 12]);
        assert_eq!(o.station_id, 3);
        assert_eq!(o.targets(), [281.0, 140.0, 12.0]);
    }

    #[test]
    fn test_num_stations_is_max_id_plus_one() {
        let table = ObservationTable::new(vec![obs(0, 1, 1), obs(4, 1, 2), obs(2, 1, 3)]).unwrap();
        assert_eq!(table.num_stations(), 5);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_max_id_is_accepted() {
        let table = ObservationTable::new(vec![obs(0, 1, 1), obs(7, 1, 1)]).unwrap();
        assert!(table.check_station_bounds(8).is_ok());
    }

    #[test]
    fn test_id_past_max_is_rejected() {
        let table = ObservationTable::new(vec![obs(0, 1, 1), obs(7, 1, 1)]).unwrap();
        assert_eq!(
            table.check_station_bounds(7),
            Err(ValidationError::StationIdOutOfRange { row: 1, station_id: 7, max_id: 6 })
        );
    }

    #[test]
    fn test_empty_table_rejected() {
        assert_eq!(ObservationTable::new(Vec::new()).unwrap_err(), ValidationError::EmptyTable);
    }

    #[test]
    fn test_bad_rows_rejected() {
        assert!(matches!(
            ObservationTable::new(vec![obs(0, 13, 1)]),
            Err(ValidationError::MonthOutOfRange { row: 0, month: 13 })
        ));
        assert!(matches!(
            ObservationTable::new(vec![obs(0, 1, 1), obs(0, 1, 0)]),
            Err(ValidationError::DayOutOfRange { row: 1, day: 0 })
        ));
        assert!(matches!(
            ObservationTable::new(vec![obs(-1, 1, 1)]),
            Err(ValidationError::NegativeStationId { row: 0, station_id: -1 })
        ));
    }
}
