// Synthetic observation tables for tests. Each station gets a fixed
// (max_temp, min_temp, precipitation) profile plus a small day-driven
// wiggle, so stations with equal profiles are indistinguishable.

use crate::domain::observation::{Observation, ObservationTable};

/// `counts[i]` observations for station `i`, spread over January.
pub fn profile_table(profiles: &[[i64; 3]], counts: &[usize]) -> ObservationTable {
    assert_eq!(profiles.len(), counts.len());
    let mut rows = Vec::new();
    for (station, (profile, &count)) in profiles.iter().zip(counts).enumerate() {
        for day in 1..=count as i64 {
            let wiggle = day % 3;
            rows.push(Observation::from_row([
                station as i64,
                1,
                day,
                profile[0] + wiggle,
                profile[1] + wiggle,
                profile[2],
            ]));
        }
    }
    ObservationTable::new(rows).expect("synthetic rows are valid")
}

/// Four stations, ten observations: 0 and 1 share a profile,
/// 2 and 3 are far from it and from each other.
pub fn four_station_table() -> ObservationTable {
    profile_table(
        &[[150, 60, 10], [150, 60, 10], [-250, -320, 0], [380, 290, 90]],
        &[3, 3, 2, 2],
    )
}
