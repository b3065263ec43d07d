// ============================================================
// Layer 4 - Observation Batcher
// ============================================================
// Implements Burn's Batcher trait to stack a Vec<ObservationItem>
// into the three tensors the model consumes:
//
//   station_ids  [N, 1]  Int    → embedding lookup
//   day_of_year  [N, 1]  Float  → concatenated after the embedding
//   targets      [N, 3]  Float  → max_temp, min_temp, precipitation
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::ObservationItem;

#[derive(Debug, Clone)]
pub struct ObservationBatch<B: Backend> {
    pub station_ids: Tensor<B, 2, Int>,
    pub day_of_year: Tensor<B, 2>,
    pub targets:     Tensor<B, 2>,
}

/// Holds the target device so tensors are created where the model lives.
#[derive(Clone, Debug)]
pub struct ObservationBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> ObservationBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<ObservationItem, ObservationBatch<B>> for ObservationBatcher<B> {
    fn batch(&self, items: Vec<ObservationItem>) -> ObservationBatch<B> {
        let batch_size = items.len();

        let ids: Vec<i64> = items.iter().map(|s| s.station_id as i64).collect();
        let days: Vec<f32> = items.iter().map(|s| s.day_of_year).collect();
        let targets: Vec<f32> = items.iter().flat_map(|s| s.targets).collect();

        let station_ids = Tensor::<B, 2, Int>::from_data(
            TensorData::new(ids, [batch_size, 1]), &self.device
        );

        let day_of_year = Tensor::<B, 2>::from_data(
            TensorData::new(days, [batch_size, 1]), &self.device
        );

        let targets = Tensor::<B, 2>::from_data(
            TensorData::new(targets, [batch_size, 3]), &self.device
        );

        ObservationBatch { station_ids, day_of_year, targets }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray<f32>;

    #[test]
    fn test_batch_shapes_and_values() {
        let batcher = ObservationBatcher::<TestBackend>::new(Default::default());
        let batch = batcher.batch(vec![
            ObservationItem { station_id: 2, day_of_year: 40.0, targets: [1.0, 2.0, 3.0] },
            ObservationItem { station_id: 0, day_of_year: 0.0,  targets: [4.0, 5.0, 6.0] },
        ]);

        assert_eq!(batch.station_ids.dims(), [2, 1]);
        assert_eq!(batch.day_of_year.dims(), [2, 1]);
        assert_eq!(batch.targets.dims(), [2, 3]);

        let targets = batch.targets.into_data().to_vec::<f32>().unwrap();
        assert_eq!(targets, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

        let ids = batch.station_ids.into_data().convert::<i64>().to_vec::<i64>().unwrap();
        assert_eq!(ids, vec![2, 0]);
    }

    #[test]
    fn test_station_ids_keep_full_width() {
        let big = i32::MAX as usize + 7;
        let batcher = ObservationBatcher::<TestBackend>::new(Default::default());
        let batch = batcher.batch(vec![
            ObservationItem { station_id: big, day_of_year: 1.0, targets: [0.0; 3] },
        ]);

        let ids = batch.station_ids.into_data().convert::<i64>().to_vec::<i64>().unwrap();
        assert_eq!(ids, vec![big as i64]);
    }
}
