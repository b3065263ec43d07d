// ============================================================
// Layer 5 - Training Loop
// ============================================================
// Fits the embedding regression model on the whole observation
// table, then hands back only the embedding matrix.
//
//   - Training runs on Autodiff<NdArray> (CPU)
//   - Every random choice derives from one seed: parameter init
//     and mini-batch shuffling
//   - No validation split, no early stopping, no checkpoints
//   - The model is consumed; callers get an EmbeddingTable
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::Result;
use burn::{
    backend::{ndarray::NdArrayDevice, Autodiff, NdArray},
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
};
use ndarray::Array2;

use crate::application::cluster_use_case::PipelineConfig;
use crate::data::{batcher::ObservationBatcher, dataset::ObservationDataset};
use crate::domain::{embedding::EmbeddingTable, observation::ObservationTable};
use crate::infra::metrics::EpochMetrics;
use crate::ml::error::ModelError;
use crate::ml::model::{StationEmbeddingConfig, StationEmbeddingModel};

type MyBackend      = Autodiff<NdArray<f32>>;
type MyInnerBackend = NdArray<f32>;

/// What survives training: the embedding snapshot and the loss history.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub embeddings: EmbeddingTable,
    pub history:    Vec<EpochMetrics>,
}

/// Train with an embedding table of `num_stations` rows. Every station
/// id in `table` must fit in it.
pub fn run_training(
    cfg:          &PipelineConfig,
    seed:         u64,
    num_stations: usize,
    table:        &ObservationTable,
) -> Result<TrainingOutcome> {
    let device = NdArrayDevice::default();
    tracing::info!("Using NdArray device: {:?}", device);
    train_loop(cfg, seed, num_stations, table, device)
}

fn train_loop(
    cfg:          &PipelineConfig,
    seed:         u64,
    num_stations: usize,
    table:        &ObservationTable,
    device:       NdArrayDevice,
) -> Result<TrainingOutcome> {
    table.check_station_bounds(num_stations)?;

    // ── Build model ───────────────────────────────────────────────────────────
    let model_cfg = StationEmbeddingConfig::new(num_stations)
        .with_embedding_size(cfg.embedding_size)
        .with_hidden_units(cfg.hidden_units);
    let mut model: StationEmbeddingModel<MyBackend> = model_cfg.init_seeded(seed, &device);
    tracing::info!(
        "Model ready: {} stations x {} embedding, {} hidden units",
        num_stations, cfg.embedding_size, cfg.hidden_units
    );

    let mut optim = AdamConfig::new().init();

    // ── Data loader ───────────────────────────────────────────────────────────
    let batcher = ObservationBatcher::<MyBackend>::new(device.clone());
    let loader  = DataLoaderBuilder::new(batcher)
        .batch_size(cfg.batch_size)
        .shuffle(seed)
        .build(ObservationDataset::from_table(table));

    // ── Epoch loop ────────────────────────────────────────────────────────────
    let mut history = Vec::with_capacity(cfg.epochs);

    for epoch in 1..=cfg.epochs {
        let mut loss_sum = 0.0f64;
        let mut batches  = 0usize;

        for batch in loader.iter() {
            let loss = model.forward_loss(batch.station_ids, batch.day_of_year, batch.targets);

            loss_sum += loss.clone().into_scalar().elem::<f64>();
            batches  += 1;

            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.learning_rate, model, grads);
        }

        let metrics = EpochMetrics::new(epoch, loss_sum, batches);
        metrics.log(cfg.epochs);
        history.push(metrics);
    }

    let embeddings = snapshot_embeddings(model)?;
    tracing::info!("Training complete, embedding table {:?}", embeddings.shape());

    Ok(TrainingOutcome { embeddings, history })
}

/// Copy the embedding weights out of the trained model and drop it.
fn snapshot_embeddings(model: StationEmbeddingModel<MyBackend>) -> Result<EmbeddingTable, ModelError> {
    let model: StationEmbeddingModel<MyInnerBackend> = model.valid();
    let weights = model.embedding_weights();
    let [rows, cols] = weights.dims();

    let values = weights
        .into_data()
        .to_vec::<f32>()
        .map_err(|e| ModelError::TensorReadback(format!("{e:?}")))?;
    let table = EmbeddingTable::new(Array2::from_shape_vec((rows, cols), values)?);

    if !table.is_finite() {
        return Err(ModelError::NonFiniteEmbeddings { rows, cols });
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::synthetic::{four_station_table, profile_table};
    use crate::domain::error::ValidationError;

    fn quick_config() -> PipelineConfig {
        PipelineConfig { batch_size: 4, epochs: 3, ..PipelineConfig::default() }
    }

    #[test]
    fn test_embedding_shape_and_finite() {
        let table   = four_station_table();
        let outcome = run_training(&quick_config(), 5, table.num_stations(), &table).unwrap();

        assert_eq!(outcome.embeddings.shape(), (4, 20));
        assert!(outcome.embeddings.is_finite());
        assert_eq!(outcome.history.len(), 3);
        assert!(outcome.history.iter().all(|m| m.train_loss.is_finite()));
    }

    #[test]
    fn test_rows_match_max_station_id() {
        // Station 6 is the highest id; stations 1..=5 never appear
        let table = profile_table(
            &[[100, 40, 2], [0, 0, 0], [0, 0, 0], [0, 0, 0], [0, 0, 0], [0, 0, 0], [120, 50, 1]],
            &[2, 0, 0, 0, 0, 0, 2],
        );
        let outcome = run_training(&quick_config(), 1, table.num_stations(), &table).unwrap();
        assert_eq!(outcome.embeddings.num_stations(), 7);
    }

    #[test]
    fn test_same_seed_same_embeddings() {
        let table = four_station_table();
        let a = run_training(&quick_config(), 99, table.num_stations(), &table).unwrap();
        let b = run_training(&quick_config(), 99, table.num_stations(), &table).unwrap();
        assert_eq!(a.embeddings, b.embeddings);

        let c = run_training(&quick_config(), 100, table.num_stations(), &table).unwrap();
        assert_ne!(a.embeddings, c.embeddings);
    }

    #[test]
    fn test_loss_falls_with_training() {
        let table = four_station_table();
        let cfg = PipelineConfig { batch_size: 10, epochs: 200, learning_rate: 1e-2, ..PipelineConfig::default() };
        let outcome = run_training(&cfg, 3, table.num_stations(), &table).unwrap();

        let first = outcome.history.first().unwrap().train_loss;
        let last  = outcome.history.last().unwrap().train_loss;
        assert!(last < first, "loss did not fall: {first} -> {last}");
    }

    #[test]
    fn test_station_id_past_table_is_rejected() {
        // Station 3 appears in the data but a 3-row table ends at id 2
        let table = four_station_table();
        let err = run_training(&quick_config(), 1, 3, &table).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ValidationError>(),
            Some(ValidationError::StationIdOutOfRange { station_id: 3, max_id: 2, .. })
        ));
    }
}
