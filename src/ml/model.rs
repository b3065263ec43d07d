use burn::{
    module::Param,
    nn::{
        loss::{MseLoss, Reduction},
        Embedding, EmbeddingConfig,
        Linear, LinearConfig,
    },
    prelude::*,
    tensor::activation::relu,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Number of regression targets: max_temp, min_temp, precipitation
pub const TARGETS: usize = 3;

/// Half-width of the uniform range embedding rows start in
const EMBEDDING_INIT_RANGE: f32 = 0.05;

#[derive(Config, Debug)]
pub struct StationEmbeddingConfig {
    pub num_stations: usize,
    #[config(default = 20)]
    pub embedding_size: usize,
    #[config(default = 40)]
    pub hidden_units: usize,
}

impl StationEmbeddingConfig {
    /// Build the model with burn's default initialisers.
    pub fn init<B: Backend>(&self, device: &B::Device) -> StationEmbeddingModel<B> {
        let embedding = EmbeddingConfig::new(self.num_stations, self.embedding_size).init(device);
        // +1 input for the day-of-year scalar concatenated after the embedding
        let hidden    = LinearConfig::new(self.embedding_size + 1, self.hidden_units).init(device);
        let output    = LinearConfig::new(self.hidden_units, TARGETS).init(device);
        StationEmbeddingModel { embedding, hidden, output }
    }

    /// Build the model with every parameter drawn from a `StdRng` seeded
    /// with `seed`. Two calls with the same seed give identical weights,
    /// independent of the backend's global RNG.
    pub fn init_seeded<B: Backend>(&self, seed: u64, device: &B::Device) -> StationEmbeddingModel<B> {
        let mut rng   = StdRng::seed_from_u64(seed);
        let mut model = self.init(device);

        model.embedding.weight = Param::from_tensor(uniform_tensor(
            &mut rng,
            [self.num_stations, self.embedding_size],
            EMBEDDING_INIT_RANGE,
            device,
        ));
        model.hidden = seeded_dense(model.hidden, &mut rng, [self.embedding_size + 1, self.hidden_units], device);
        model.output = seeded_dense(model.output, &mut rng, [self.hidden_units, TARGETS], device);
        model
    }
}

/// Glorot-uniform kernel, zero bias
fn seeded_dense<B: Backend>(
    mut layer: Linear<B>,
    rng:       &mut StdRng,
    shape:     [usize; 2],
    device:    &B::Device,
) -> Linear<B> {
    let [fan_in, fan_out] = shape;
    let limit = (6.0 / (fan_in + fan_out) as f32).sqrt();
    layer.weight = Param::from_tensor(uniform_tensor(rng, shape, limit, device));
    layer.bias   = Some(Param::from_tensor(Tensor::zeros([fan_out], device)));
    layer
}

fn uniform_tensor<B: Backend>(
    rng:    &mut StdRng,
    shape:  [usize; 2],
    limit:  f32,
    device: &B::Device,
) -> Tensor<B, 2> {
    let values: Vec<f32> = (0..shape[0] * shape[1])
        .map(|_| rng.gen_range(-limit..=limit))
        .collect();
    Tensor::from_data(TensorData::new(values, shape), device)
}

/// embedding(station) ++ day_of_year → Linear → ReLU → Linear → 3 outputs
#[derive(Module, Debug)]
pub struct StationEmbeddingModel<B: Backend> {
    pub embedding: Embedding<B>,
    pub hidden:    Linear<B>,
    pub output:    Linear<B>,
}

impl<B: Backend> StationEmbeddingModel<B> {
    /// station_ids: [batch, 1], day_of_year: [batch, 1] → [batch, 3]
    pub fn forward(&self, station_ids: Tensor<B, 2, Int>, day_of_year: Tensor<B, 2>) -> Tensor<B, 2> {
        // [batch, 1, embedding_size] → [batch, embedding_size]
        let embedded = self.embedding.forward(station_ids).flatten::<2>(1, 2);
        let x = Tensor::cat(vec![embedded, day_of_year], 1);
        let x = relu(self.hidden.forward(x));
        self.output.forward(x)
    }

    /// Mean squared error over all three targets
    pub fn forward_loss(
        &self,
        station_ids: Tensor<B, 2, Int>,
        day_of_year: Tensor<B, 2>,
        targets:     Tensor<B, 2>,
    ) -> Tensor<B, 1> {
        let predicted = self.forward(station_ids, day_of_year);
        MseLoss::new().forward(predicted, targets, Reduction::Mean)
    }

    /// The embedding lookup table, [num_stations, embedding_size]
    pub fn embedding_weights(&self) -> Tensor<B, 2> {
        self.embedding.weight.val()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray<f32>;

    fn weights(model: &StationEmbeddingModel<TestBackend>) -> Vec<f32> {
        model.embedding_weights().into_data().to_vec::<f32>().unwrap()
    }

    #[test]
    fn test_forward_shape() {
        let device = Default::default();
        let model: StationEmbeddingModel<TestBackend> =
            StationEmbeddingConfig::new(5).init_seeded(7, &device);

        let ids  = Tensor::<TestBackend, 1, Int>::from_ints([0, 4, 2].as_slice(), &device).reshape([3, 1]);
        let days = Tensor::<TestBackend, 2>::from_data(TensorData::new(vec![0.0f32, 180.0, 360.0], [3, 1]), &device);

        let out = model.forward(ids, days);
        assert_eq!(out.dims(), [3, TARGETS]);
        assert_eq!(model.embedding_weights().dims(), [5, 20]);
    }

    #[test]
    fn test_seeded_init_is_reproducible() {
        let device = Default::default();
        let cfg = StationEmbeddingConfig::new(4).with_embedding_size(6).with_hidden_units(8);
        let a: StationEmbeddingModel<TestBackend> = cfg.init_seeded(11, &device);
        let b: StationEmbeddingModel<TestBackend> = cfg.init_seeded(11, &device);
        let c: StationEmbeddingModel<TestBackend> = cfg.init_seeded(12, &device);

        assert_eq!(weights(&a), weights(&b));
        assert_ne!(weights(&a), weights(&c));
        assert!(weights(&a).iter().all(|w| w.abs() <= EMBEDDING_INIT_RANGE));
    }
}
