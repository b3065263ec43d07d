// ============================================================
// Layer 6 - Training Metrics
// ============================================================
// One record per epoch: the mean of the per-batch MSE losses.
// Records are logged as training runs and returned to the
// caller with the embedding snapshot.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// The epoch number (starts at 1)
    pub epoch: usize,

    /// Mean MSE over the epoch's mini-batches; NaN if there were none
    pub train_loss: f64,

    pub batches: usize,
}

impl EpochMetrics {
    pub fn new(epoch: usize, loss_sum: f64, batches: usize) -> Self {
        let train_loss = if batches > 0 { loss_sum / batches as f64 } else { f64::NAN };
        Self { epoch, train_loss, batches }
    }

    pub fn log(&self, total_epochs: usize) {
        tracing::info!(
            "Epoch {:>3}/{} | train_loss={:.4} | batches={}",
            self.epoch, total_epochs, self.train_loss, self.batches,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_loss() {
        let m = EpochMetrics::new(1, 9.0, 3);
        assert_eq!(m.train_loss, 3.0);
        assert_eq!(m.batches, 3);
    }

    #[test]
    fn test_no_batches_is_nan() {
        assert!(EpochMetrics::new(1, 0.0, 0).train_loss.is_nan());
    }
}
