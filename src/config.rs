use crate::prelude::*;

/// Hyper-parameters for [`DeepNet::sgd`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TrainConfig {
    pub num_epochs: usize,
    pub mini_batch_size: usize,
    pub learning_rate: f64,
    /// Keep a `(step, cost)` sample every `report_every` mini-batches.
    pub record_costs: bool,
    pub report_every: usize,
    pub shuffle_seed: u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            num_epochs: 30,
            mini_batch_size: 10,
            learning_rate: 0.5,
            record_costs: false,
            report_every: 100,
            shuffle_seed: 0,
        }
    }
}

impl TrainConfig {
    pub fn with_epochs(mut self, num_epochs: usize) -> Self {
        self.num_epochs = num_epochs;
        self
    }

    pub fn with_mini_batch_size(mut self, mini_batch_size: usize) -> Self {
        self.mini_batch_size = mini_batch_size;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_record_costs(mut self, record_costs: bool) -> Self {
        self.record_costs = record_costs;
        self
    }

    pub fn with_report_every(mut self, report_every: usize) -> Self {
        self.report_every = report_every;
        self
    }

    pub fn with_shuffle_seed(mut self, shuffle_seed: u64) -> Self {
        self.shuffle_seed = shuffle_seed;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_epochs == 0 {
            return Err(NNError::InvalidConfig("num_epochs must be greater than 0".to_string()));
        }
        if self.mini_batch_size == 0 {
            return Err(NNError::InvalidConfig("mini_batch_size must be greater than 0".to_string()));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(NNError::InvalidConfig(format!(
                "learning_rate must be a positive finite number, got {}",
                self.learning_rate
            )));
        }
        if self.report_every == 0 {
            return Err(NNError::InvalidConfig("report_every must be greater than 0".to_string()));
        }
        Ok(())
    }
}
