//! Fully-connected feed-forward classifier trained with mini-batch
//! gradient descent and backpropagation.

pub mod config;
pub mod core;
pub mod data;
pub mod error;
pub mod models;
pub mod prelude;
pub mod report;
pub mod utils;

// Re-export types
pub use config::TrainConfig;
pub use crate::core::{Activation, Architecture, Layer, Parameters};
pub use data::{Batch, Dataset};
pub use error::{NNError, Result};
pub use models::{CostSample, DeepNet, TrainingReport};

pub mod plot {
    pub mod plot_costs;
}
