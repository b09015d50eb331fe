pub use serde::{Serialize, Deserialize};

pub use ndarray::*;
pub use ndarray_rand::RandomExt;
pub use ndarray_rand::rand_distr::StandardNormal;

pub use crate::models::{DeepNet, TrainingReport, CostSample, accuracy};
pub use crate::error::*;
pub use crate::config::TrainConfig;
pub use crate::data::{Batch, Dataset, mini_batch_ranges};
pub use crate::utils::{SeededShuffle, Shuffler};

// Internal re-exports
pub use crate::core::{
    Activation,
    Architecture,
    Layer,
    Parameters,
    LayerCache,
    Gradients,
    LayerGradient,
    Sgd,
    feedforward,
    infer,
    backpropagate,
    cost,
    criteria,
    output_gradient,
};
