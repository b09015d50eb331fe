// src/core.rs
pub mod activations;
pub mod backward;
pub mod forward;
pub mod gradcheck;
pub mod layers;
pub mod losses;
pub mod optimizers;

// Re-export commonly used items
pub use activations::Activation;
pub use backward::{backpropagate, Gradients, LayerGradient};
pub use forward::{feedforward, infer, LayerCache};
pub use layers::{Architecture, Layer, Parameters};
pub use losses::{cost, criteria, output_gradient};
pub use optimizers::Sgd;
