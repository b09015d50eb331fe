#[allow(unused)]
use crate::prelude::*;

/// Elementwise activation tag carried by every layer cache.
///
/// Hidden layers always rectify and the output layer always saturates, so
/// the derivative is picked by matching on the tag instead of comparing
/// function pointers.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Relu,
    Sigmoid,
}

impl Activation {
    /// The activation used by layer `l` (1-based) of an `num_layers`-deep net.
    pub fn for_layer(l: usize, num_layers: usize) -> Self {
        if l == num_layers {
            Self::Sigmoid
        } else {
            Self::Relu
        }
    }

    pub fn forward(&self, z: &Array2<f64>) -> Array2<f64> {
        match self {
            Self::Relu => relu_forward(z),
            Self::Sigmoid => sigmoid_forward(z),
        }
    }

    /// Derivative with respect to the pre-activation `z`.
    pub fn derivative(&self, z: &Array2<f64>) -> Array2<f64> {
        match self {
            Self::Relu => relu_backward(z),
            Self::Sigmoid => sigmoid_backward(z),
        }
    }

    /// `dZ = dA ⊙ g'(Z)`
    pub fn backward(&self, z: &Array2<f64>, da: &Array2<f64>) -> Array2<f64> {
        da * &self.derivative(z)
    }
}

pub(crate) fn sigmoid(z: f64) -> f64 {
    // split on the sign so exp() never overflows
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

fn sigmoid_forward(z: &Array2<f64>) -> Array2<f64> {
    z.mapv(sigmoid)
}

fn sigmoid_backward(z: &Array2<f64>) -> Array2<f64> {
    z.mapv(|z| {
        let s = sigmoid(z);
        s * (1.0 - s)
    })
}

fn relu_forward(z: &Array2<f64>) -> Array2<f64> {
    z.mapv(|z| if z >= 0.0 { z } else { 0.0 })
}

fn relu_backward(z: &Array2<f64>) -> Array2<f64> {
    z.mapv(|z| if z >= 0.0 { 1.0 } else { 0.0 })
}
