use crate::prelude::*;

/// Values retained from one layer's forward computation.
///
/// Borrows the layer it was computed with, so the parameter store cannot be
/// updated while caches from the same step are alive.
#[derive(Debug, Clone)]
pub struct LayerCache<'a> {
    pub a_prev: Array2<f64>,
    pub layer: &'a Layer,
    pub z: Array2<f64>,
    pub activation: Activation,
}

/// `Z = W·A_prev + b`, `A = g(Z)`.
pub fn activate<'a>(
    a_prev: Array2<f64>,
    layer: &'a Layer,
    activation: Activation,
) -> (Array2<f64>, LayerCache<'a>) {
    let z = layer.w.dot(&a_prev) + &layer.b;
    let a = activation.forward(&z);
    (
        a,
        LayerCache {
            a_prev,
            layer,
            z,
            activation,
        },
    )
}

fn check_input(a0: &Array2<f64>, params: &Parameters) -> Result<()> {
    let first = params.get(1)?;
    if a0.nrows() != first.w.ncols() {
        return Err(NNError::ShapeMismatch(format!(
            "input has {} features per sample, network expects {}",
            a0.nrows(),
            first.w.ncols()
        )));
    }
    Ok(())
}

/// Runs the input `(input_dim, m)` through every layer: ReLU for layers
/// 1..L-1, sigmoid for layer L.
///
/// Returns `A_L` with shape `(units[L], m)` and one cache per layer,
/// ordered 1..=L.
pub fn feedforward<'a>(a0: &Array2<f64>, params: &'a Parameters) -> Result<(Array2<f64>, Vec<LayerCache<'a>>)> {
    check_input(a0, params)?;
    let num_layers = params.num_layers();
    let mut caches = Vec::with_capacity(num_layers);
    let mut a = a0.clone();

    for (idx, layer) in params.iter().enumerate() {
        let (next, cache) = activate(a, layer, Activation::for_layer(idx + 1, num_layers));
        caches.push(cache);
        a = next;
    }

    Ok((a, caches))
}

/// Forward pass without bookkeeping, for evaluation.
pub fn infer(a0: &Array2<f64>, params: &Parameters) -> Result<Array2<f64>> {
    check_input(a0, params)?;
    let num_layers = params.num_layers();
    let mut a = a0.clone();
    for (idx, layer) in params.iter().enumerate() {
        let z = layer.w.dot(&a) + &layer.b;
        a = Activation::for_layer(idx + 1, num_layers).forward(&z);
    }
    Ok(a)
}
