use crate::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct LayerGradient {
    pub dw: Array2<f64>,
    pub db: Array2<f64>,
    /// Gradient with respect to this layer's input activation.
    pub da_prev: Array2<f64>,
}

/// One gradient triple per layer, addressed 1..=L like [`Parameters`].
#[derive(Debug, Clone, PartialEq)]
pub struct Gradients {
    layers: Vec<LayerGradient>,
}

impl Gradients {
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    pub fn get(&self, l: usize) -> Option<&LayerGradient> {
        l.checked_sub(1).and_then(|idx| self.layers.get(idx))
    }

    /// `(l, gradient)` pairs in order 1..=L.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &LayerGradient)> {
        self.layers.iter().enumerate().map(|(idx, g)| (idx + 1, g))
    }
}

/// Gradients of one layer given the gradient of its output activation.
pub fn layer_backward(da: &Array2<f64>, cache: &LayerCache) -> LayerGradient {
    let dz = cache.activation.backward(&cache.z, da);
    let m = cache.a_prev.ncols() as f64;

    let dw = dz.dot(&cache.a_prev.t()) / m;
    let db = dz.sum_axis(Axis(1)).insert_axis(Axis(1)) / m;
    let da_prev = cache.layer.w.t().dot(&dz);

    LayerGradient { dw, db, da_prev }
}

/// Propagates `dA_L` from the output layer back to layer 1.
///
/// `da_l` must already have the shape of `A_L`. The caches are consumed, so
/// the parameter store they borrow is free for the update afterwards.
pub fn backpropagate(da_l: Array2<f64>, caches: Vec<LayerCache>) -> Result<Gradients> {
    let last = caches
        .last()
        .ok_or_else(|| NNError::ShapeMismatch("no layer caches to backpropagate".to_string()))?;
    if da_l.dim() != last.z.dim() {
        return Err(NNError::ShapeMismatch(format!(
            "output gradient shape {:?} doesn't match output shape {:?}",
            da_l.dim(),
            last.z.dim()
        )));
    }

    let mut layers = Vec::with_capacity(caches.len());
    let mut da = da_l;
    for cache in caches.iter().rev() {
        let grad = layer_backward(&da, cache);
        da = grad.da_prev.clone();
        layers.push(grad);
    }
    layers.reverse();

    Ok(Gradients { layers })
}
