use crate::prelude::*;
use rayon::prelude::*;

/// Which parameter of a layer a numerical derivative belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Weight(usize, usize),
    Bias(usize),
}

fn perturbed(params: &Parameters, l: usize, slot: Slot, delta: f64) -> Parameters {
    let mut p = params.clone();
    let layer = &mut p.layers_mut()[l - 1];
    match slot {
        Slot::Weight(i, j) => layer.w[[i, j]] += delta,
        Slot::Bias(i) => layer.b[[i, 0]] += delta,
    }
    p
}

fn batch_cost(params: &Parameters, batch: &Batch) -> Result<f64> {
    let a_l = super::forward::infer(&batch.x, params)?;
    cost(&a_l, &batch.y)
}

/// Central finite-difference gradients of the cost for every weight and
/// bias, as one `(dW, db)` pair per layer ordered 1..=L.
///
/// Each parameter is perturbed on its own copy of the store, in parallel.
pub fn numerical_gradients(params: &Parameters, batch: &Batch, epsilon: f64) -> Result<Vec<(Array2<f64>, Array2<f64>)>> {
    let slots: Vec<(usize, Slot)> = params
        .iter()
        .enumerate()
        .flat_map(|(idx, layer)| {
            let (rows, cols) = layer.w.dim();
            let weights = (0..rows).flat_map(move |i| (0..cols).map(move |j| (idx + 1, Slot::Weight(i, j))));
            let biases = (0..rows).map(move |i| (idx + 1, Slot::Bias(i)));
            weights.chain(biases)
        })
        .collect();

    let derivs: Vec<f64> = slots
        .par_iter()
        .map(|&(l, slot)| {
            let plus = batch_cost(&perturbed(params, l, slot, epsilon), batch)?;
            let minus = batch_cost(&perturbed(params, l, slot, -epsilon), batch)?;
            Ok((plus - minus) / (2.0 * epsilon))
        })
        .collect::<Result<Vec<f64>>>()?;

    let mut out: Vec<(Array2<f64>, Array2<f64>)> = params
        .iter()
        .map(|layer| (Array2::zeros(layer.w.dim()), Array2::zeros(layer.b.dim())))
        .collect();
    for (&(l, slot), d) in slots.iter().zip(derivs) {
        let (dw, db) = &mut out[l - 1];
        match slot {
            Slot::Weight(i, j) => dw[[i, j]] = d,
            Slot::Bias(i) => db[[i, 0]] = d,
        }
    }
    Ok(out)
}

/// Largest relative error `|a - n| / max(|a| + |n|, 1e-8)` between the
/// analytical and numerical gradients.
pub fn max_relative_error(analytical: &Gradients, numerical: &[(Array2<f64>, Array2<f64>)]) -> f64 {
    let rel = |a: f64, n: f64| (a - n).abs() / (a.abs() + n.abs()).max(1e-8);
    analytical
        .iter()
        .zip(numerical)
        .flat_map(|((_, g), (dw, db))| {
            let w = g.dw.iter().zip(dw.iter()).map(move |(&a, &n)| rel(a, n));
            let b = g.db.iter().zip(db.iter()).map(move |(&a, &n)| rel(a, n));
            w.chain(b)
        })
        .fold(0.0, f64::max)
}
