use crate::prelude::*;
use tracing::warn;

/// Lower/upper clamp applied to `A_L` before the gradient divides by it.
pub const PROB_EPSILON: f64 = 1e-15;

fn check_shapes(a_l: &Array2<f64>, y: &Array2<f64>) -> Result<()> {
    if a_l.shape() != y.shape() {
        return Err(NNError::ShapeMismatch(format!(
            "prediction shape {:?} doesn't match target shape {:?}",
            a_l.shape(),
            y.shape()
        )));
    }
    Ok(())
}

/// Binary cross-entropy averaged over the `m` columns of `a_l`.
///
/// Per-element terms that come out non-finite (`log(0)`) count as zero.
pub fn cost(a_l: &Array2<f64>, y: &Array2<f64>) -> Result<f64> {
    check_shapes(a_l, y)?;
    let m = a_l.ncols() as f64;
    let total: f64 = Zip::from(a_l)
        .and(y)
        .fold(0.0, |acc, &a, &y| {
            let term = y * a.ln() + (1.0 - y) * (1.0 - a).ln();
            if term.is_finite() {
                acc + term
            } else {
                acc
            }
        });
    Ok(-total / m)
}

/// `dA_L = -(Y / A_L - (1 - Y) / (1 - A_L))`, with `A_L` clamped into
/// `[PROB_EPSILON, 1 - PROB_EPSILON]` so the result stays finite.
pub fn output_gradient(a_l: &Array2<f64>, y: &Array2<f64>) -> Result<Array2<f64>> {
    check_shapes(a_l, y)?;
    let saturated = a_l
        .iter()
        .filter(|&&a| a < PROB_EPSILON || a > 1.0 - PROB_EPSILON)
        .count();
    if saturated > 0 {
        warn!(saturated, "output probabilities clamped before computing the gradient");
    }
    let a_safe = a_l.mapv(|a| a.clamp(PROB_EPSILON, 1.0 - PROB_EPSILON));
    Ok(Zip::from(&a_safe)
        .and(y)
        .map_collect(|&a, &y| -(y / a - (1.0 - y) / (1.0 - a))))
}

/// Cost and output gradient in one call.
pub fn criteria(a_l: &Array2<f64>, y: &Array2<f64>) -> Result<(f64, Array2<f64>)> {
    Ok((cost(a_l, y)?, output_gradient(a_l, y)?))
}
