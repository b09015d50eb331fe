//! Dataset and mini-batch containers.
//!
//! A [`Dataset`] is samples-major, one row per example, which is how callers
//! hand data in. A [`Batch`] is features-major, one column per example,
//! which is the only orientation the propagation code sees. The transpose
//! happens once, in [`Dataset::batch`].

use crate::prelude::*;
use std::ops::Range;

/// Samples-major `(features: n × input_dim, labels: n × classes)`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Dataset {
    features: Array2<f64>,
    labels: Array2<f64>,
}

impl Dataset {
    pub fn new(features: Array2<f64>, labels: Array2<f64>) -> Result<Self> {
        if features.nrows() != labels.nrows() {
            return Err(NNError::ShapeMismatch(format!(
                "{} feature rows but {} label rows",
                features.nrows(),
                labels.nrows()
            )));
        }
        Ok(Self { features, labels })
    }

    /// Builds a dataset from per-sample vectors. Every feature vector must
    /// have the same length, and likewise every label vector.
    pub fn from_vecs(features: &[Vec<f64>], labels: &[Vec<f64>]) -> Result<Self> {
        Self::new(stack_rows(features)?, stack_rows(labels)?)
    }

    pub fn len(&self) -> usize {
        self.features.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn feature_dim(&self) -> usize {
        self.features.ncols()
    }

    pub fn label_dim(&self) -> usize {
        self.labels.ncols()
    }

    pub fn features(&self) -> &Array2<f64> {
        &self.features
    }

    pub fn labels(&self) -> &Array2<f64> {
        &self.labels
    }

    /// Reorders features and labels jointly.
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            features: self.features.select(Axis(0), indices),
            labels: self.labels.select(Axis(0), indices),
        }
    }

    /// Rows `range` as a features-major batch.
    pub fn batch(&self, range: Range<usize>) -> Batch {
        Batch {
            x: self.features.slice(s![range.clone(), ..]).t().to_owned(),
            y: self.labels.slice(s![range, ..]).t().to_owned(),
        }
    }

    /// The whole dataset as one batch.
    pub fn as_batch(&self) -> Batch {
        self.batch(0..self.len())
    }
}

fn stack_rows(rows: &[Vec<f64>]) -> Result<Array2<f64>> {
    let width = rows.first().map_or(0, Vec::len);
    if let Some(idx) = rows.iter().position(|r| r.len() != width) {
        return Err(NNError::ShapeMismatch(format!(
            "row {} has length {}, expected {}",
            idx,
            rows[idx].len(),
            width
        )));
    }
    let flat: Vec<f64> = rows.iter().flatten().copied().collect();
    Ok(Array2::from_shape_vec((rows.len(), width), flat)?)
}

/// Features-major `(x: input_dim × m, y: classes × m)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub x: Array2<f64>,
    pub y: Array2<f64>,
}

impl Batch {
    pub fn new(x: Array2<f64>, y: Array2<f64>) -> Result<Self> {
        if x.ncols() != y.ncols() {
            return Err(NNError::ShapeMismatch(format!(
                "{} feature columns but {} label columns",
                x.ncols(),
                y.ncols()
            )));
        }
        Ok(Self { x, y })
    }

    /// Number of examples, m.
    pub fn size(&self) -> usize {
        self.x.ncols()
    }
}

/// Contiguous `[k, k + size)` ranges covering `0..n`; the last one is short
/// when `size` does not divide `n`.
pub fn mini_batch_ranges(n: usize, size: usize) -> Vec<Range<usize>> {
    if size == 0 {
        return Vec::new();
    }
    (0..n).step_by(size).map(|k| k..(k + size).min(n)).collect()
}
