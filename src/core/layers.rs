use crate::prelude::*;
use crate::randn_array;
use rand::Rng;

/// Layer sizes `[input_dim, units_1, ..., units_L]`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(try_from = "Vec<usize>")]
pub struct Architecture(Vec<usize>);

impl TryFrom<Vec<usize>> for Architecture {
    type Error = NNError;

    fn try_from(units: Vec<usize>) -> Result<Self> {
        Self::new(&units)
    }
}

impl Architecture {
    pub fn new(units: &[usize]) -> Result<Self> {
        if units.len() < 2 {
            return Err(NNError::InvalidArchitecture(format!(
                "expected at least 2 entries (input + one layer), got {}",
                units.len()
            )));
        }
        if let Some(idx) = units.iter().position(|&u| u == 0) {
            return Err(NNError::InvalidArchitecture(format!(
                "dimension at index {} must be greater than 0",
                idx
            )));
        }
        Ok(Self(units.to_vec()))
    }

    /// Number of weight layers, L.
    pub fn num_layers(&self) -> usize {
        self.0.len() - 1
    }

    pub fn input_dim(&self) -> usize {
        self.0[0]
    }

    pub fn output_dim(&self) -> usize {
        self.0[self.0.len() - 1]
    }

    pub fn units(&self) -> &[usize] {
        &self.0
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Layer {
    /// (units[l], units[l-1])
    pub w: Array2<f64>,
    /// (units[l], 1)
    pub b: Array2<f64>,
}

impl Layer {
    fn check_shape(&self, rows: usize, cols: usize, l: usize) -> Result<()> {
        if self.w.dim() != (rows, cols) {
            return Err(NNError::InvalidArchitecture(format!(
                "layer {} weights have shape {:?}, expected {:?}",
                l,
                self.w.dim(),
                (rows, cols)
            )));
        }
        if self.b.dim() != (rows, 1) {
            return Err(NNError::InvalidArchitecture(format!(
                "layer {} bias has shape {:?}, expected {:?}",
                l,
                self.b.dim(),
                (rows, 1)
            )));
        }
        Ok(())
    }

    pub fn num_params(&self) -> usize {
        self.w.len() + self.b.len()
    }
}

/// Per-layer weights and biases, addressed by layer index 1..=L.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(try_from = "RawParameters")]
pub struct Parameters {
    layers: Vec<Layer>,
}

// Deserialized layers go through `from_layers` like any other input.
#[derive(Deserialize)]
struct RawParameters {
    layers: Vec<Layer>,
}

impl TryFrom<RawParameters> for Parameters {
    type Error = NNError;

    fn try_from(raw: RawParameters) -> Result<Self> {
        let mut units: Vec<usize> = raw.layers.first().map(|l| l.w.ncols()).into_iter().collect();
        units.extend(raw.layers.iter().map(|l| l.w.nrows()));
        let architecture = Architecture::new(&units)?;
        Self::from_layers(&architecture, raw.layers)
    }
}

impl Parameters {
    /// Standard-normal weights scaled by `INIT_SCALE`, zero biases.
    pub fn initialize<R: Rng + ?Sized>(architecture: &Architecture, rng: &mut R) -> Self {
        let units = architecture.units();
        let layers = (1..units.len())
            .map(|l| Layer {
                w: randn_array!(&mut *rng, units[l], units[l - 1]),
                b: Array2::zeros((units[l], 1)),
            })
            .collect();
        Self { layers }
    }

    /// Builds a store from explicit layers, rejecting any shape that does
    /// not match `architecture`.
    pub fn from_layers(architecture: &Architecture, layers: Vec<Layer>) -> Result<Self> {
        let units = architecture.units();
        if layers.len() != architecture.num_layers() {
            return Err(NNError::InvalidArchitecture(format!(
                "got {} layers for an architecture with {}",
                layers.len(),
                architecture.num_layers()
            )));
        }
        for (i, layer) in layers.iter().enumerate() {
            layer.check_shape(units[i + 1], units[i], i + 1)?;
        }
        Ok(Self { layers })
    }

    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    fn index(&self, l: usize) -> Result<usize> {
        if l == 0 || l > self.layers.len() {
            return Err(NNError::InvalidArchitecture(format!(
                "layer index {} out of range 1..={}",
                l,
                self.layers.len()
            )));
        }
        Ok(l - 1)
    }

    /// Read-only access to layer `l` (1-based).
    pub fn get(&self, l: usize) -> Result<&Layer> {
        let idx = self.index(l)?;
        Ok(&self.layers[idx])
    }

    /// Layers in order 1..=L.
    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    pub(crate) fn layers_mut(&mut self) -> &mut [Layer] {
        &mut self.layers
    }

    /// Errors unless `dw`/`db` have the shapes of layer `l`.
    pub fn check_gradient(&self, l: usize, dw: &Array2<f64>, db: &Array2<f64>) -> Result<()> {
        let layer = self.get(l)?;
        if dw.dim() != layer.w.dim() || db.dim() != layer.b.dim() {
            return Err(NNError::ShapeMismatch(format!(
                "layer {} gradients {:?}/{:?} do not match parameters {:?}/{:?}",
                l,
                dw.dim(),
                db.dim(),
                layer.w.dim(),
                layer.b.dim()
            )));
        }
        Ok(())
    }

    /// `W ← W - lr·dW`, `b ← b - lr·db`, in place.
    pub fn update(&mut self, l: usize, dw: &Array2<f64>, db: &Array2<f64>, learning_rate: f64) -> Result<()> {
        self.check_gradient(l, dw, db)?;
        let layer = &mut self.layers[l - 1];
        layer.w.scaled_add(-learning_rate, dw);
        layer.b.scaled_add(-learning_rate, db);
        Ok(())
    }

    pub fn count_parameters(&self) -> usize {
        self.layers.iter().map(Layer::num_params).sum()
    }
}
