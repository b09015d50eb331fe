use crate::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// A fully-connected network: ReLU hidden layers, sigmoid output.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(try_from = "RawDeepNet")]
pub struct DeepNet {
    architecture: Architecture,
    parameters: Parameters,
}

#[derive(Deserialize)]
struct RawDeepNet {
    architecture: Architecture,
    parameters: Parameters,
}

impl TryFrom<RawDeepNet> for DeepNet {
    type Error = NNError;

    fn try_from(raw: RawDeepNet) -> Result<Self> {
        let layers = raw.parameters.iter().cloned().collect();
        let parameters = Parameters::from_layers(&raw.architecture, layers)?;
        Ok(Self { architecture: raw.architecture, parameters })
    }
}

/// One recorded cost value. `step` counts mini-batches across all epochs,
/// `batch` restarts at 0 every epoch; both are 0-based, as is `epoch`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct CostSample {
    pub step: usize,
    pub epoch: usize,
    pub batch: usize,
    pub cost: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TrainingReport {
    /// Empty unless `record_costs` was set.
    pub costs: Vec<CostSample>,
    /// Held-out accuracy after each epoch, if a held-out set was given.
    pub eval_accuracy: Vec<f64>,
}

impl DeepNet {
    /// Randomly initialised network, seeded from the OS.
    pub fn new(units: &[usize]) -> Result<Self> {
        Self::with_rng(units, &mut StdRng::from_entropy())
    }

    /// Randomly initialised network with a reproducible seed.
    pub fn with_seed(units: &[usize], seed: u64) -> Result<Self> {
        Self::with_rng(units, &mut StdRng::seed_from_u64(seed))
    }

    pub fn with_rng<R: Rng + ?Sized>(units: &[usize], rng: &mut R) -> Result<Self> {
        let architecture = Architecture::new(units)?;
        let parameters = Parameters::initialize(&architecture, rng);
        debug!(
            units = ?architecture.units(),
            params = parameters.count_parameters(),
            "initialised network"
        );
        Ok(Self { architecture, parameters })
    }

    /// Network with explicit weights; shapes are checked against `units`.
    pub fn from_layers(units: &[usize], layers: Vec<Layer>) -> Result<Self> {
        let architecture = Architecture::new(units)?;
        let parameters = Parameters::from_layers(&architecture, layers)?;
        Ok(Self { architecture, parameters })
    }

    pub fn architecture(&self) -> &Architecture {
        &self.architecture
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn summary(&self) -> String {
        let mut total_param = 0;
        let mut res = "\nModel DeepNet\n".to_string();
        res.push_str("-------------------------------------------------------------\n");
        res.push_str("Layer (Activation)\t Output shape\t\t No.of params\n");
        let num_layers = self.parameters.num_layers();
        for (idx, layer) in self.parameters.iter().enumerate() {
            let n = layer.num_params();
            total_param += n;
            res.push_str(&format!(
                "{} ({:?})\t\t  ({}, None)\t\t  {}\n",
                idx + 1,
                Activation::for_layer(idx + 1, num_layers),
                layer.w.nrows(),
                n
            ));
        }
        res.push_str("-------------------------------------------------------------\n");
        res.push_str(&format!("Total params: {}\n", total_param));
        res
    }

    fn check_dataset(&self, data: &Dataset) -> Result<()> {
        if data.feature_dim() != self.architecture.input_dim() {
            return Err(NNError::ShapeMismatch(format!(
                "dataset has {} features, network expects {}",
                data.feature_dim(),
                self.architecture.input_dim()
            )));
        }
        if data.label_dim() != self.architecture.output_dim() {
            return Err(NNError::ShapeMismatch(format!(
                "dataset labels have {} entries, network outputs {}",
                data.label_dim(),
                self.architecture.output_dim()
            )));
        }
        Ok(())
    }

    /// Forward pass keeping the per-layer caches for [`backpropagate`].
    pub fn feedforward<'a>(&'a self, x: &Array2<f64>) -> Result<(Array2<f64>, Vec<LayerCache<'a>>)> {
        feedforward(x, &self.parameters)
    }

    /// Forward → cost → backward → update on one batch. Returns the cost
    /// measured before the update.
    pub fn train_step(&mut self, batch: &Batch, optimizer: &Sgd) -> Result<f64> {
        let (a_l, caches) = feedforward(&batch.x, &self.parameters)?;
        let (cost, da_l) = criteria(&a_l, &batch.y)?;
        let grads = backpropagate(da_l, caches)?;
        optimizer.step(&mut self.parameters, &grads)?;
        Ok(cost)
    }

    /// Mini-batch gradient descent, shuffling with `config.shuffle_seed`.
    pub fn sgd(
        &mut self,
        training_data: &Dataset,
        config: &TrainConfig,
        test_data: Option<&Dataset>,
    ) -> Result<TrainingReport> {
        let mut shuffler = SeededShuffle::new(config.shuffle_seed);
        self.sgd_with_shuffler(training_data, config, test_data, &mut shuffler)
    }

    /// Mini-batch gradient descent with a caller-supplied shuffle.
    ///
    /// Runs exactly `config.num_epochs` epochs. Each epoch reorders the
    /// training set, splits it into contiguous mini-batches (the last one
    /// may be short) and takes one update per batch. A malformed batch
    /// aborts training with the error.
    pub fn sgd_with_shuffler<S: Shuffler + ?Sized>(
        &mut self,
        training_data: &Dataset,
        config: &TrainConfig,
        test_data: Option<&Dataset>,
        shuffler: &mut S,
    ) -> Result<TrainingReport> {
        config.validate()?;
        if training_data.is_empty() {
            return Err(NNError::EmptyDataset);
        }
        self.check_dataset(training_data)?;
        if let Some(test) = test_data {
            if test.is_empty() {
                return Err(NNError::EmptyDataset);
            }
            self.check_dataset(test)?;
        }

        let optimizer = Sgd::new(config.learning_rate);
        let mut report = TrainingReport::default();
        let mut data = training_data.clone();
        let mut step = 0;

        for epoch in 0..config.num_epochs {
            info!(epoch = epoch + 1, num_epochs = config.num_epochs, "training epoch");

            let perm = shuffler.permutation(data.len());
            check_permutation(&perm, data.len())?;
            data = data.select(&perm);

            for (batch_num, range) in mini_batch_ranges(data.len(), config.mini_batch_size)
                .into_iter()
                .enumerate()
            {
                let batch = data.batch(range);
                let cost = self.train_step(&batch, &optimizer)?;
                debug!(step, batch = batch_num, size = batch.size(), cost, "step");

                if batch_num % config.report_every == 0 {
                    info!(batch = batch_num, epoch = epoch + 1, cost, "cost after iteration");
                    if config.record_costs {
                        report.costs.push(CostSample {
                            step,
                            epoch,
                            batch: batch_num,
                            cost,
                        });
                    }
                }
                step += 1;
            }

            if let Some(test) = test_data {
                let acc = self.evaluate(test)?;
                info!(epoch = epoch + 1, accuracy = acc, "accuracy against held-out set");
                report.eval_accuracy.push(acc);
            }
        }

        Ok(report)
    }

    /// Output probabilities, one column per sample `(units[L], n)`.
    pub fn predict(&self, data: &Dataset) -> Result<Array2<f64>> {
        self.check_dataset(data)?;
        infer(&data.features().t().to_owned(), &self.parameters)
    }

    /// Fraction of samples whose predicted class matches the label.
    pub fn evaluate(&self, data: &Dataset) -> Result<f64> {
        let probs = self.predict(data)?;
        accuracy(probs.view(), data.labels().t())
    }
}

fn check_permutation(perm: &[usize], n: usize) -> Result<()> {
    let mut seen = vec![false; n];
    if perm.len() != n {
        return Err(NNError::ShapeMismatch(format!(
            "shuffle returned {} indices for {} samples",
            perm.len(),
            n
        )));
    }
    for &i in perm {
        if i >= n || seen[i] {
            return Err(NNError::ShapeMismatch(format!(
                "shuffle returned an invalid permutation (index {})",
                i
            )));
        }
        seen[i] = true;
    }
    Ok(())
}

fn argmax(v: ArrayView1<f64>) -> usize {
    v.iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |best, (i, &x)| if x > best.1 { (i, x) } else { best })
        .0
}

/// Classification accuracy for features-major `(classes, m)` matrices.
///
/// Multi-unit outputs compare the argmax of each column. A single output
/// unit is read as a binary probability and thresholded at 0.5, since an
/// argmax over one row always agrees.
pub fn accuracy(probs: ArrayView2<f64>, labels: ArrayView2<f64>) -> Result<f64> {
    if probs.dim() != labels.dim() {
        return Err(NNError::ShapeMismatch(format!(
            "prediction shape {:?} doesn't match label shape {:?}",
            probs.dim(),
            labels.dim()
        )));
    }
    let m = probs.ncols();
    if m == 0 {
        return Err(NNError::EmptyDataset);
    }

    let hits = if probs.nrows() == 1 {
        let (p_row, y_row) = (probs.row(0), labels.row(0));
        p_row
            .iter()
            .zip(y_row.iter())
            .filter(|&(&p, &y)| (p >= 0.5) == (y >= 0.5))
            .count()
    } else {
        probs
            .columns()
            .into_iter()
            .zip(labels.columns())
            .filter(|(p, y)| argmax(p.view()) == argmax(y.view()))
            .count()
    };

    Ok(hits as f64 / m as f64)
}
