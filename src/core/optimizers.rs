use crate::prelude::*;

/// Plain gradient descent with a fixed learning rate.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Self {
        Self { learning_rate }
    }

    /// Applies one update to every layer. Takes the store mutably, so no
    /// forward cache of the same step can still be reading it. Every shape
    /// is checked before the first layer moves.
    pub fn step(&self, params: &mut Parameters, grads: &Gradients) -> Result<()> {
        if grads.num_layers() != params.num_layers() {
            return Err(NNError::ShapeMismatch(format!(
                "{} gradient layers for {} parameter layers",
                grads.num_layers(),
                params.num_layers()
            )));
        }
        for (l, g) in grads.iter() {
            params.check_gradient(l, &g.dw, &g.db)?;
        }
        for (l, g) in grads.iter() {
            params.update(l, &g.dw, &g.db, self.learning_rate)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_step_moves_against_gradient() {
        let arch = Architecture::new(&[2, 3, 1]).unwrap();
        let mut params = Parameters::initialize(&arch, &mut StdRng::seed_from_u64(8));
        let x = array![[1.0, 0.0, 0.5], [0.0, 1.0, 0.5]];
        let y = array![[1.0, 0.0, 1.0]];

        let before = {
            let (a_l, _) = feedforward(&x, &params).unwrap();
            cost(&a_l, &y).unwrap()
        };
        let grads = {
            let (a_l, caches) = feedforward(&x, &params).unwrap();
            backpropagate(output_gradient(&a_l, &y).unwrap(), caches).unwrap()
        };
        let old = params.clone();
        Sgd::new(0.1).step(&mut params, &grads).unwrap();

        let w_old = &old.get(2).unwrap().w;
        let w_new = &params.get(2).unwrap().w;
        let expected = w_old - &(0.1 * &grads.get(2).unwrap().dw);
        assert_eq!(w_new, &expected);

        let (a_l, _) = feedforward(&x, &params).unwrap();
        assert!(cost(&a_l, &y).unwrap() < before);
    }

    #[test]
    fn test_step_rejects_layer_count_mismatch() {
        let small = Architecture::new(&[2, 1]).unwrap();
        let big = Architecture::new(&[2, 2, 1]).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let mut params = Parameters::initialize(&small, &mut rng);
        let other = Parameters::initialize(&big, &mut rng);

        let x = Array2::ones((2, 2));
        let (a_l, caches) = feedforward(&x, &other).unwrap();
        let y = Array2::ones(a_l.dim());
        let grads = backpropagate(output_gradient(&a_l, &y).unwrap(), caches).unwrap();
        assert!(Sgd::new(0.5).step(&mut params, &grads).is_err());
    }

    #[test]
    fn test_failed_step_leaves_store_unchanged() {
        // same layer count, but the output layer of the gradients is wider
        let mut rng = StdRng::seed_from_u64(4);
        let mut params = Parameters::initialize(&Architecture::new(&[2, 2, 1]).unwrap(), &mut rng);
        let other = Parameters::from_layers(
            &Architecture::new(&[2, 2, 2]).unwrap(),
            vec![
                Layer { w: array![[0.5, 0.2], [0.1, 0.3]], b: Array2::zeros((2, 1)) },
                Layer { w: array![[0.4, -0.2], [0.3, 0.6]], b: Array2::zeros((2, 1)) },
            ],
        )
        .unwrap();

        let x = array![[1.0, -1.0], [0.5, 2.0]];
        let (a_l, caches) = feedforward(&x, &other).unwrap();
        let y = Array2::ones(a_l.dim());
        let grads = backpropagate(output_gradient(&a_l, &y).unwrap(), caches).unwrap();
        assert!(grads.get(1).unwrap().dw.iter().any(|&g| g != 0.0));

        let before = params.clone();
        let err = Sgd::new(0.5).step(&mut params, &grads);
        assert!(matches!(err, Err(NNError::ShapeMismatch(_))));
        assert_eq!(params, before);
    }
}
