// End-to-end training: convergence on toy problems, batching boundaries and
// reproducibility.

use deepnet::prelude::*;
use ndarray_rand::rand_distr::Uniform;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn xor() -> Dataset {
    Dataset::new(
        array![[0., 0.], [0., 1.], [1., 0.], [1., 1.]],
        array![[0.], [1.], [1.], [0.]],
    )
    .unwrap()
}

// Points in [-1, 1]^3 labelled by the sign of x0 + x1 - x2, keeping a
// margin of 0.2 around the separating plane.
fn separable_3d(n: usize, seed: u64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut features = Vec::with_capacity(n);
    let mut labels = Vec::with_capacity(n);
    while features.len() < n {
        let x: Vec<f64> = (0..3).map(|_| rng.gen_range(-1.0..1.0)).collect();
        let s = x[0] + x[1] - x[2];
        if s.abs() < 0.2 {
            continue;
        }
        labels.push(vec![if s > 0.0 { 1.0 } else { 0.0 }]);
        features.push(x);
    }
    Dataset::from_vecs(&features, &labels).unwrap()
}

// Two square blobs centred on (-1, -1) and (1, 1).
fn blobs(n: usize, seed: u64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Array2::random_using((n, 2), Uniform::new(-0.5, 0.5), &mut rng);
    let mut features = Array2::zeros((n, 2));
    let mut labels = Array2::zeros((n, 1));
    for i in 0..n {
        let centre = if i % 2 == 0 { -1.0 } else { 1.0 };
        features[[i, 0]] = centre + noise[[i, 0]];
        features[[i, 1]] = centre + noise[[i, 1]];
        labels[[i, 0]] = (i % 2) as f64;
    }
    Dataset::new(features, labels).unwrap()
}

#[test]
fn test_xor_end_to_end() {
    let config = TrainConfig::default()
        .with_epochs(500)
        .with_mini_batch_size(4)
        .with_learning_rate(0.5);
    let mut net = DeepNet::with_seed(&[2, 4, 1], 1).unwrap();
    net.sgd(&xor(), &config, None).unwrap();
    assert!(net.evaluate(&xor()).unwrap() >= 0.75);
}

#[test]
fn test_logistic_regression_converges() {
    let data = separable_3d(80, 21);
    let mut net = DeepNet::with_seed(&[3, 1], 0).unwrap();
    let config = TrainConfig::default().with_epochs(200);
    net.sgd(&data, &config, None).unwrap();
    assert!(net.evaluate(&data).unwrap() >= 0.95);
}

#[test]
fn test_cost_decreases_on_blobs() {
    let data = blobs(60, 3);
    let mut net = DeepNet::with_seed(&[2, 4, 1], 3).unwrap();
    let config = TrainConfig::default()
        .with_epochs(50)
        .with_record_costs(true)
        .with_report_every(1);
    let report = net.sgd(&data, &config, None).unwrap();

    // 60 samples in batches of 10
    assert_eq!(report.costs.len(), 50 * 6);
    assert!(report.costs.iter().all(|c| c.cost >= 0.0));

    let mean = |s: &[CostSample]| s.iter().map(|c| c.cost).sum::<f64>() / s.len() as f64;
    let first = mean(&report.costs[..6]);
    let last = mean(&report.costs[report.costs.len() - 6..]);
    assert!(last < first * 0.5, "first {} last {}", first, last);
    assert!(net.evaluate(&data).unwrap() >= 0.95);
}

#[test]
fn test_held_out_accuracy_is_reported_each_epoch() {
    let train = blobs(40, 8);
    let test = blobs(20, 9);
    let mut net = DeepNet::with_seed(&[2, 3, 1], 8).unwrap();
    let config = TrainConfig::default().with_epochs(5);
    let before = net.clone();
    let report = net.sgd(&train, &config, Some(&test)).unwrap();

    assert_eq!(report.eval_accuracy.len(), 5);
    assert!(report.eval_accuracy.iter().all(|a| (0.0..=1.0).contains(a)));
    // the final entry reflects the trained parameters
    assert_eq!(report.eval_accuracy[4], net.evaluate(&test).unwrap());
    assert_ne!(before.parameters(), net.parameters());
}

#[test]
fn test_batch_larger_than_dataset() {
    let mut net = DeepNet::with_seed(&[2, 4, 1], 1).unwrap();
    let config = TrainConfig::default()
        .with_epochs(7)
        .with_mini_batch_size(100)
        .with_record_costs(true)
        .with_report_every(1);
    let report = net.sgd(&xor(), &config, None).unwrap();

    // one whole-dataset batch per epoch
    assert_eq!(report.costs.len(), 7);
    assert!(report.costs.iter().all(|c| c.batch == 0));
    assert_eq!(report.costs.last().unwrap().step, 6);
}

#[test]
fn test_partial_final_batch() {
    let data = separable_3d(7, 5);
    let mut net = DeepNet::with_seed(&[3, 2, 1], 1).unwrap();
    let config = TrainConfig::default()
        .with_epochs(4)
        .with_mini_batch_size(3)
        .with_record_costs(true)
        .with_report_every(1);
    let report = net.sgd(&data, &config, None).unwrap();

    // 3 + 3 + 1
    assert_eq!(report.costs.len(), 4 * 3);
    assert_eq!(mini_batch_ranges(7, 3).last().unwrap().len(), 7 % 3);
    assert!(report.costs.iter().all(|c| c.cost.is_finite()));
}

#[test]
fn test_periodic_reporting_every_hundredth_batch() {
    // 250 samples in batches of 1: batches 0, 100 and 200 are recorded
    let data = separable_3d(250, 6);
    let mut net = DeepNet::with_seed(&[3, 1], 0).unwrap();
    let config = TrainConfig::default()
        .with_epochs(2)
        .with_mini_batch_size(1)
        .with_record_costs(true);
    let report = net.sgd(&data, &config, None).unwrap();

    let batches: Vec<usize> = report.costs.iter().map(|c| c.batch).collect();
    assert_eq!(batches, vec![0, 100, 200, 0, 100, 200]);
    let steps: Vec<usize> = report.costs.iter().map(|c| c.step).collect();
    assert_eq!(steps, vec![0, 100, 200, 250, 350, 450]);
}

#[test]
fn test_training_is_reproducible() {
    let data = blobs(30, 2);
    let config = TrainConfig::default().with_epochs(10).with_record_costs(true).with_report_every(1);

    let mut a = DeepNet::with_seed(&[2, 5, 1], 42).unwrap();
    let mut b = DeepNet::with_seed(&[2, 5, 1], 42).unwrap();
    let ra = a.sgd(&data, &config, None).unwrap();
    let rb = b.sgd(&data, &config, None).unwrap();

    assert_eq!(a.parameters(), b.parameters());
    assert_eq!(ra, rb);
}

#[test]
fn test_shuffle_seed_changes_batch_order() {
    let data = blobs(30, 2);
    let base = TrainConfig::default().with_epochs(3).with_record_costs(true).with_report_every(1);

    let mut a = DeepNet::with_seed(&[2, 5, 1], 42).unwrap();
    let mut b = DeepNet::with_seed(&[2, 5, 1], 42).unwrap();
    let ra = a.sgd(&data, &base.clone().with_shuffle_seed(1), None).unwrap();
    let rb = b.sgd(&data, &base.with_shuffle_seed(2), None).unwrap();

    assert_ne!(ra.costs, rb.costs);
}

#[test]
fn test_multiclass_one_hot_training() {
    // three tight clusters on the corners of a triangle, one-hot labels
    let centres = [(0.0, 2.0), (-2.0, -1.0), (2.0, -1.0)];
    let mut features = Vec::new();
    let mut labels = Vec::new();
    for i in 0..60 {
        let class = i % 3;
        let offset = (i / 3) as f64 * 0.01;
        let (cx, cy) = centres[class];
        features.push(vec![cx + offset, cy - offset]);
        let mut one_hot = vec![0.0; 3];
        one_hot[class] = 1.0;
        labels.push(one_hot);
    }
    let data = Dataset::from_vecs(&features, &labels).unwrap();
    let mut net = DeepNet::with_seed(&[2, 8, 3], 11).unwrap();
    let config = TrainConfig::default().with_epochs(100).with_mini_batch_size(6);
    net.sgd(&data, &config, None).unwrap();

    assert_eq!(net.predict(&data).unwrap().dim(), (3, 60));
    assert!(net.evaluate(&data).unwrap() >= 0.9);
}
