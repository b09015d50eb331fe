use anyhow::Result;
use deepnet::plot::plot_costs;
use deepnet::prelude::*;
use deepnet::report::write_costs_csv;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("deepnet=info".parse()?),
        )
        .init();

    let x = array![[0., 0.], [0., 1.], [1., 0.], [1., 1.]];
    let y = array![[0.], [1.], [1.], [0.]];
    let training = Dataset::new(x, y)?;

    let mut model = DeepNet::with_seed(&[2, 4, 1], 1)?;
    println!("{}", model.summary());

    let config = TrainConfig::default()
        .with_epochs(500)
        .with_mini_batch_size(4)
        .with_learning_rate(0.5)
        .with_record_costs(true)
        .with_report_every(1);

    let report = model.sgd(&training, &config, None)?;

    let accuracy = model.evaluate(&training)?;
    println!("Accuracy on XOR: {:.2}", accuracy);
    println!("Predictions: {}", model.predict(&training)?);

    write_costs_csv(&report.costs, "xor_costs.csv")?;
    plot_costs::plot_costs(&report.costs, "xor_costs.svg")?;
    println!("Cost curve written to 'xor_costs.csv' and 'xor_costs.svg'");

    Ok(())
}
