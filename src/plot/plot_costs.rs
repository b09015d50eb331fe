use crate::prelude::*;
use plotters::prelude::*;
use std::path::Path;

fn plot_err<E: std::fmt::Display>(err: E) -> NNError {
    NNError::PlotError(err.to_string())
}

/// Draws recorded costs against the global step as an SVG line chart.
pub fn plot_costs<P: AsRef<Path>>(costs: &[CostSample], filename: P) -> crate::error::Result<()> {
    if costs.is_empty() {
        return Err(NNError::PlotError("no cost samples to plot".to_string()));
    }

    let root = SVGBackend::new(filename.as_ref(), (800, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    // non-finite costs would break the axis range
    let points: Vec<(usize, f64)> = costs
        .iter()
        .filter(|c| c.cost.is_finite())
        .map(|c| (c.step, c.cost))
        .collect();

    let x_max = points.iter().map(|p| p.0).max().unwrap_or(0) + 1;
    let y_max = points.iter().map(|p| p.1).fold(0.0, f64::max);
    let y_max = if y_max > 0.0 { y_max * 1.1 } else { 1.0 };

    let mut chart = ChartBuilder::on(&root)
        .caption("Training cost", ("sans-serif", 30).into_font())
        .margin(5)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0..x_max, 0.0..y_max)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Mini-batch step")
        .y_desc("Cross-entropy cost")
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(LineSeries::new(points, &BLUE))
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}
