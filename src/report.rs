use crate::prelude::*;
use csv::Writer;
use std::path::Path;

/// Writes recorded cost samples as `step,epoch,batch,cost` rows.
pub fn write_costs_csv<P: AsRef<Path>>(costs: &[CostSample], file_path: P) -> Result<()> {
    let mut wtr = Writer::from_path(file_path)?;
    wtr.write_record(["step", "epoch", "batch", "cost"])?;
    for sample in costs {
        wtr.serialize((sample.step, sample.epoch, sample.batch, sample.cost))?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_costs_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("costs.csv");
        let costs = vec![
            CostSample { step: 0, epoch: 0, batch: 0, cost: 0.69 },
            CostSample { step: 100, epoch: 1, batch: 0, cost: 0.25 },
        ];
        write_costs_csv(&costs, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["step,epoch,batch,cost", "0,0,0,0.69", "100,1,0,0.25"]);
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("costs.csv");
        assert!(write_costs_csv(&[], &path).is_err());
    }
}
