//! Result persistence.

use std::fs;
use std::path::{Path, PathBuf};

use md_types::{BenchmarkResult, MdError, MdResult};
use tracing::info;

/// Write the averaged trajectory as a two-column CSV
/// (`evaluations,best_reward`), returning the written path.
pub fn write_mean_trajectory_csv(result: &BenchmarkResult, dir: &Path) -> MdResult<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}-{}d.csv", result.objective, result.config.dim));

    let mut writer = csv::Writer::from_path(&path)
        .map_err(|e| MdError::Csv(format!("failed to open {}: {e}", path.display())))?;
    writer
        .write_record(["evaluations", "best_reward"])
        .map_err(|e| MdError::Csv(e.to_string()))?;
    for point in &result.mean_trajectory {
        writer
            .write_record([point.evaluations.to_string(), point.best_reward.to_string()])
            .map_err(|e| MdError::Csv(e.to_string()))?;
    }
    writer.flush()?;

    info!(
        path = %path.display(),
        rows = result.mean_trajectory.len(),
        "wrote mean trajectory CSV"
    );
    Ok(path)
}

/// Write the full benchmark record (config, per-trial traces, averaged
/// curve) as pretty-printed JSON, returning the written path.
pub fn write_result_json(result: &BenchmarkResult, dir: &Path) -> MdResult<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}-{}d.json", result.objective, result.config.dim));

    let file = fs::File::create(&path)?;
    serde_json::to_writer_pretty(file, result)?;

    info!(path = %path.display(), "wrote benchmark record");
    Ok(path)
}
