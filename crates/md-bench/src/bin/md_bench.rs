use anyhow::Context;
use md_bench::{run_benchmark, write_mean_trajectory_csv, write_result_json, BenchmarkConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("MD_BENCH_CONFIG").ok())
        .unwrap_or_else(|| "bench.json".to_string());

    let raw = std::fs::read_to_string(&config_path)
        .with_context(|| format!("failed to read config {config_path}"))?;
    let config: BenchmarkConfig =
        serde_json::from_str(&raw).with_context(|| format!("failed to parse config {config_path}"))?;

    let result = run_benchmark(&config)?;
    let csv_path = write_mean_trajectory_csv(&result, &config.output_dir)?;
    let json_path = write_result_json(&result, &config.output_dir)?;

    info!(
        objective = %result.objective,
        mean_final_best = ?result.mean_final_best_reward(),
        csv = %csv_path.display(),
        json = %json_path.display(),
        "benchmark complete"
    );
    Ok(())
}
