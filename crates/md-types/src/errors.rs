use thiserror::Error;

/// Main error type for the MoDiff system
#[derive(Error, Debug)]
pub enum MdError {
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("Optimizer error: {0}")]
    Optimizer(#[from] OptimizerError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(String),
}

/// Noise-schedule construction errors
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Noise schedule needs at least 2 steps, got {steps}")]
    TooFewSteps { steps: usize },

    #[error(
        "Invalid beta bounds: expected 0 < beta_min < beta_max < 1, got beta_min {beta_min}, beta_max {beta_max}"
    )]
    InvalidBetaBounds { beta_min: f64, beta_max: f64 },

    #[error("Schedule validation failed: {message}")]
    Validation { message: String },
}

/// Errors raised while stepping the reverse process
#[derive(Error, Debug)]
pub enum OptimizerError {
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("Degenerate rewards at step {step}: population reward variance is zero")]
    DegenerateReward { step: usize },

    #[error("Numeric instability at step {step}: {message}")]
    NumericInstability { step: usize, message: String },

    #[error("Invalid optimizer configuration: {message}")]
    InvalidConfig { message: String },
}

/// Result type alias for MoDiff operations
pub type MdResult<T> = Result<T, MdError>;
