use thiserror::Error;

/// Errors produced by the simulation and its configuration layer.
///
/// The geometric kinds are absorbed inside the tick; only settings loading
/// hands errors back to the caller.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("lines are parallel, no intersection")]
    ParallelLines,

    #[error("polygon needs at least 3 vertices, has {vertices}")]
    EmptyPolygon { vertices: usize },

    #[error("a pickup is already active")]
    SpawnWhileActive,

    #[error("game over already fired")]
    DoubleGameOver,

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error(transparent)]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for results using [`SimError`].
pub type Result<T> = std::result::Result<T, SimError>;
