use thiserror::Error;

/// Error type covering every failure the planning core can surface.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("store initialization failed: {0}")]
    Initialization(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("`{0}` already exists")]
    Duplicate(String),
    #[error("{entity} `{id}` not found")]
    NotFound { entity: &'static str, id: String },
    #[error("amount {amount} is outside the allowed range 0..={max}")]
    Range { amount: f64, max: f64 },
    #[error("budget sync failed: {0}")]
    Sync(String),
    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl PlannerError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;
