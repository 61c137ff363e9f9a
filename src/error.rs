use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShopError {
    #[error("Unrecognized unit: {0}")]
    UnitParse(String),

    #[error("Cannot combine {from} with {to}")]
    IncompatibleUnits { from: String, to: String },

    #[error("Cannot merge {right} into {left}")]
    NameMismatch { left: String, right: String },

    #[error("Missing table: {0}")]
    MissingTable(String),

    #[error("Unable to open {name}: {reason}")]
    SourceUnavailable { name: String, reason: String },

    #[error("Invalid {field}: '{value}'")]
    InvalidField { field: &'static str, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ShopError {
    pub(crate) fn invalid_field(field: &'static str, value: &str) -> Self {
        ShopError::InvalidField {
            field,
            value: value.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ShopError>;
