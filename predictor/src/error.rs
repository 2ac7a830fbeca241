use std::{fmt, io};

use machine_learning::MlErr;
use safetensors::SafeTensorError;

/// The predictor module's result type.
pub type Result<T> = std::result::Result<T, PredictorError>;

/// All errors that can occur while estimating a price.
#[derive(Debug)]
pub enum PredictorError {
    /// No model artifact was found, so nothing can be predicted.
    ModelNotLoaded,
    /// An input value the form couldn't produce: out of range or off the slider's step.
    InvalidInput {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
        step: f64,
    },
    /// Invalid configuration, caught before loading anything.
    InvalidConfig(String),
    /// The artifact was read but its contents don't describe a usable model.
    InvalidArtifact(String),
    /// The artifact or the inputs were built for a different feature schema.
    SchemaMismatch {
        expected: &'static str,
        got: String,
    },
    /// The model itself failed while predicting.
    Model(MlErr),
    Io(io::Error),
    Json(serde_json::Error),
    SafeTensors(SafeTensorError),
}

impl fmt::Display for PredictorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ModelNotLoaded => write!(f, "Model not loaded"),
            Self::InvalidInput {
                field,
                value,
                min,
                max,
                step,
            } => write!(
                f,
                "{field} must be within [{min}, {max}] in steps of {step}, got {value}"
            ),
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::InvalidArtifact(msg) => write!(f, "invalid model artifact: {msg}"),
            Self::SchemaMismatch { expected, got } => {
                write!(f, "schema mismatch: expected {expected}, got {got}")
            }
            Self::Model(e) => write!(f, "model error: {e}"),
            Self::Io(e) => write!(f, "io error: {e}"),
            Self::Json(e) => write!(f, "json error: {e}"),
            Self::SafeTensors(e) => write!(f, "safetensors error: {e}"),
        }
    }
}

impl std::error::Error for PredictorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Model(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::SafeTensors(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MlErr> for PredictorError {
    fn from(e: MlErr) -> Self {
        Self::Model(e)
    }
}

impl From<io::Error> for PredictorError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for PredictorError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<SafeTensorError> for PredictorError {
    fn from(e: SafeTensorError) -> Self {
        Self::SafeTensors(e)
    }
}
