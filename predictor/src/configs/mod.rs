mod json;
mod predictor;

pub use json::load_config;
pub use predictor::{DEFAULT_MODEL_PATH, MODEL_PATH_ENV, PredictorConfig};
