pub mod artifact;
pub mod configs;
pub mod display;
pub mod error;
pub mod features;
pub mod inputs;
pub mod invoker;
pub mod variant;

pub use display::Estimate;
pub use error::{PredictorError, Result};
pub use features::{FeatureVector, Schema};
pub use inputs::HouseInputs;
pub use invoker::{Estimator, FileSource, Invoker, ModelSource};
pub use variant::Variant;

use configs::PredictorConfig;

/// Runs one estimate as configured.
///
/// # Errors
/// Returns a `PredictorError` if the config is invalid, the model is missing or fails.
pub fn estimate(config: &PredictorConfig) -> Result<Estimate> {
    config.validate()?;
    log::info!(
        "estimating with the {:?} variant, model at {}",
        config.variant,
        config.model_path.display()
    );
    config.invoker().estimate(&config.inputs())
}
