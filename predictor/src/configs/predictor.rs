use std::{env, path::PathBuf};

use serde::Deserialize;

use crate::{
    error::{PredictorError, Result},
    inputs::HouseInputs,
    invoker::{FileSource, Invoker},
    variant::Variant,
};

pub const DEFAULT_MODEL_PATH: &str = "housing_model.safetensors";

/// Environment variable overriding the configured model path.
pub const MODEL_PATH_ENV: &str = "MODEL_PATH";

/// Everything one run of the estimator needs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PredictorConfig {
    #[serde(default)]
    pub variant: Variant,
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
    /// The form's values. When absent the variant's defaults are used.
    #[serde(default)]
    pub inputs: Option<HouseInputs>,
}

fn default_model_path() -> PathBuf {
    PathBuf::from(DEFAULT_MODEL_PATH)
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            model_path: default_model_path(),
            inputs: None,
        }
    }
}

impl PredictorConfig {
    /// Replaces the model path with the one in `MODEL_PATH`, if set.
    pub fn with_env_overrides(self) -> Self {
        self.with_model_path_override(env::var_os(MODEL_PATH_ENV).map(PathBuf::from))
    }

    pub fn with_model_path_override(mut self, model_path: Option<PathBuf>) -> Self {
        if let Some(path) = model_path {
            self.model_path = path;
        }
        self
    }

    /// Returns the configured inputs or the variant's defaults.
    pub fn inputs(&self) -> HouseInputs {
        self.inputs
            .clone()
            .unwrap_or_else(|| HouseInputs::defaults(self.variant.schema()))
    }

    /// Checks the inputs fit the variant and the form's ranges.
    ///
    /// # Errors
    /// Returns `InvalidConfig` for inputs of another schema and `InvalidInput` for values the
    /// form couldn't produce.
    pub fn validate(&self) -> Result<()> {
        if self.model_path.as_os_str().is_empty() {
            return Err(PredictorError::InvalidConfig(
                "model_path must not be empty".into(),
            ));
        }

        let inputs = self.inputs();
        let schema = self.variant.schema();
        if inputs.schema() != schema {
            return Err(PredictorError::InvalidConfig(format!(
                "variant {:?} takes {schema} inputs, got {} inputs",
                self.variant,
                inputs.schema()
            )));
        }

        inputs.validate()
    }

    /// Creates the invoker this config describes.
    pub fn invoker(&self) -> Invoker<FileSource> {
        Invoker::from_path(self.model_path.clone(), self.variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::{CensusInputs, ListingInputs};

    #[test]
    fn empty_config_uses_defaults() {
        let config: PredictorConfig = serde_json::from_str("{}").unwrap();

        assert_eq!(config, PredictorConfig::default());
        assert_eq!(config.inputs(), HouseInputs::California(CensusInputs::default()));
        config.validate().unwrap();
    }

    #[test]
    fn listing_variant_defaults_to_listing_inputs() {
        let config: PredictorConfig = serde_json::from_str(r#"{"variant": "listing"}"#).unwrap();

        assert_eq!(config.inputs(), HouseInputs::Listing(ListingInputs::default()));
        config.validate().unwrap();
    }

    #[test]
    fn mismatched_inputs_are_invalid() {
        let config: PredictorConfig = serde_json::from_str(
            r#"{"variant": "listing", "inputs": {"california": {"MedInc": 4.0}}}"#,
        )
        .unwrap();

        assert!(matches!(
            config.validate(),
            Err(PredictorError::InvalidConfig(_))
        ));
    }

    #[test]
    fn out_of_range_inputs_are_invalid() {
        let config: PredictorConfig =
            serde_json::from_str(r#"{"inputs": {"california": {"Latitude": 50.0}}}"#).unwrap();

        assert!(matches!(
            config.validate(),
            Err(PredictorError::InvalidInput {
                field: "Latitude",
                ..
            })
        ));
    }

    #[test]
    fn fractional_house_age_is_invalid() {
        let config: PredictorConfig =
            serde_json::from_str(r#"{"inputs": {"california": {"HouseAge": 20.5}}}"#).unwrap();

        assert!(matches!(
            config.validate(),
            Err(PredictorError::InvalidInput {
                field: "HouseAge",
                ..
            })
        ));
    }

    #[test]
    fn model_path_override_wins() {
        let config = PredictorConfig::default()
            .with_model_path_override(Some(PathBuf::from("/models/ca.safetensors")));
        assert_eq!(config.model_path, PathBuf::from("/models/ca.safetensors"));

        let config = PredictorConfig::default().with_model_path_override(None);
        assert_eq!(config.model_path, PathBuf::from(DEFAULT_MODEL_PATH));
    }
}
