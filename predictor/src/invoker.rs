use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use log::{debug, error, info};
use machine_learning::arch::Regressor;

use crate::{
    artifact,
    display::Estimate,
    error::{PredictorError, Result},
    features::{self, FeatureVector, Schema},
    inputs::HouseInputs,
    variant::Variant,
};

/// Anything that maps a feature vector to a single predicted value.
pub trait Estimator {
    /// Predicts the label for one feature vector.
    ///
    /// # Errors
    /// Whatever the underlying model fails with, e.g. a feature count it wasn't trained on.
    fn predict(&self, features: &FeatureVector) -> Result<f32>;
}

impl Estimator for Regressor {
    fn predict(&self, features: &FeatureVector) -> Result<f32> {
        let y = Regressor::predict(self, features.to_row().view())?;
        y.first().copied().ok_or_else(|| {
            PredictorError::InvalidArtifact("the model returned no prediction".into())
        })
    }
}

/// Where the invoker gets its model from.
pub trait ModelSource {
    type Model: Estimator;

    /// Loads the model.
    ///
    /// # Returns
    /// `None` when there's no model to load, or an error if one exists but can't be used.
    fn load(&self) -> Result<Option<Self::Model>>;
}

/// Loads a model artifact from a file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    schema: Schema,
}

impl FileSource {
    /// Creates a new `FileSource`.
    ///
    /// # Arguments
    /// * `path` - The artifact's path.
    /// * `schema` - The schema the artifact must have been trained on.
    pub fn new<P: Into<PathBuf>>(path: P, schema: Schema) -> Self {
        Self {
            path: path.into(),
            schema,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ModelSource for FileSource {
    type Model = Regressor;

    fn load(&self) -> Result<Option<Regressor>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                error!(
                    "Model file missing. Please upload '{}'",
                    self.path.display()
                );
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let artifact = artifact::from_bytes(&bytes)?;
        if artifact.schema() != self.schema {
            return Err(PredictorError::SchemaMismatch {
                expected: self.schema.name(),
                got: artifact.schema().name().to_string(),
            });
        }

        info!(
            "loaded {} model from {} ({} parameters)",
            artifact.schema(),
            self.path.display(),
            artifact.regressor().params().len()
        );
        Ok(Some(artifact.into_regressor()))
    }
}

/// Runs the prediction flow: assembles the features, loads the model once and predicts.
pub struct Invoker<S: ModelSource> {
    source: S,
    variant: Variant,
    model: OnceLock<Option<S::Model>>,
}

impl Invoker<FileSource> {
    /// Creates an invoker reading the model artifact at `path`.
    pub fn from_path<P: Into<PathBuf>>(path: P, variant: Variant) -> Self {
        Self::new(FileSource::new(path, variant.schema()), variant)
    }
}

impl<S: ModelSource> Invoker<S> {
    /// Creates a new `Invoker`. Nothing is loaded until the model is first needed.
    pub fn new(source: S, variant: Variant) -> Self {
        Self {
            source,
            variant,
            model: OnceLock::new(),
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the model, loading it on the first call.
    ///
    /// Both a loaded model and a missing one are kept for the rest of the invoker's lifetime.
    /// Load errors aren't, so a later call tries again.
    pub fn model(&self) -> Result<Option<&S::Model>> {
        if let Some(model) = self.model.get() {
            debug!("using cached model");
            return Ok(model.as_ref());
        }

        let loaded = self.source.load()?;
        Ok(self.model.get_or_init(|| loaded).as_ref())
    }

    /// Estimates the price of a house.
    ///
    /// # Errors
    /// * `SchemaMismatch` if the inputs don't belong to this invoker's variant.
    /// * `ModelNotLoaded` if there's no model, in which case nothing is predicted.
    /// * Any load or model failure.
    pub fn estimate(&self, inputs: &HouseInputs) -> Result<Estimate> {
        let schema = self.variant.schema();
        if inputs.schema() != schema {
            return Err(PredictorError::SchemaMismatch {
                expected: schema.name(),
                got: inputs.schema().name().to_string(),
            });
        }

        let features = features::assemble(inputs);
        let Some(model) = self.model()? else {
            return Err(PredictorError::ModelNotLoaded);
        };

        let raw = model.predict(&features)?;
        debug!("raw prediction {raw}");
        Ok(Estimate::new(raw, self.variant))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::inputs::{CensusInputs, ListingInputs};

    struct Fixed {
        value: f32,
        calls: AtomicUsize,
    }

    impl Estimator for Fixed {
        fn predict(&self, _features: &FeatureVector) -> Result<f32> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.value)
        }
    }

    struct Stub {
        value: Option<f32>,
        loads: AtomicUsize,
    }

    impl Stub {
        fn returning(value: f32) -> Self {
            Self {
                value: Some(value),
                loads: AtomicUsize::new(0),
            }
        }

        fn missing() -> Self {
            Self {
                value: None,
                loads: AtomicUsize::new(0),
            }
        }
    }

    impl ModelSource for Stub {
        type Model = Fixed;

        fn load(&self) -> Result<Option<Fixed>> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            Ok(self.value.map(|value| Fixed {
                value,
                calls: AtomicUsize::new(0),
            }))
        }
    }

    #[test]
    fn census_estimate_is_scaled_by_100000() {
        let invoker = Invoker::new(Stub::returning(1.5), Variant::CaliforniaStyled);
        let inputs = HouseInputs::California(CensusInputs::default());

        let estimate = invoker.estimate(&inputs).unwrap();
        assert_eq!(estimate.raw(), 1.5);
        assert_eq!(estimate.formatted(), "$150,000.00");
    }

    #[test]
    fn listing_estimate_is_shown_directly() {
        let invoker = Invoker::new(Stub::returning(5_250_000.0), Variant::Listing);
        let inputs = HouseInputs::Listing(ListingInputs::default());

        let estimate = invoker.estimate(&inputs).unwrap();
        assert_eq!(estimate.formatted(), "$5,250,000.00");
    }

    #[test]
    fn model_is_loaded_once() {
        let invoker = Invoker::new(Stub::returning(2.0), Variant::CaliforniaSidebar);
        let inputs = HouseInputs::California(CensusInputs::default());

        invoker.estimate(&inputs).unwrap();
        invoker.estimate(&inputs).unwrap();

        assert_eq!(invoker.source().loads.load(Ordering::SeqCst), 1);
        let model = invoker.model().unwrap().unwrap();
        assert_eq!(model.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn missing_model_short_circuits() {
        let invoker = Invoker::new(Stub::missing(), Variant::CaliforniaColumns);
        let inputs = HouseInputs::California(CensusInputs::default());

        let err = invoker.estimate(&inputs).unwrap_err();
        assert!(matches!(err, PredictorError::ModelNotLoaded));

        invoker.estimate(&inputs).unwrap_err();
        assert_eq!(invoker.source().loads.load(Ordering::SeqCst), 1);
        assert!(invoker.model().unwrap().is_none());
    }

    #[test]
    fn inputs_of_another_schema_are_rejected() {
        let invoker = Invoker::new(Stub::returning(1.0), Variant::Listing);
        let inputs = HouseInputs::California(CensusInputs::default());

        let err = invoker.estimate(&inputs).unwrap_err();
        assert!(matches!(err, PredictorError::SchemaMismatch { .. }));
        assert_eq!(invoker.source().loads.load(Ordering::SeqCst), 0);
    }
}
