//! On-disk format of trained models.
//!
//! An artifact is a single safetensors file. The `params` tensor holds every model parameter as
//! a flat F32 vector and the header metadata describes how to use them:
//!
//! * `format_version` - currently `"1"`.
//! * `schema` - the name of the feature schema the model was trained on.
//! * `features` - JSON array with the feature names in training order.
//! * `model` - JSON [`ModelSpec`] of the architecture.

mod spec;

use std::{collections::HashMap, fs, path::Path};

use log::debug;
use machine_learning::arch::{Regressor, Sequential};
use safetensors::{Dtype, SafeTensors, tensor::TensorView};

pub use spec::{ActFnSpec, LayerSpec, ModelSpec};

use crate::{
    error::{PredictorError, Result},
    features::Schema,
};

pub const FORMAT_VERSION: &str = "1";
const PARAMS_TENSOR: &str = "params";

/// A trained model together with the input contract it was trained under.
#[derive(Debug, Clone)]
pub struct Artifact {
    schema: Schema,
    regressor: Regressor,
}

impl Artifact {
    /// Creates a new `Artifact`.
    ///
    /// # Errors
    /// Returns `InvalidArtifact` if the model doesn't take one input per schema feature.
    pub fn new(schema: Schema, regressor: Regressor) -> Result<Self> {
        if regressor.input_size() != schema.num_features() {
            return Err(PredictorError::InvalidArtifact(format!(
                "the model takes {} inputs but the {schema} schema has {} features",
                regressor.input_size(),
                schema.num_features()
            )));
        }

        Ok(Self { schema, regressor })
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn regressor(&self) -> &Regressor {
        &self.regressor
    }

    pub fn into_regressor(self) -> Regressor {
        self.regressor
    }
}

/// Serializes an artifact into safetensors bytes.
pub fn to_bytes(artifact: &Artifact) -> Result<Vec<u8>> {
    let features = serde_json::to_string(artifact.schema.feature_names())?;
    let model = serde_json::to_string(&ModelSpec::describe(artifact.regressor.model()))?;

    let metadata = HashMap::from([
        ("format_version".to_string(), FORMAT_VERSION.to_string()),
        ("schema".to_string(), artifact.schema.name().to_string()),
        ("features".to_string(), features),
        ("model".to_string(), model),
    ]);

    let params = artifact.regressor.params();
    let view = TensorView::new(
        Dtype::F32,
        vec![params.len()],
        bytemuck::cast_slice(params),
    )?;

    Ok(safetensors::serialize([(PARAMS_TENSOR, &view)], &Some(metadata))?)
}

/// Deserializes an artifact from safetensors bytes.
///
/// # Errors
/// Returns an error if the bytes aren't a safetensors file, any metadata entry is missing or
/// malformed, or the parameters don't fit the described model.
pub fn from_bytes(bytes: &[u8]) -> Result<Artifact> {
    let (_, metadata) = SafeTensors::read_metadata(bytes)?;
    let header = metadata
        .metadata()
        .as_ref()
        .ok_or_else(|| invalid("missing header metadata"))?;

    let entry = |key: &str| {
        header
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| invalid(format!("missing `{key}` metadata")))
    };

    let version = entry("format_version")?;
    if version != FORMAT_VERSION {
        return Err(invalid(format!("unsupported format version {version}")));
    }

    let schema_name = entry("schema")?;
    let schema = Schema::from_name(schema_name)
        .ok_or_else(|| invalid(format!("unknown schema `{schema_name}`")))?;

    let features: Vec<String> = serde_json::from_str(entry("features")?)?;
    if !features.iter().eq(schema.feature_names()) {
        return Err(PredictorError::SchemaMismatch {
            expected: schema.name(),
            got: format!("features {features:?}"),
        });
    }

    let spec: ModelSpec = serde_json::from_str(entry("model")?)?;
    let model: Sequential = spec.build()?;

    let tensors = SafeTensors::deserialize(bytes)?;
    let view = tensors.tensor(PARAMS_TENSOR)?;
    if view.dtype() != Dtype::F32 {
        return Err(invalid(format!(
            "`{PARAMS_TENSOR}` must be F32, got {:?}",
            view.dtype()
        )));
    }

    let params: Vec<f32> = view
        .data()
        .chunks_exact(size_of::<f32>())
        .map(bytemuck::pod_read_unaligned)
        .collect();
    debug!("read {} parameters for the {schema} schema", params.len());

    Artifact::new(schema, Regressor::new(model, params)?)
}

/// Writes an artifact to disk.
pub fn save<P: AsRef<Path>>(path: P, artifact: &Artifact) -> Result<()> {
    fs::write(path, to_bytes(artifact)?)?;
    Ok(())
}

/// Reads an artifact from disk.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Artifact> {
    from_bytes(&fs::read(path)?)
}

fn invalid(msg: impl Into<String>) -> PredictorError {
    PredictorError::InvalidArtifact(msg.into())
}
