use machine_learning::{
    Result as MlResult,
    arch::{
        Sequential,
        activations::ActFn,
        layers::{Dense, Layer},
    },
};
use serde::{Deserialize, Serialize};

/// Serialized form of the `ActFn` enum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActFnSpec {
    Sigmoid { amp: f32 },
    Relu,
}

/// Serialized form of the `Layer` enum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerSpec {
    Dense {
        dim: (usize, usize),
        act_fn: Option<ActFnSpec>,
    },
}

/// Serialized form of the model architecture stored in an artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelSpec {
    Sequential { layers: Vec<LayerSpec> },
}

impl ModelSpec {
    /// Builds the model this spec describes.
    pub fn build(&self) -> MlResult<Sequential> {
        match self {
            ModelSpec::Sequential { layers } => {
                Sequential::new(layers.iter().map(|layer| layer.build()))
            }
        }
    }

    /// Describes an existing model.
    pub fn describe(model: &Sequential) -> Self {
        let layers = model
            .layers()
            .iter()
            .map(|layer| match layer {
                Layer::Dense(dense) => LayerSpec::describe(dense),
            })
            .collect();

        ModelSpec::Sequential { layers }
    }
}

impl LayerSpec {
    fn build(&self) -> Layer {
        match *self {
            LayerSpec::Dense { dim, act_fn } => {
                Layer::Dense(Dense::new(dim, act_fn.map(|a| a.build())))
            }
        }
    }

    fn describe(dense: &Dense) -> Self {
        LayerSpec::Dense {
            dim: dense.dim(),
            act_fn: dense.act_fn().map(ActFnSpec::describe),
        }
    }
}

impl ActFnSpec {
    fn build(self) -> ActFn {
        match self {
            ActFnSpec::Sigmoid { amp } => ActFn::sigmoid(amp),
            ActFnSpec::Relu => ActFn::relu(),
        }
    }

    fn describe(act_fn: &ActFn) -> Self {
        match act_fn {
            ActFn::Sigmoid(s) => ActFnSpec::Sigmoid { amp: s.amp() },
            ActFn::Relu(_) => ActFnSpec::Relu,
        }
    }
}
