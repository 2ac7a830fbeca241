use ndarray::{Array2, ArrayView2};

use super::Dense;
use crate::{Result, arch::activations::ActFn};

#[derive(Debug, Clone)]
pub enum Layer {
    Dense(Dense),
}
use Layer::*;

impl Layer {
    pub fn dense(dim: (usize, usize), act_fn: ActFn) -> Self {
        Self::Dense(Dense::new(dim, Some(act_fn)))
    }

    /// A dense layer with no activation function, i.e. a plain affine map.
    pub fn linear(dim: (usize, usize)) -> Self {
        Self::Dense(Dense::new(dim, None))
    }

    /// Returns the amount of parameters this layer has.
    pub fn size(&self) -> usize {
        match self {
            Dense(l) => l.size(),
        }
    }

    /// Returns the `(inputs, outputs)` shape of this layer.
    pub fn dim(&self) -> (usize, usize) {
        match self {
            Dense(l) => l.dim(),
        }
    }

    pub fn forward(&self, params: &[f32], x: ArrayView2<f32>) -> Result<Array2<f32>> {
        match self {
            Dense(l) => l.forward(params, x),
        }
    }
}
