use ndarray::{Array2, ArrayView2};

use super::{Model, layers::Layer};
use crate::{MlErr, Result};

/// A sequential model: information flows forward through its layers in order.
#[derive(Debug, Clone)]
pub struct Sequential {
    layers: Vec<Layer>,
}

impl Sequential {
    /// Creates a new `Sequential`.
    ///
    /// # Arguments
    /// * `layers` - The layers the sequential is composed of.
    ///
    /// # Returns
    /// A new `Sequential` instance or an error if there are no layers or adjacent layers don't
    /// fit together.
    pub fn new<I>(layers: I) -> Result<Self>
    where
        I: IntoIterator<Item = Layer>,
    {
        let layers: Vec<_> = layers.into_iter().collect();
        if layers.is_empty() {
            return Err(MlErr::EmptyModel);
        }

        // Adjacent layers must have compatible dimensions: prev.m == next.n
        for i in 1..layers.len() {
            let (_, prev_output) = layers[i - 1].dim();
            let (input, _) = layers[i].dim();
            if prev_output != input {
                return Err(MlErr::IncompatibleLayers {
                    layer: i,
                    input,
                    prev_output,
                });
            }
        }

        Ok(Self { layers })
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }
}

impl Model for Sequential {
    fn size(&self) -> usize {
        self.layers.iter().map(|layer| layer.size()).sum()
    }

    fn input_size(&self) -> usize {
        self.layers.first().map_or(0, |layer| layer.dim().0)
    }

    fn output_size(&self) -> usize {
        self.layers.last().map_or(0, |layer| layer.dim().1)
    }

    fn forward(&self, params: &[f32], x: ArrayView2<f32>) -> Result<Array2<f32>> {
        let expected = self.size();
        if params.len() != expected {
            return Err(MlErr::SizeMismatch {
                what: "model parameters",
                got: params.len(),
                expected,
            });
        }

        let mut rest = params;
        let mut y = x.to_owned();

        for layer in &self.layers {
            let (front, back) = rest.split_at(layer.size());
            y = layer.forward(front, y.view())?;
            rest = back;
        }

        Ok(y)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;
    use crate::arch::activations::ActFn;

    #[test]
    fn sequential_rejects_empty() {
        assert!(matches!(Sequential::new(Vec::<Layer>::new()), Err(MlErr::EmptyModel)));
    }

    #[test]
    fn sequential_rejects_incompatible_layers() {
        let res = Sequential::new([Layer::linear((2, 3)), Layer::linear((2, 1))]);
        assert!(matches!(
            res,
            Err(MlErr::IncompatibleLayers {
                layer: 1,
                input: 2,
                prev_output: 3
            })
        ));
    }

    #[test]
    fn sequential_chains_layers() {
        let model = Sequential::new([
            Layer::dense((1, 2), ActFn::relu()),
            Layer::linear((2, 1)),
        ])
        .unwrap();
        assert_eq!(model.size(), 4 + 3);
        assert_eq!(model.input_size(), 1);
        assert_eq!(model.output_size(), 1);

        // hidden = relu([x, -x]), out = h0 + 2 * h1 + 0.5
        let params = [1.0, -1.0, 0.0, 0.0, 1.0, 2.0, 0.5];
        let x = array![[3.0_f32], [-2.0]];

        let y = model.forward(&params, x.view()).unwrap();
        assert_eq!(y, array![[3.5], [4.5]]);
    }

    #[test]
    fn sequential_rejects_wrong_params_len() {
        let model = Sequential::new([Layer::linear((2, 1))]).unwrap();
        let x = array![[1.0_f32, 1.0]];

        let err = model.forward(&[0.0; 5], x.view()).unwrap_err();
        assert!(matches!(
            err,
            MlErr::SizeMismatch {
                got: 5,
                expected: 3,
                ..
            }
        ));
    }
}
