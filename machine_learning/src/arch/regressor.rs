use ndarray::{Array1, ArrayView2, Axis};

use super::{Model, Sequential};
use crate::{MlErr, Result};

/// A trained single-output model: the architecture together with its parameters.
#[derive(Debug, Clone)]
pub struct Regressor {
    model: Sequential,
    params: Vec<f32>,
}

impl Regressor {
    /// Creates a new `Regressor`.
    ///
    /// # Arguments
    /// * `model` - The model architecture, it must output a single value per row.
    /// * `params` - The trained parameters, exactly `model.size()` of them.
    ///
    /// # Returns
    /// A new `Regressor` or an error if the parameters or the output size don't fit the model.
    pub fn new(model: Sequential, params: Vec<f32>) -> Result<Self> {
        if params.len() != model.size() {
            return Err(MlErr::SizeMismatch {
                what: "regressor parameters",
                got: params.len(),
                expected: model.size(),
            });
        }

        if model.output_size() != 1 {
            return Err(MlErr::SizeMismatch {
                what: "regressor outputs",
                got: model.output_size(),
                expected: 1,
            });
        }

        Ok(Self { model, params })
    }

    pub fn model(&self) -> &Sequential {
        &self.model
    }

    pub fn params(&self) -> &[f32] {
        &self.params
    }

    pub fn input_size(&self) -> usize {
        self.model.input_size()
    }

    /// Predicts one value per input row.
    pub fn predict(&self, x: ArrayView2<f32>) -> Result<Array1<f32>> {
        let y = self.model.forward(&self.params, x)?;
        Ok(y.remove_axis(Axis(1)))
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;
    use crate::arch::layers::Layer;

    fn linear(params: Vec<f32>) -> Result<Regressor> {
        let model = Sequential::new([Layer::linear((3, 1))])?;
        Regressor::new(model, params)
    }

    #[test]
    fn regressor_predicts_one_value_per_row() {
        let reg = linear(vec![1.0, 0.0, -1.0, 10.0]).unwrap();
        let x = array![[1.0_f32, 5.0, 2.0], [0.0, 0.0, 0.0]];

        let y = reg.predict(x.view()).unwrap();
        assert_eq!(y, array![9.0, 10.0]);
    }

    #[test]
    fn regressor_rejects_wrong_params_len() {
        assert!(linear(vec![1.0, 2.0]).is_err());
    }

    #[test]
    fn regressor_rejects_multiple_outputs() {
        let model = Sequential::new([Layer::linear((2, 2))]).unwrap();
        let res = Regressor::new(model, vec![0.0; 6]);
        assert!(matches!(
            res,
            Err(MlErr::SizeMismatch {
                got: 2,
                expected: 1,
                ..
            })
        ));
    }

    #[test]
    fn regressor_propagates_feature_mismatch() {
        let reg = linear(vec![0.0; 4]).unwrap();
        let x = array![[1.0_f32, 2.0]];

        assert!(reg.predict(x.view()).is_err());
    }
}
