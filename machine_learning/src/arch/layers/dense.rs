use ndarray::{linalg, prelude::*};

use crate::{MlErr, Result, arch::activations::ActFn};

/// A fully connected layer computing `act_fn(x · W + b)`.
///
/// Parameters are laid out as the `dim.0 x dim.1` weight matrix in row-major order followed by
/// the `dim.1` biases.
#[derive(Debug, Clone)]
pub struct Dense {
    dim: (usize, usize),
    act_fn: Option<ActFn>,
    size: usize,
}

impl Dense {
    /// Creates a new `Dense` layer.
    ///
    /// # Arguments
    /// * `dim` - The amount of inputs and outputs of the layer.
    /// * `act_fn` - The activation function applied to every output, if any.
    ///
    /// # Returns
    /// A new `Dense` instance.
    pub fn new(dim: (usize, usize), act_fn: Option<ActFn>) -> Self {
        Self {
            dim,
            size: (dim.0 + 1) * dim.1,
            act_fn,
        }
    }

    /// Returns the size of this layer.
    ///
    /// # Returns
    /// The amount of parameters this layer has.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn dim(&self) -> (usize, usize) {
        self.dim
    }

    pub fn act_fn(&self) -> Option<&ActFn> {
        self.act_fn.as_ref()
    }

    /// Makes a forward pass through the layer.
    ///
    /// # Arguments
    /// * `params` - This layer's slice of parameters.
    /// * `x` - The input rows, one sample per row.
    ///
    /// # Returns
    /// The layer's output for every row or an error if the shapes don't line up.
    pub fn forward(&self, params: &[f32], x: ArrayView2<f32>) -> Result<Array2<f32>> {
        if x.ncols() != self.dim.0 {
            return Err(MlErr::SizeMismatch {
                what: "dense layer inputs",
                got: x.ncols(),
                expected: self.dim.0,
            });
        }

        let (w, b) = self.view_params(params)?;
        let mut z = Array2::<f32>::zeros((x.nrows(), self.dim.1));
        linalg::general_mat_mul(1.0, &x, &w, 0.0, &mut z);
        z += &b;

        if let Some(act_fn) = &self.act_fn {
            z.mapv_inplace(|z| act_fn.f(z));
        }

        Ok(z)
    }

    /// Gives a view of the raw parameter slice as the weights and biases of this layer.
    ///
    /// # Arguments
    /// * `params` - A slice of parameters.
    ///
    /// # Returns
    /// A tuple containing the weights and biases.
    fn view_params<'a>(
        &self,
        params: &'a [f32],
    ) -> Result<(ArrayView2<'a, f32>, ArrayView1<'a, f32>)> {
        let mismatch = || MlErr::SizeMismatch {
            what: "dense layer parameters",
            got: params.len(),
            expected: self.size,
        };

        if params.len() != self.size {
            return Err(mismatch());
        }

        let w_size = self.size - self.dim.1;
        let weights = ArrayView2::from_shape(self.dim, &params[..w_size]).map_err(|_| mismatch())?;
        let biases = ArrayView1::from_shape(self.dim.1, &params[w_size..]).map_err(|_| mismatch())?;
        Ok((weights, biases))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dense_size_counts_biases() {
        let dense = Dense::new((3, 2), None);
        assert_eq!(dense.size(), 8);
    }

    #[test]
    fn dense_forward_is_affine() {
        let dense = Dense::new((2, 1), None);
        // w = [[2], [3]], b = [1]
        let params = [2.0, 3.0, 1.0];
        let x = array![[1.0_f32, 1.0], [0.5, -1.0]];

        let y = dense.forward(&params, x.view()).unwrap();
        assert_eq!(y, array![[6.0], [-1.0]]);
    }

    #[test]
    fn dense_forward_applies_act_fn() {
        let dense = Dense::new((1, 2), Some(ActFn::relu()));
        // w = [[1, -1]], b = [0, 0]
        let params = [1.0, -1.0, 0.0, 0.0];
        let x = array![[2.0_f32]];

        let y = dense.forward(&params, x.view()).unwrap();
        assert_eq!(y, array![[2.0, 0.0]]);
    }

    #[test]
    fn dense_rejects_wrong_input_width() {
        let dense = Dense::new((3, 1), None);
        let params = [0.0; 4];
        let x = array![[1.0_f32, 2.0]];

        let err = dense.forward(&params, x.view()).unwrap_err();
        assert!(matches!(
            err,
            MlErr::SizeMismatch {
                got: 2,
                expected: 3,
                ..
            }
        ));
    }

    #[test]
    fn dense_rejects_wrong_params_len() {
        let dense = Dense::new((2, 1), None);
        let x = array![[1.0_f32, 2.0]];

        assert!(dense.forward(&[1.0, 2.0], x.view()).is_err());
    }
}
