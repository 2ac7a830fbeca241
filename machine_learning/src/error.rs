use std::{
    error::Error,
    fmt::{self, Display},
};

/// The result type used in the entire machine learning module.
pub type Result<T> = std::result::Result<T, MlErr>;

/// The machine learning module's error type.
#[derive(Debug)]
pub enum MlErr {
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    IncompatibleLayers {
        layer: usize,
        input: usize,
        prev_output: usize,
    },
    EmptyModel,
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MlErr::SizeMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "There's a size mismatch in the {what}, got {got} and expected {expected}"
            ),
            MlErr::IncompatibleLayers {
                layer,
                input,
                prev_output,
            } => write!(
                f,
                "Layer {layer} takes {input} inputs but the previous layer outputs {prev_output}"
            ),
            MlErr::EmptyModel => write!(f, "The model must have at least one layer"),
        }
    }
}

impl Error for MlErr {}
