pub mod arch;
pub mod error;

pub use error::{MlErr, Result};
