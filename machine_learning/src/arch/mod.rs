pub mod activations;
pub mod layers;
mod model;
mod regressor;
mod sequential;

pub use model::Model;
pub use regressor::Regressor;
pub use sequential::Sequential;
