use std::fmt;

use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::inputs::{CensusInputs, HouseInputs, ListingInputs};

/// Added to the occupancy before dividing so the ratio never divides by zero.
pub const ROOMS_EPSILON: f64 = 1e-6;

const CALIFORNIA_FEATURES: [&str; 9] = [
    "MedInc",
    "HouseAge",
    "AveRooms",
    "AveBedrms",
    "Population",
    "AveOccup",
    "Latitude",
    "Longitude",
    "rooms_per_household",
];

const LISTING_FEATURES: [&str; 4] = ["area", "bedrooms", "bathrooms", "stories"];

/// The feature layout a model was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Schema {
    /// California census block features plus the derived rooms per household ratio.
    California,
    /// Listing features: area, bedrooms, bathrooms and stories.
    Listing,
}

impl Schema {
    pub fn name(self) -> &'static str {
        match self {
            Schema::California => "california",
            Schema::Listing => "listing",
        }
    }

    /// Parses a schema from the name stored in model artifacts.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "california" => Some(Schema::California),
            "listing" => Some(Schema::Listing),
            _ => None,
        }
    }

    /// Returns the feature names in training order.
    pub fn feature_names(self) -> &'static [&'static str] {
        match self {
            Schema::California => &CALIFORNIA_FEATURES,
            Schema::Listing => &LISTING_FEATURES,
        }
    }

    pub fn num_features(self) -> usize {
        self.feature_names().len()
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single row of model input, ordered as its schema dictates.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    schema: Schema,
    values: Vec<f32>,
}

impl FeatureVector {
    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn names(&self) -> &'static [&'static str] {
        self.schema.feature_names()
    }

    /// Looks a feature up by its name.
    pub fn get(&self, name: &str) -> Option<f32> {
        let idx = self.names().iter().position(|n| *n == name)?;
        self.values.get(idx).copied()
    }

    /// Iterates over `(name, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f32)> + '_ {
        self.names().iter().copied().zip(self.values.iter().copied())
    }

    /// Returns the vector as a `1 x n` matrix, the shape models take.
    pub fn to_row(&self) -> Array2<f32> {
        Array1::from(self.values.clone()).insert_axis(Axis(0))
    }
}

/// Computes the derived rooms per household ratio.
pub fn rooms_per_household(ave_rooms: f64, ave_occup: f64) -> f64 {
    ave_rooms / (ave_occup + ROOMS_EPSILON)
}

/// Maps the raw inputs into the feature vector of their schema.
pub fn assemble(inputs: &HouseInputs) -> FeatureVector {
    match inputs {
        HouseInputs::California(census) => assemble_census(census),
        HouseInputs::Listing(listing) => assemble_listing(listing),
    }
}

fn assemble_census(c: &CensusInputs) -> FeatureVector {
    let values = [
        c.med_inc,
        c.house_age,
        c.ave_rooms,
        c.ave_bedrms,
        c.population,
        c.ave_occup,
        c.latitude,
        c.longitude,
        rooms_per_household(c.ave_rooms, c.ave_occup),
    ];

    FeatureVector {
        schema: Schema::California,
        values: values.iter().map(|&v| v as f32).collect(),
    }
}

fn assemble_listing(l: &ListingInputs) -> FeatureVector {
    let values = [l.area, l.bedrooms, l.bathrooms, l.stories];

    FeatureVector {
        schema: Schema::Listing,
        values: values.iter().map(|&v| v as f32).collect(),
    }
}
