use serde::{Deserialize, Serialize};

use crate::{
    error::{PredictorError, Result},
    features::Schema,
};

/// The bounds, default and step of one form input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRange {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
}

impl FieldRange {
    const fn new(name: &'static str, min: f64, max: f64, default: f64, step: f64) -> Self {
        Self {
            name,
            min,
            max,
            default,
            step,
        }
    }

    /// Checks the value is one the form's slider can produce.
    ///
    /// # Errors
    /// Returns `InvalidInput` for values outside `[min, max]`, NaN included, and for values off
    /// the step grid starting at `min`.
    pub fn check(&self, value: f64) -> Result<f64> {
        if (self.min..=self.max).contains(&value) && self.on_step(value) {
            return Ok(value);
        }

        Err(PredictorError::InvalidInput {
            field: self.name,
            value,
            min: self.min,
            max: self.max,
            step: self.step,
        })
    }

    fn on_step(&self, value: f64) -> bool {
        let steps = (value - self.min) / self.step;
        (steps - steps.round()).abs() <= STEP_TOLERANCE * steps.abs().max(1.0)
    }
}

/// Relative slack for decimal steps such as 0.01, which have no exact binary form.
const STEP_TOLERANCE: f64 = 1e-6;

pub const CENSUS_RANGES: [FieldRange; 8] = [
    FieldRange::new("MedInc", 0.5, 15.0, 3.0, 0.1),
    FieldRange::new("HouseAge", 1.0, 50.0, 20.0, 1.0),
    FieldRange::new("AveRooms", 1.0, 10.0, 5.0, 0.01),
    FieldRange::new("AveBedrms", 0.5, 3.0, 1.0, 0.01),
    FieldRange::new("Population", 1.0, 5000.0, 1000.0, 1.0),
    FieldRange::new("AveOccup", 0.5, 10.0, 3.0, 0.01),
    FieldRange::new("Latitude", 32.0, 42.0, 37.0, 0.01),
    FieldRange::new("Longitude", -125.0, -112.0, -122.0, 0.01),
];

pub const LISTING_RANGES: [FieldRange; 4] = [
    FieldRange::new("area", 500.0, 20000.0, 3000.0, 10.0),
    FieldRange::new("bedrooms", 1.0, 6.0, 3.0, 1.0),
    FieldRange::new("bathrooms", 1.0, 4.0, 2.0, 1.0),
    FieldRange::new("stories", 1.0, 4.0, 2.0, 1.0),
];

/// Census block inputs. Omitted fields take the form's default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase", deny_unknown_fields)]
pub struct CensusInputs {
    pub med_inc: f64,
    pub house_age: f64,
    pub ave_rooms: f64,
    pub ave_bedrms: f64,
    pub population: f64,
    pub ave_occup: f64,
    pub latitude: f64,
    pub longitude: f64,
}

impl CensusInputs {
    fn fields(&self) -> [f64; 8] {
        [
            self.med_inc,
            self.house_age,
            self.ave_rooms,
            self.ave_bedrms,
            self.population,
            self.ave_occup,
            self.latitude,
            self.longitude,
        ]
    }
}

impl Default for CensusInputs {
    fn default() -> Self {
        let [med_inc, house_age, ave_rooms, ave_bedrms, population, ave_occup, latitude, longitude] =
            CENSUS_RANGES.map(|r| r.default);

        Self {
            med_inc,
            house_age,
            ave_rooms,
            ave_bedrms,
            population,
            ave_occup,
            latitude,
            longitude,
        }
    }
}

/// Listing inputs. Omitted fields take the form's default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListingInputs {
    pub area: f64,
    pub bedrooms: f64,
    pub bathrooms: f64,
    pub stories: f64,
}

impl ListingInputs {
    fn fields(&self) -> [f64; 4] {
        [self.area, self.bedrooms, self.bathrooms, self.stories]
    }
}

impl Default for ListingInputs {
    fn default() -> Self {
        let [area, bedrooms, bathrooms, stories] = LISTING_RANGES.map(|r| r.default);

        Self {
            area,
            bedrooms,
            bathrooms,
            stories,
        }
    }
}

/// The raw values a user supplies for one estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseInputs {
    California(CensusInputs),
    Listing(ListingInputs),
}

impl HouseInputs {
    /// Returns the form defaults for the given schema.
    pub fn defaults(schema: Schema) -> Self {
        match schema {
            Schema::California => Self::California(CensusInputs::default()),
            Schema::Listing => Self::Listing(ListingInputs::default()),
        }
    }

    pub fn schema(&self) -> Schema {
        match self {
            Self::California(_) => Schema::California,
            Self::Listing(_) => Schema::Listing,
        }
    }

    /// Checks every field against the form's ranges.
    ///
    /// # Errors
    /// Returns `InvalidInput` for the first field out of range.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::California(c) => check_all(&CENSUS_RANGES, &c.fields()),
            Self::Listing(l) => check_all(&LISTING_RANGES, &l.fields()),
        }
    }
}

fn check_all(ranges: &[FieldRange], values: &[f64]) -> Result<()> {
    ranges
        .iter()
        .zip(values)
        .try_for_each(|(range, &value)| range.check(value).map(|_| ()))
}
