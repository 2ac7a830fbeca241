use serde::{Deserialize, Serialize};

use crate::features::Schema;

/// Census models are trained on prices in units of 100,000 dollars.
pub const CENSUS_LABEL_SCALE: f64 = 100_000.0;

/// The application variants. They share the prediction flow and only differ in the schema
/// their model was trained on and the scale of its labels.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    #[default]
    CaliforniaSidebar,
    CaliforniaColumns,
    CaliforniaStyled,
    Listing,
}

impl Variant {
    pub fn schema(self) -> Schema {
        match self {
            Variant::CaliforniaSidebar | Variant::CaliforniaColumns | Variant::CaliforniaStyled => {
                Schema::California
            }
            Variant::Listing => Schema::Listing,
        }
    }

    /// The factor the raw model output is multiplied by before displaying it.
    pub fn label_scale(self) -> f64 {
        match self.schema() {
            Schema::California => CENSUS_LABEL_SCALE,
            Schema::Listing => 1.0,
        }
    }

    pub fn headline(self) -> &'static str {
        match self.schema() {
            Schema::California => "Predicted Median House Value",
            Schema::Listing => "Predicted Price",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn census_variants_share_schema_and_scale() {
        for variant in [
            Variant::CaliforniaSidebar,
            Variant::CaliforniaColumns,
            Variant::CaliforniaStyled,
        ] {
            assert_eq!(variant.schema(), Schema::California);
            assert_eq!(variant.label_scale(), 100_000.0);
        }
    }

    #[test]
    fn listing_is_unscaled() {
        assert_eq!(Variant::Listing.schema(), Schema::Listing);
        assert_eq!(Variant::Listing.label_scale(), 1.0);
    }

    #[test]
    fn variant_names_are_snake_case() {
        let v: Variant = serde_json::from_str(r#""california_columns""#).unwrap();
        assert_eq!(v, Variant::CaliforniaColumns);
    }
}
