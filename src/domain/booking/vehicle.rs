//! Vehicle description value object.
//!
//! Locally a booking keeps make, model and color in separate columns. The
//! CRM stores a single `vehicle_details` string of the form
//! `"{make} {model} ({color})"`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Composite form: shortest make, shortest model, color in parentheses.
static COMPOSITE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+?)\s+(.+?)\s*\((.+?)\)$").expect("vehicle pattern is valid")
});

/// Make, model and color of the vehicle to be serviced.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VehicleDescription {
    pub make: String,
    pub model: String,
    pub color: String,
}

impl VehicleDescription {
    pub fn new(
        make: impl Into<String>,
        model: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            make: make.into(),
            model: model.into(),
            color: color.into(),
        }
    }

    /// Renders the CRM `vehicle_details` string.
    pub fn compose(&self) -> String {
        format!("{} {} ({})", self.make, self.model, self.color)
    }

    /// Splits a CRM `vehicle_details` string back into its parts.
    ///
    /// Strings that do not end in a parenthesised color fall back to a plain
    /// whitespace split: the first token is the make, the rest is the model,
    /// and the color is empty. Multi-word makes are not recognised, so
    /// `"Land Rover Defender (Green)"` yields make `"Land"`.
    pub fn parse(details: &str) -> Self {
        if let Some(caps) = COMPOSITE.captures(details) {
            return Self::new(&caps[1], &caps[2], &caps[3]);
        }

        let mut parts = details.split(' ');
        let make = parts.next().unwrap_or_default();
        let model = parts.collect::<Vec<_>>().join(" ");
        Self::new(make, model, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_year_make_model_and_color() {
        let v = VehicleDescription::parse("2022 Toyota Camry (Silver)");
        assert_eq!(v.make, "2022");
        assert_eq!(v.model, "Toyota Camry");
        assert_eq!(v.color, "Silver");
    }

    #[test]
    fn parses_composed_string_back_into_parts() {
        let original = VehicleDescription::new("Toyota", "Tacoma", "White");
        assert_eq!(original.compose(), "Toyota Tacoma (White)");
        assert_eq!(VehicleDescription::parse(&original.compose()), original);
    }

    #[test]
    fn multi_word_make_is_split_at_first_space() {
        let v = VehicleDescription::parse("Land Rover Defender (Green)");
        assert_eq!(v.make, "Land");
        assert_eq!(v.model, "Rover Defender");
        assert_eq!(v.color, "Green");
    }

    #[test]
    fn missing_color_falls_back_to_whitespace_split() {
        let v = VehicleDescription::parse("Honda Civic Hatchback");
        assert_eq!(v.make, "Honda");
        assert_eq!(v.model, "Civic Hatchback");
        assert_eq!(v.color, "");
    }

    #[test]
    fn single_word_has_empty_model() {
        let v = VehicleDescription::parse("Jeep");
        assert_eq!(v, VehicleDescription::new("Jeep", "", ""));
    }

    #[test]
    fn empty_details_yield_empty_description() {
        assert_eq!(VehicleDescription::parse(""), VehicleDescription::default());
    }
}
