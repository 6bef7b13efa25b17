// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
/// Models for how the wind speed varies with the height above the ground
pub enum HeightVariationModel {
    PowerModel(PowerModel),
    LogarithmicModel(LogarithmicModel),
}

impl Default for HeightVariationModel {
    fn default() -> Self {
        Self::PowerModel(PowerModel::default())
    }
}

impl HeightVariationModel {
    pub fn velocity_increase_factor(&self, height: f64) -> f64 {
        match self {
            HeightVariationModel::PowerModel(model) =>
                model.velocity_increase_factor(height),
            HeightVariationModel::LogarithmicModel(model) =>
                model.velocity_increase_factor(height),
        }
    }

    pub fn from_json_string(json_string: &str) -> Result<Self, Error> {
        let model = serde_json::from_str(json_string)?;

        Ok(model)
    }

    pub fn from_json_file(file_path: &str) -> Result<Self, Error> {
        let json_string = std::fs::read_to_string(file_path)?;

        Self::from_json_string(&json_string)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PowerModel {
    #[serde(default="PowerModel::default_reference_height")]
    pub reference_height: f64,
    #[serde(default="PowerModel::default_power_factor")]
    pub power_factor: f64,
}

impl PowerModel {
    pub fn default_reference_height() -> f64 {10.0}
    pub fn default_power_factor() -> f64 {1.0/9.0}

    pub fn velocity_increase_factor(&self, height: f64) -> f64 {
        if self.power_factor > 0.0 {
            (height / self.reference_height).powf(self.power_factor)
        } else {
            1.0
        }
    }
}

impl Default for PowerModel {
    fn default() -> Self {
        Self {
            reference_height: Self::default_reference_height(),
            power_factor: Self::default_power_factor(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LogarithmicModel {
    #[serde(default="LogarithmicModel::default_reference_height")]
    pub reference_height: f64,
    #[serde(default="LogarithmicModel::surface_roughness")]
    pub surface_roughness: f64,
}

impl LogarithmicModel {
    pub fn default_reference_height() -> f64 {10.0}
    pub fn surface_roughness() -> f64 {0.0002}

    pub fn velocity_increase_factor(&self, height: f64) -> f64 {
        if self.surface_roughness > 0.0 {
            (height / self.surface_roughness).ln() /
            (self.reference_height / self.surface_roughness).ln()
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factor_is_one_at_the_reference_height() {
        let power_model = PowerModel::default();
        let logarithmic_model = LogarithmicModel {
            reference_height: LogarithmicModel::default_reference_height(),
            surface_roughness: LogarithmicModel::surface_roughness(),
        };

        assert!((power_model.velocity_increase_factor(10.0) - 1.0).abs() < 1e-12);
        assert!((logarithmic_model.velocity_increase_factor(10.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn wind_speed_increases_with_height() {
        let model = HeightVariationModel::default();

        let low = model.velocity_increase_factor(10.0);
        let high = model.velocity_increase_factor(90.0);

        dbg!(low, high);

        assert!(high > low);
    }
}
