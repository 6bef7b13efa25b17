// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

use serde::{Serialize, Deserialize};

use rotormath::interpolation::{linear_interpolation, is_strictly_increasing};

use crate::error::Error;
use super::SectionCoefficients;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
/// A single row of a tabulated polar
pub struct PolarPoint {
    /// Angle of attack in radians
    pub angle_of_attack: f64,
    pub lift: f64,
    pub drag: f64,
    #[serde(default)]
    pub moment: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
/// Data based section model, where the lift, drag and moment coefficients are tabulated as
/// functions of the angle of attack.
///
/// The table is stored as separate coefficient vectors, sorted by the angle of attack, so that
/// a lookup is a binary search followed by linear interpolation. Angles of attack outside the
/// tabulated range are clamped to the end points rather than extrapolated.
pub struct PolarTable {
    /// Angles of attack in radians, sorted in increasing order
    pub angles_of_attack: Vec<f64>,
    pub lift: Vec<f64>,
    pub drag: Vec<f64>,
    pub moment: Vec<f64>,
}

impl PolarTable {
    /// Creates a new polar table from a set of polar points. The points are sorted by angle of
    /// attack before the table is built, so the input does not have to be ordered.
    pub fn new(mut points: Vec<PolarPoint>) -> Result<Self, Error> {
        points.sort_by(|a, b| a.angle_of_attack.total_cmp(&b.angle_of_attack));

        let table = Self {
            angles_of_attack: points.iter().map(|point| point.angle_of_attack).collect(),
            lift: points.iter().map(|point| point.lift).collect(),
            drag: points.iter().map(|point| point.drag).collect(),
            moment: points.iter().map(|point| point.moment).collect(),
        };

        table.validate()?;

        Ok(table)
    }

    pub fn new_from_string(string: &str) -> Result<Self, Error> {
        let table: Self = serde_json::from_str(string)?;

        table.validate()?;

        Ok(table)
    }

    pub fn to_string(&self) -> Result<String, Error> {
        let string = serde_json::to_string(self)?;

        Ok(string)
    }

    /// Checks that the table has enough data for interpolation and that the angles of attack are
    /// strictly increasing.
    pub fn validate(&self) -> Result<(), Error> {
        if self.angles_of_attack.len() < 2 {
            return Err(Error::DomainError(
                format!("a polar table needs at least two points, got {}", self.angles_of_attack.len())
            ));
        }

        if self.lift.len() != self.angles_of_attack.len() ||
           self.drag.len() != self.angles_of_attack.len() ||
           self.moment.len() != self.angles_of_attack.len()
        {
            return Err(Error::DomainError(
                "the coefficient vectors of a polar table must have the same length".to_string()
            ));
        }

        if !is_strictly_increasing(&self.angles_of_attack) {
            return Err(Error::DomainError(
                "the angles of attack of a polar table must be strictly increasing".to_string()
            ));
        }

        Ok(())
    }

    /// Returns interpolated coefficients at the given angle of attack.
    ///
    /// # Arguments
    /// * `angle_of_attack` - Angle of attack in radians.
    pub fn coefficients(&self, angle_of_attack: f64) -> SectionCoefficients {
        SectionCoefficients {
            lift: linear_interpolation(angle_of_attack, &self.angles_of_attack, &self.lift),
            drag: linear_interpolation(angle_of_attack, &self.angles_of_attack, &self.drag),
            moment: linear_interpolation(angle_of_attack, &self.angles_of_attack, &self.moment),
        }
    }
}
