// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! Models of the two dimensional aerodynamic coefficients of blade sections.

/// Section model based on a tabulated polar
pub mod polar;
/// Parametric section model of a foil profile
pub mod parametric_foil;

use serde::{Serialize, Deserialize};

use crate::error::Error;

use polar::PolarTable;
use parametric_foil::ParametricFoil;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
/// The aerodynamic coefficients of a blade section at a single angle of attack
pub struct SectionCoefficients {
    pub lift: f64,
    pub drag: f64,
    pub moment: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Sectional model for the aerodynamic coefficients, that can be of multiple variants
pub enum SectionModel {
    Table(PolarTable),
    Parametric(ParametricFoil),
}

impl SectionModel {
    /// Returns the lift, drag and moment coefficients at the given angle of attack.
    ///
    /// # Arguments
    /// * `angle_of_attack` - Angle of attack in radians.
    pub fn coefficients(&self, angle_of_attack: f64) -> SectionCoefficients {
        match self {
            SectionModel::Table(table) => table.coefficients(angle_of_attack),
            SectionModel::Parametric(foil) => foil.coefficients(angle_of_attack),
        }
    }

    /// Checks that the model is in a usable state. Only the tabulated variant has requirements
    /// on its data.
    pub fn validate(&self) -> Result<(), Error> {
        match self {
            SectionModel::Table(table) => table.validate(),
            SectionModel::Parametric(_) => Ok(()),
        }
    }
}
