// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! Representation of the rotor geometry.
//!
//! Stores the blade planform and the sectional models only. The geometry is created once at
//! program start and borrowed by the solver and post-processor, which never mutate it.

use std::f64::consts::PI;

use serde::{Serialize, Deserialize};

use crate::error::Error;
use crate::section_models::SectionModel;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
/// A single radial blade section
pub struct BladeSection {
    /// Distance from the rotor centre to the section [m]
    pub radius: f64,
    /// Chord length of the section [m]
    pub chord: f64,
    /// Twist angle of the section, positive towards the rotor plane [rad]
    pub twist: f64,
    #[serde(default)]
    /// Chordwise offset of the aerodynamic centre from the section reference point [m]
    pub aero_centre_x: f64,
    #[serde(default)]
    /// Offset of the aerodynamic centre normal to the chord [m]
    pub aero_centre_y: f64,
    /// Two dimensional model for the aerodynamic coefficients of the section
    pub section_model: SectionModel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
/// The complete rotor geometry: an ordered set of blade sections plus the rotor level scalars.
///
/// Section index zero is the section closest to the hub, and the radii must be strictly
/// increasing towards the tip.
pub struct TurbineGeometry {
    pub sections: Vec<BladeSection>,
    /// Radius at the blade tip [m]
    pub rotor_radius: f64,
    /// Radius at the blade root [m]
    pub hub_radius: f64,
    pub num_blades: usize,
    #[serde(default)]
    /// Height of the rotor centre above the ground [m]. Only used when the inflow has a height
    /// variation model.
    pub hub_height: f64,
}

impl TurbineGeometry {
    /// Creates a new geometry and checks that it is usable for a simulation.
    pub fn new(
        sections: Vec<BladeSection>,
        rotor_radius: f64,
        hub_radius: f64,
        num_blades: usize,
        hub_height: f64,
    ) -> Result<Self, Error> {
        let geometry = Self {
            sections,
            rotor_radius,
            hub_radius,
            num_blades,
            hub_height,
        };

        geometry.validate()?;

        Ok(geometry)
    }

    pub fn from_json_string(json_string: &str) -> Result<Self, Error> {
        let geometry: Self = serde_json::from_str(json_string)?;

        geometry.validate()?;

        Ok(geometry)
    }

    pub fn from_json_file(file_path: &str) -> Result<Self, Error> {
        let json_string = std::fs::read_to_string(file_path)?;

        Self::from_json_string(&json_string)
    }

    pub fn to_json_string(&self) -> Result<String, Error> {
        let json_string = serde_json::to_string(self)?;

        Ok(json_string)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.sections.len() < 2 {
            return Err(Error::DomainError(
                format!("a rotor needs at least two blade sections, got {}", self.sections.len())
            ));
        }

        if self.num_blades < 1 {
            return Err(Error::DomainError("a rotor needs at least one blade".to_string()));
        }

        if self.hub_radius < 0.0 || self.rotor_radius <= self.hub_radius {
            return Err(Error::DomainError(
                format!(
                    "the rotor radius ({}) must be larger than the hub radius ({})",
                    self.rotor_radius, self.hub_radius
                )
            ));
        }

        for pair in self.sections.windows(2) {
            if pair[1].radius <= pair[0].radius {
                return Err(Error::DomainError(
                    "the section radii must be strictly increasing from hub to tip".to_string()
                ));
            }
        }

        for section in &self.sections {
            if section.radius < self.hub_radius || section.radius > self.rotor_radius {
                return Err(Error::DomainError(
                    format!(
                        "section radius {} is outside the rotor span [{}, {}]",
                        section.radius, self.hub_radius, self.rotor_radius
                    )
                ));
            }

            if section.chord <= 0.0 {
                return Err(Error::DomainError(
                    format!("section chord must be positive, got {}", section.chord)
                ));
            }

            section.section_model.validate()?;
        }

        Ok(())
    }

    /// Short hand for querying for the number of blade sections
    pub fn num_sections(&self) -> usize {
        self.sections.len()
    }

    pub fn radius(&self, index: usize) -> f64 {
        self.sections[index].radius
    }

    pub fn chord(&self, index: usize) -> f64 {
        self.sections[index].chord
    }

    pub fn twist(&self, index: usize) -> f64 {
        self.sections[index].twist
    }

    pub fn aero_centre_x(&self, index: usize) -> f64 {
        self.sections[index].aero_centre_x
    }

    pub fn aero_centre_y(&self, index: usize) -> f64 {
        self.sections[index].aero_centre_y
    }

    pub fn section_model(&self, index: usize) -> &SectionModel {
        &self.sections[index].section_model
    }

    /// The local solidity of the rotor annulus at the section
    pub fn solidity(&self, index: usize) -> f64 {
        let section = &self.sections[index];

        self.num_blades as f64 * section.chord / (2.0 * PI * section.radius)
    }

    /// The radial width each section integrates over. The element boundaries are placed halfway
    /// between neighbouring sections, so the first and last sections cover half elements towards
    /// the hub and the tip.
    pub fn section_widths(&self) -> Vec<f64> {
        let nr_sections = self.sections.len();

        let mut widths = vec![0.0; nr_sections];

        for i in 0..nr_sections {
            let inner = if i == 0 {
                self.sections[0].radius
            } else {
                0.5 * (self.sections[i - 1].radius + self.sections[i].radius)
            };

            let outer = if i == nr_sections - 1 {
                self.sections[nr_sections - 1].radius
            } else {
                0.5 * (self.sections[i].radius + self.sections[i + 1].radius)
            };

            widths[i] = outer - inner;
        }

        widths
    }

    /// The swept area of the rotor annulus, used for the non-dimensional rotor coefficients
    pub fn swept_area(&self) -> f64 {
        PI * (self.rotor_radius.powi(2) - self.hub_radius.powi(2))
    }
}
