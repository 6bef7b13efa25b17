// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! Physical properties of the working fluid.

use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
/// Properties of the fluid the rotor operates in. The defaults correspond to air at standard
/// atmospheric conditions.
pub struct FluidProperties {
    #[serde(default="FluidProperties::default_density")]
    /// Density used in force calculations [kg/m^3]
    pub density: f64,
    #[serde(default="FluidProperties::default_kinematic_viscosity")]
    /// Kinematic viscosity, used for the sectional Reynolds numbers [m^2/s]
    pub kinematic_viscosity: f64,
    #[serde(default="FluidProperties::default_speed_of_sound")]
    /// Speed of sound, used for the sectional Mach numbers [m/s]
    pub speed_of_sound: f64,
}

impl FluidProperties {
    pub fn default_density() -> f64 {1.225}
    pub fn default_kinematic_viscosity() -> f64 {1.46e-5}
    pub fn default_speed_of_sound() -> f64 {340.0}
}

impl Default for FluidProperties {
    fn default() -> Self {
        Self {
            density: Self::default_density(),
            kinematic_viscosity: Self::default_kinematic_viscosity(),
            speed_of_sound: Self::default_speed_of_sound(),
        }
    }
}
