// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! Functionality to represent the inflow conditions at the rotor.
//!
//! The rotor axis points in the x-direction, the z-axis points up, and the blade is along the
//! z-axis at zero azimuth. The inflow is reduced to one axial and one tangential velocity per
//! blade section, which is the input the blade element momentum solver works on.

pub mod height_variation;

use serde::{Serialize, Deserialize};

use rotormath::vec3::Vec3;

use crate::geometry::TurbineGeometry;

use height_variation::HeightVariationModel;

#[derive(Debug, Clone)]
/// The inflow velocities at each blade section for a single operating condition
pub struct RotorInflow {
    /// Velocity normal to the rotor plane at each section [m/s]
    pub axial_velocities: Vec<f64>,
    /// Velocity in the rotor plane at each section, as felt by the rotating blade [m/s]
    pub tangential_velocities: Vec<f64>,
    /// Height of each section above the ground [m]
    pub heights: Vec<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
/// Model that builds the sectional inflow velocities from a freestream wind speed and a rotor
/// speed. An optional height variation model can be used to let the axial velocity vary over
/// the rotor disc.
pub struct InflowModel {
    #[serde(default)]
    pub height_variation_model: Option<HeightVariationModel>,
}

impl InflowModel {
    /// Builds the inflow for a single operating condition.
    ///
    /// # Arguments
    /// * `geometry` - The rotor geometry, used for the section radii and the hub height.
    /// * `wind_speed` - Freestream wind speed [m/s].
    /// * `rotor_speed` - Rotor speed [rad/s].
    /// * `azimuth` - Azimuth angle of the blade [rad]. Zero means the blade points straight up.
    pub fn build(
        &self,
        geometry: &TurbineGeometry,
        wind_speed: f64,
        rotor_speed: f64,
        azimuth: f64,
    ) -> RotorInflow {
        let nr_sections = geometry.num_sections();

        let mut inflow = RotorInflow {
            axial_velocities: vec![0.0; nr_sections],
            tangential_velocities: vec![0.0; nr_sections],
            heights: vec![0.0; nr_sections],
        };

        for i in 0..nr_sections {
            let radius = geometry.radius(i);

            let section_position = Vec3::new(0.0, 0.0, radius)
                .rotate_around_axis(azimuth, Vec3::unit_x());

            let height = geometry.hub_height + section_position.z;

            let increase_factor = if let Some(model) = self.height_variation_model {
                if height > 0.0 {
                    model.velocity_increase_factor(height)
                } else {
                    0.0
                }
            } else {
                1.0
            };

            inflow.axial_velocities[i] = increase_factor * wind_speed;
            inflow.tangential_velocities[i] = rotor_speed * radius;
            inflow.heights[i] = height;
        }

        inflow
    }
}
