// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

use std::f64::consts::PI;

use rotormath::array_generation::linspace;

use crate::geometry::{BladeSection, TurbineGeometry};
use crate::section_models::SectionModel;
use crate::section_models::parametric_foil::ParametricFoil;
use crate::section_models::polar::{PolarPoint, PolarTable};
use crate::simulation::SimulationConfig;
use crate::bem::OperatingCondition;

#[derive(Debug, Clone)]
/// Builder for an idealised multi-megawatt rotor, used as a shared test case.
///
/// The chord and twist distributions follow the Schmitz optimum for the design tip speed ratio,
/// with the chord capped towards the root the way a manufacturable blade would be. The size and
/// speed limits are representative of a three bladed 5 MW turbine.
pub struct OptimalRotor {
    pub rotor_radius: f64,
    pub hub_radius: f64,
    pub num_blades: usize,
    pub nr_sections: usize,
    pub design_tip_speed_ratio: f64,
    pub design_lift_coefficient: f64,
    pub max_chord: f64,
    pub zero_angle_drag_coefficient: f64,
}

impl Default for OptimalRotor {
    fn default() -> Self {
        Self {
            rotor_radius: 63.0,
            hub_radius: 1.5,
            num_blades: 3,
            nr_sections: 17,
            design_tip_speed_ratio: 7.0,
            design_lift_coefficient: 1.0,
            max_chord: 4.5,
            zero_angle_drag_coefficient: 0.006,
        }
    }
}

impl OptimalRotor {
    fn foil(&self) -> ParametricFoil {
        ParametricFoil {
            cl_zero_angle: 0.4,
            cd_zero_angle: self.zero_angle_drag_coefficient,
            cd_second_order_factor: 0.1,
            ..Default::default()
        }
    }

    /// The angle of attack where the foil produces the design lift coefficient
    pub fn design_angle_of_attack(&self) -> f64 {
        let foil = self.foil();

        (self.design_lift_coefficient - foil.cl_zero_angle) / foil.cl_initial_slope
    }

    pub fn build(&self) -> TurbineGeometry {
        let inner_radius = self.hub_radius + 0.02 * self.rotor_radius;
        let outer_radius = 0.978 * self.rotor_radius;

        let radii = linspace(inner_radius, outer_radius, self.nr_sections);

        let design_angle_of_attack = self.design_angle_of_attack();

        let sections = radii.iter().map(|&radius| {
            // Schmitz optimal inflow angle and chord for the design tip speed ratio
            let geometric_inflow_angle =
                (self.rotor_radius / (self.design_tip_speed_ratio * radius)).atan();

            let design_inflow_angle = 2.0 / 3.0 * geometric_inflow_angle;

            let chord =
                16.0 * PI * radius * (geometric_inflow_angle / 3.0).sin().powi(2) /
                (self.num_blades as f64 * self.design_lift_coefficient);

            BladeSection {
                radius,
                chord: chord.min(self.max_chord),
                twist: design_inflow_angle - design_angle_of_attack,
                aero_centre_x: 0.0,
                aero_centre_y: 0.0,
                section_model: SectionModel::Parametric(self.foil()),
            }
        }).collect();

        TurbineGeometry::new(
            sections,
            self.rotor_radius,
            self.hub_radius,
            self.num_blades,
            90.0,
        ).unwrap()
    }

    /// Same rotor, but with a zero lift, zero drag polar table on one section. Used to exercise
    /// the failure handling of the solver without touching the other sections.
    pub fn build_with_dead_section(&self, dead_index: usize) -> TurbineGeometry {
        let mut geometry = self.build();

        let dead_polar = PolarTable::new(vec![
            PolarPoint {angle_of_attack: -PI, lift: 0.0, drag: 0.0, moment: 0.0},
            PolarPoint {angle_of_attack:  PI, lift: 0.0, drag: 0.0, moment: 0.0},
        ]).unwrap();

        geometry.sections[dead_index].section_model = SectionModel::Table(dead_polar);

        geometry
    }

    /// The operating condition at the design tip speed ratio for the input wind speed
    pub fn design_condition(&self, wind_speed: f64) -> OperatingCondition {
        OperatingCondition {
            wind_speed,
            rotor_speed: self.design_tip_speed_ratio * wind_speed / self.rotor_radius,
            pitch: 0.0,
            azimuth: 0.0,
        }
    }

    /// A simulation configuration matching the rotor: rated at 5 MW with the rotor speed limits
    /// of a typical turbine of this size.
    pub fn config(&self) -> SimulationConfig {
        SimulationConfig {
            fluid: Default::default(),
            convergence_tolerance: SimulationConfig::default_convergence_tolerance(),
            max_iterations: SimulationConfig::default_max_iterations(),
            wake_transition: 0.4,
            tip_avoidance: SimulationConfig::default_tip_avoidance(),
            rated_power: 5.0e6,
            rated_rotor_speed_rpm: 12.1,
            min_rotor_speed_rpm: 6.9,
            max_rotor_speed_rpm: 12.1,
            optimal_tip_speed_ratio: self.design_tip_speed_ratio,
            max_power_gradient: SimulationConfig::default_max_power_gradient(),
            power_mode: Default::default(),
            wind_speed_start: 5.0,
            wind_speed_end: 15.0,
            wind_speed_step: 2.0,
            weibull_shape: 2.0,
            mean_wind_speeds: vec![8.0, 10.0],
            price_per_kwh: 0.05,
        }
    }
}
