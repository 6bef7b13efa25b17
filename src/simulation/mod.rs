// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! The operating point driver: configuration, controller model, wind speed sweep and annual
//! energy integration.

pub mod controller;
pub mod power_curve;
pub mod energy;


use serde::{Serialize, Deserialize};

use crate::error::Error;
use crate::fluid::FluidProperties;
use crate::induction::EmpiricalWake;
use crate::bem::rpm_to_rad_per_sec;

use energy::WeibullDistribution;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
/// How the electrical power of an operating point is derived from the aerodynamic power
pub enum PowerMode {
    /// The electrical power equals the aerodynamic power
    Aerodynamic,
    #[default]
    /// The electrical power is the aerodynamic power clamped at the rated power
    RatedLimited,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
/// Configuration of a power curve simulation: fluid properties, solver numerics, the controller
/// limits and the wind climate used for the annual energy integration.
pub struct SimulationConfig {
    #[serde(default)]
    pub fluid: FluidProperties,
    #[serde(default="SimulationConfig::default_convergence_tolerance")]
    /// Residual tolerance for a blade section to count as converged
    pub convergence_tolerance: f64,
    #[serde(default="SimulationConfig::default_max_iterations")]
    /// Iteration budget for the root finder
    pub max_iterations: usize,
    #[serde(default="EmpiricalWake::default_wake_transition")]
    /// Axial induction where the wake model switches to its empirical high-thrust relation.
    /// 0.3539 matches the value used by Bladed.
    pub wake_transition: f64,
    #[serde(default="SimulationConfig::default_tip_avoidance")]
    /// Extra distance between the outermost section and the tip in the loss models [m]
    pub tip_avoidance: f64,

    /// Rated electrical power of the turbine [W]
    pub rated_power: f64,
    /// Rotor speed at and above rated wind speed [rpm]
    pub rated_rotor_speed_rpm: f64,
    /// Lower rotor speed limit [rpm]
    pub min_rotor_speed_rpm: f64,
    /// Upper rotor speed limit [rpm]
    pub max_rotor_speed_rpm: f64,
    /// Tip speed ratio the controller tracks below rated wind speed
    pub optimal_tip_speed_ratio: f64,
    #[serde(default="SimulationConfig::default_max_power_gradient")]
    /// Magnitude of the power gradient with respect to pitch that is assumed when scaling the
    /// first step of the above-rated pitch search [W/rad]
    pub max_power_gradient: f64,
    #[serde(default)]
    pub power_mode: PowerMode,

    /// First wind speed of the sweep [m/s]
    pub wind_speed_start: f64,
    /// Last wind speed of the sweep [m/s]
    pub wind_speed_end: f64,
    #[serde(default="SimulationConfig::default_wind_speed_step")]
    /// Step between the wind speeds of the sweep [m/s]
    pub wind_speed_step: f64,

    #[serde(default="WeibullDistribution::default_shape")]
    /// Shape parameter of the Weibull wind distribution
    pub weibull_shape: f64,
    #[serde(default)]
    /// Mean wind speeds to compute annual energy estimates for [m/s]
    pub mean_wind_speeds: Vec<f64>,
    #[serde(default)]
    /// Price used for the revenue estimate [currency/kWh]
    pub price_per_kwh: f64,
}

impl SimulationConfig {
    pub fn default_convergence_tolerance() -> f64 {1e-6}
    pub fn default_max_iterations() -> usize {400}
    pub fn default_tip_avoidance() -> f64 {0.001}
    pub fn default_max_power_gradient() -> f64 {2.0e7}
    pub fn default_wind_speed_step() -> f64 {1.0}

    pub fn from_json_string(json_string: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(json_string)?;

        config.validate()?;

        Ok(config)
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
        if self.fluid.density <= 0.0 {
            return Err(Error::DomainError(
                format!("the density must be positive, got {}", self.fluid.density)
            ));
        }

        if self.convergence_tolerance <= 0.0 {
            return Err(Error::DomainError(
                "the convergence tolerance must be positive".to_string()
            ));
        }

        if self.wake_transition <= 0.0 || self.wake_transition >= 1.0 {
            return Err(Error::DomainError(
                format!("the wake transition must be within (0, 1), got {}", self.wake_transition)
            ));
        }

        if self.rated_power <= 0.0 {
            return Err(Error::DomainError("the rated power must be positive".to_string()));
        }

        if self.min_rotor_speed_rpm > self.rated_rotor_speed_rpm ||
           self.rated_rotor_speed_rpm > self.max_rotor_speed_rpm
        {
            return Err(Error::DomainError(
                "the rotor speed limits must satisfy min <= rated <= max".to_string()
            ));
        }

        if self.optimal_tip_speed_ratio <= 0.0 {
            return Err(Error::DomainError(
                "the optimal tip speed ratio must be positive".to_string()
            ));
        }

        if self.wind_speed_step <= 0.0 || self.wind_speed_end < self.wind_speed_start {
            return Err(Error::DomainError(
                "the wind speed sweep must have a positive step and end after it starts".to_string()
            ));
        }

        if self.weibull_shape <= 0.0 {
            return Err(Error::DomainError(
                "the Weibull shape parameter must be positive".to_string()
            ));
        }

        Ok(())
    }

    /// Rotor speed at rated conditions [rad/s]
    pub fn rated_rotor_speed(&self) -> f64 {
        rpm_to_rad_per_sec(self.rated_rotor_speed_rpm)
    }

    /// Lower rotor speed limit [rad/s]
    pub fn min_rotor_speed(&self) -> f64 {
        rpm_to_rad_per_sec(self.min_rotor_speed_rpm)
    }

    /// Upper rotor speed limit [rad/s]
    pub fn max_rotor_speed(&self) -> f64 {
        rpm_to_rad_per_sec(self.max_rotor_speed_rpm)
    }

    /// Settings for the root finder in the blade element momentum solver
    pub fn solver_settings(&self) -> rotormath::solvers::SolverSettings {
        rotormath::solvers::SolverSettings {
            tolerance: self.convergence_tolerance,
            max_iterations: self.max_iterations,
        }
    }
}
