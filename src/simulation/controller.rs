// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! A steady-state model of a variable-speed, variable-pitch controller.
//!
//! Below rated wind speed the controller tracks the optimal tip speed ratio, limited by the
//! rotor speed range, and keeps the pitch at zero. Above rated it holds the rotor speed and
//! pitches the blades until the aerodynamic power matches the rated power. The region boundary
//! is detected by evaluating the aerodynamic power at zero pitch.

use rotormath::special_functions::clip;
use rotormath::solvers::{secant_solver, SolverSettings};

use super::SimulationConfig;

/// Upper limit of the pitch search interval [rad]
pub const MAX_PITCH: f64 = 30.0 * std::f64::consts::PI / 180.0;

#[derive(Debug, Clone, Copy, PartialEq)]
/// The rotor speed and collective pitch the controller selects for a wind speed
pub struct ControllerSetPoint {
    /// Rotor speed [rad/s]
    pub rotor_speed: f64,
    /// Collective pitch [rad]
    pub pitch: f64,
}

#[derive(Debug, Clone, Copy)]
/// Controller model for a single turbine
pub struct RotorController<'a> {
    pub config: &'a SimulationConfig,
    /// Radius at the blade tip [m]
    pub rotor_radius: f64,
}

impl<'a> RotorController<'a> {
    /// The rotor speed the controller selects below rated wind speed: the speed that tracks the
    /// optimal tip speed ratio, clipped to the rotor speed range.
    pub fn below_rated_rotor_speed(&self, wind_speed: f64) -> f64 {
        let tracking_speed =
            self.config.optimal_tip_speed_ratio * wind_speed / self.rotor_radius;

        clip(
            tracking_speed,
            self.config.min_rotor_speed(),
            self.config.rated_rotor_speed()
        ).min(self.config.max_rotor_speed())
    }

    /// Selects a set point for the given wind speed.
    ///
    /// # Arguments
    /// * `wind_speed` - Freestream wind speed [m/s].
    /// * `aero_power` - Function that returns the aerodynamic power for a pitch angle [rad] and
    ///   a rotor speed [rad/s]. The controller is agnostic to how the power is evaluated, which
    ///   in practice means a full solve of the blade element momentum equations.
    pub fn set_point(
        &self,
        wind_speed: f64,
        aero_power: impl Fn(f64, f64) -> f64,
    ) -> ControllerSetPoint {
        let rotor_speed = self.below_rated_rotor_speed(wind_speed);

        let power_at_zero_pitch = aero_power(0.0, rotor_speed);

        if power_at_zero_pitch <= self.config.rated_power {
            return ControllerSetPoint {
                rotor_speed,
                pitch: 0.0,
            };
        }

        // Above rated: hold the rated rotor speed and pitch the blades until the power matches
        // the rated power
        let rotor_speed = self.config.rated_rotor_speed();

        let power_error = |pitch: f64| {
            aero_power(clip(pitch, 0.0, MAX_PITCH), rotor_speed) - self.config.rated_power
        };

        // The assumed power gradient scales the first secant step
        let first_step = clip(
            (power_at_zero_pitch - self.config.rated_power) / self.config.max_power_gradient,
            1.0_f64.to_radians(),
            MAX_PITCH
        );

        let settings = SolverSettings {
            tolerance: 1e-4 * self.config.rated_power,
            max_iterations: 50,
        };

        let pitch = secant_solver(power_error, 0.0, first_step, &settings);

        ControllerSetPoint {
            rotor_speed,
            pitch: clip(pitch, 0.0, MAX_PITCH),
        }
    }
}
