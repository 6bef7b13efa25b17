// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! Assembly of a power curve by sweeping wind speeds.
//!
//! Each wind speed is an independent operating point with its own solver, inflow and
//! post-processing, so the sweep is embarrassingly parallel. The points are sorted by wind
//! speed before the annual energy integration, which is the only synchronisation between them.

use serde::{Serialize, Deserialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use rotormath::array_generation::range_with_step;

use crate::error::Error;
use crate::geometry::TurbineGeometry;
use crate::loss_models::LossModel;
use crate::induction::EmpiricalWake;
use crate::wind::InflowModel;
use crate::bem::{BemSolver, OperatingCondition, SolverResult, rad_per_sec_to_rpm};
use crate::bem::postprocess::{postprocess, BemPostprocessResult};

use super::{SimulationConfig, PowerMode};
use super::controller::RotorController;
use super::energy::{annual_energy_production, AnnualEnergyEstimate, WeibullDistribution};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
/// One point of a power curve
pub struct PowerCurvePoint {
    /// Freestream wind speed [m/s]
    pub wind_speed: f64,
    /// Rotor speed selected by the controller [rpm]
    pub rotor_speed_rpm: f64,
    /// Collective pitch selected by the controller [rad]
    pub pitch: f64,
    /// Aerodynamic power [W]
    pub aerodynamic_power: f64,
    /// Electrical power, derived from the aerodynamic power by the configured power mode [W]
    pub electrical_power: f64,
    pub power_coefficient: f64,
    pub thrust_coefficient: f64,
    /// Rotor thrust [N]
    pub thrust: f64,
    /// False if any blade section failed to converge at this operating point
    pub converged: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
/// Record of a blade section that failed to converge, kept for diagnostics
pub struct ConvergenceRecord {
    /// Freestream wind speed of the operating point [m/s]
    pub wind_speed: f64,
    /// Azimuth angle of the operating point [rad]
    pub azimuth: f64,
    /// Index of the section that failed
    pub section_index: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
/// The results of a complete power curve simulation
pub struct SimulationResults {
    /// The power curve, sorted by wind speed
    pub power_curve: Vec<PowerCurvePoint>,
    /// Sections that failed to converge, over all operating points
    pub convergence_failures: Vec<ConvergenceRecord>,
    /// One annual energy estimate per configured mean wind speed
    pub annual_energy: Vec<AnnualEnergyEstimate>,
}

#[derive(Debug, Clone)]
/// The full evaluation of a single operating point
pub struct OperatingPointEvaluation {
    pub point: PowerCurvePoint,
    pub condition: OperatingCondition,
    pub solution: SolverResult,
    pub processed: BemPostprocessResult,
}

/// Driver for a wind speed sweep over a turbine.
///
/// The geometry and configuration are borrowed and shared between all operating points, while
/// the loss, wake and inflow strategies are owned by the driver and copied into each point
/// evaluation.
pub struct PowerCurveSimulation<'a> {
    pub geometry: &'a TurbineGeometry,
    pub config: &'a SimulationConfig,
    pub loss_model: LossModel,
    pub wake_model: EmpiricalWake,
    pub inflow_model: InflowModel,
}

impl<'a> PowerCurveSimulation<'a> {
    /// Creates a driver with the default loss model and the wake transition from the
    /// configuration.
    pub fn new(geometry: &'a TurbineGeometry, config: &'a SimulationConfig) -> Self {
        Self {
            geometry,
            config,
            loss_model: LossModel::default(),
            wake_model: EmpiricalWake {
                wake_transition: config.wake_transition,
            },
            inflow_model: InflowModel::default(),
        }
    }

    /// Runs the full wind speed sweep and the annual energy integration.
    pub fn run(&self) -> Result<SimulationResults, Error> {
        self.geometry.validate()?;
        self.config.validate()?;
        self.wake_model.validate()?;

        let wind_speeds = range_with_step(
            self.config.wind_speed_start,
            self.config.wind_speed_end,
            self.config.wind_speed_step
        );

        if wind_speeds.is_empty() {
            return Err(Error::DomainError("the wind speed sweep is empty".to_string()));
        }

        let mut evaluations = self.evaluate_wind_speeds(&wind_speeds);

        evaluations.sort_by(|a, b| a.point.wind_speed.total_cmp(&b.point.wind_speed));

        let mut results = SimulationResults::default();

        for evaluation in &evaluations {
            results.power_curve.push(evaluation.point);

            for (section_index, &converged) in evaluation.solution.converged.iter().enumerate() {
                if !converged {
                    results.convergence_failures.push(ConvergenceRecord {
                        wind_speed: evaluation.condition.wind_speed,
                        azimuth: evaluation.condition.azimuth,
                        section_index,
                    });
                }
            }
        }

        for &mean_wind_speed in &self.config.mean_wind_speeds {
            let weibull = WeibullDistribution {
                shape: self.config.weibull_shape,
                mean_wind_speed,
            };

            results.annual_energy.push(annual_energy_production(
                &results.power_curve,
                &weibull,
                0.5 * self.config.wind_speed_step,
                self.config.price_per_kwh
            )?);
        }

        Ok(results)
    }

    #[cfg(not(feature = "parallel"))]
    fn evaluate_wind_speeds(&self, wind_speeds: &[f64]) -> Vec<OperatingPointEvaluation> {
        wind_speeds.iter()
            .map(|&wind_speed| self.evaluate_operating_point(wind_speed))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn evaluate_wind_speeds(&self, wind_speeds: &[f64]) -> Vec<OperatingPointEvaluation> {
        wind_speeds.par_iter()
            .map(|&wind_speed| self.evaluate_operating_point(wind_speed))
            .collect()
    }

    /// Evaluates a single wind speed: lets the controller pick a set point, solves the blade
    /// element momentum equations and post-processes the result into a power curve point.
    pub fn evaluate_operating_point(&self, wind_speed: f64) -> OperatingPointEvaluation {
        let controller = RotorController {
            config: self.config,
            rotor_radius: self.geometry.rotor_radius,
        };

        let set_point = controller.set_point(wind_speed, |pitch, rotor_speed| {
            let condition = OperatingCondition {
                wind_speed,
                rotor_speed,
                pitch,
                azimuth: 0.0,
            };

            self.evaluate_condition(&condition).processed.power
        });

        let condition = OperatingCondition {
            wind_speed,
            rotor_speed: set_point.rotor_speed,
            pitch: set_point.pitch,
            azimuth: 0.0,
        };

        self.evaluate_condition(&condition)
    }

    /// Solves and post-processes a single operating condition. This is the entry point for
    /// callers that want the full sectional state at one condition rather than a power curve.
    pub fn evaluate_condition(&self, condition: &OperatingCondition) -> OperatingPointEvaluation {
        let inflow = self.inflow_model.build(
            self.geometry,
            condition.wind_speed,
            condition.rotor_speed,
            condition.azimuth
        );

        let settings = self.config.solver_settings();

        let solver = BemSolver::new(
            self.geometry,
            &self.loss_model,
            &self.wake_model,
            &settings,
            self.config.tip_avoidance
        );

        let solution = solver.solve(condition, &inflow);

        let processed = postprocess(
            self.geometry,
            condition,
            &inflow,
            &solution,
            &self.config.fluid
        );

        let electrical_power = match self.config.power_mode {
            PowerMode::Aerodynamic => processed.power,
            PowerMode::RatedLimited => processed.power.min(self.config.rated_power),
        };

        OperatingPointEvaluation {
            point: PowerCurvePoint {
                wind_speed: condition.wind_speed,
                rotor_speed_rpm: rad_per_sec_to_rpm(condition.rotor_speed),
                pitch: condition.pitch,
                aerodynamic_power: processed.power,
                electrical_power,
                power_coefficient: processed.power_coefficient,
                thrust_coefficient: processed.thrust_coefficient,
                thrust: processed.thrust,
                converged: solution.success,
            },
            condition: *condition,
            solution,
            processed,
        }
    }
}
