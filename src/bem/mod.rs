// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! The blade element momentum solver.
//!
//! The solver uses the single variable formulation from Ning (2013), where the blade element
//! and momentum equations for a section are combined into one residual function of the local
//! inflow angle alone. The residual is bracketed by scanning the inflow angle interval in
//! sub-intervals, and each sign change is handed to a bracketed root finder. Sections are
//! independent, so a section that fails to converge is flagged and the remaining sections are
//! still solved.

pub mod postprocess;

#[cfg(test)]
pub(crate) mod tests;

use std::f64::consts::{PI, FRAC_PI_2, FRAC_PI_4};

use serde::{Serialize, Deserialize};

use rotormath::solvers::{brent_solver, SolverSettings};
use rotormath::array_generation::linspace;

use crate::geometry::TurbineGeometry;
use crate::loss_models::{LossModel, LossInput};
use crate::induction::{EmpiricalWake, InductionInput, InductionOutput};
use crate::wind::RotorInflow;

/// Margin between the bracket end points and the singular inflow angles 0 and pi/2
const BRACKET_MARGIN: f64 = 1e-6;

/// Number of sub-intervals the inflow angle interval is scanned in when bracketing the residual
const NR_SUB_INTERVALS: usize = 20;

/// Sections with a smaller axial velocity than this cannot be solved and are flagged as failed
const MIN_AXIAL_VELOCITY: f64 = 1e-9;

/// Lower bound on the magnitude of the denominators in the residual function
const MIN_RESIDUAL_DENOMINATOR: f64 = 1e-12;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
/// A single steady operating condition for the rotor
pub struct OperatingCondition {
    /// Freestream wind speed [m/s]
    pub wind_speed: f64,
    /// Rotor speed [rad/s]
    pub rotor_speed: f64,
    /// Collective pitch angle [rad]
    pub pitch: f64,
    #[serde(default)]
    /// Azimuth angle of the blade [rad]
    pub azimuth: f64,
}

impl OperatingCondition {
    /// The tip speed ratio of the condition
    pub fn tip_speed_ratio(&self, rotor_radius: f64) -> f64 {
        self.rotor_speed * rotor_radius / self.wind_speed
    }
}

#[derive(Debug, Clone)]
/// Results from the blade element momentum solver, which will be further used to generate a
/// [postprocess::BemPostprocessResult]
pub struct SolverResult {
    /// Local inflow angle at each section [rad]
    pub inflow_angles: Vec<f64>,
    /// Axial induction factor at each section
    pub axial_inductions: Vec<f64>,
    /// Tangential induction factor at each section
    pub tangential_inductions: Vec<f64>,
    /// Force coefficient normal to the rotor plane at each section
    pub normal_coefficients: Vec<f64>,
    /// Force coefficient tangential to the rotor plane at each section
    pub tangential_coefficients: Vec<f64>,
    /// Whether the residual converged for each section
    pub converged: Vec<bool>,
    /// True only if every section converged
    pub success: bool,
}

impl SolverResult {
    fn new_unsolved(nr_sections: usize) -> Self {
        Self {
            inflow_angles: vec![0.0; nr_sections],
            axial_inductions: vec![0.0; nr_sections],
            tangential_inductions: vec![0.0; nr_sections],
            normal_coefficients: vec![0.0; nr_sections],
            tangential_coefficients: vec![0.0; nr_sections],
            converged: vec![false; nr_sections],
            success: false,
        }
    }

    /// Number of sections that did not converge
    pub fn nr_failed_sections(&self) -> usize {
        self.converged.iter().filter(|&&converged| !converged).count()
    }
}

#[derive(Debug, Clone, Copy)]
/// The state of a single section at a given inflow angle, as evaluated by the residual function
struct SectionState {
    normal_coefficient: f64,
    tangential_coefficient: f64,
    induction: InductionOutput,
}

/// Blade element momentum solver for a single operating condition.
///
/// The solver borrows the geometry and the loss and induction strategies, and owns nothing. The
/// result vectors are allocated once per solve, and the residual function does not allocate.
pub struct BemSolver<'a> {
    pub geometry: &'a TurbineGeometry,
    pub loss_model: &'a LossModel,
    pub wake_model: &'a EmpiricalWake,
    pub settings: &'a SolverSettings,
    /// Extra tip distance passed to the loss models [m]
    pub tip_avoidance: f64,
}

impl<'a> BemSolver<'a> {
    pub fn new(
        geometry: &'a TurbineGeometry,
        loss_model: &'a LossModel,
        wake_model: &'a EmpiricalWake,
        settings: &'a SolverSettings,
        tip_avoidance: f64,
    ) -> Self {
        Self {
            geometry,
            loss_model,
            wake_model,
            settings,
            tip_avoidance,
        }
    }

    /// Solves the blade element momentum equations for every section.
    ///
    /// The solve is deterministic: identical inputs give identical outputs.
    pub fn solve(&self, condition: &OperatingCondition, inflow: &RotorInflow) -> SolverResult {
        let nr_sections = self.geometry.num_sections();

        let mut result = SolverResult::new_unsolved(nr_sections);

        for index in 0..nr_sections {
            self.solve_section(index, condition, inflow, &mut result);
        }

        result.success = result.converged.iter().all(|&converged| converged);

        result
    }

    /// Solves a single section by searching for a root of the residual, first for positive
    /// inflow angles and then, if that fails, for negative inflow angles. The negative interval
    /// covers propeller brake and reversed inflow operation.
    fn solve_section(
        &self,
        index: usize,
        condition: &OperatingCondition,
        inflow: &RotorInflow,
        result: &mut SolverResult,
    ) {
        let axial_velocity = inflow.axial_velocities[index];
        let tangential_velocity = inflow.tangential_velocities[index];

        if axial_velocity.abs() < MIN_AXIAL_VELOCITY {
            return;
        }

        let residual = |inflow_angle: f64| {
            self.residual(inflow_angle, index, condition, axial_velocity, tangential_velocity)
        };

        let root = self
            .search_interval(&residual, BRACKET_MARGIN, FRAC_PI_2 - BRACKET_MARGIN)
            .or_else(|| self.search_interval(&residual, -FRAC_PI_4, -BRACKET_MARGIN));

        if let Some(inflow_angle) = root {
            let state = self.evaluate_section(
                inflow_angle, index, condition
            );

            result.inflow_angles[index] = inflow_angle;
            result.axial_inductions[index] = state.induction.axial;
            result.tangential_inductions[index] = state.induction.tangential;
            result.normal_coefficients[index] = state.normal_coefficient;
            result.tangential_coefficients[index] = state.tangential_coefficient;
            result.converged[index] = true;
        }
    }

    /// Scans the interval in equal sub-intervals and runs the root finder on every sub-interval
    /// where the residual changes sign. The first root within the tolerance is accepted.
    fn search_interval(
        &self,
        residual: &impl Fn(f64) -> f64,
        lower: f64,
        upper: f64,
    ) -> Option<f64> {
        let boundaries = linspace(lower, upper, NR_SUB_INTERVALS + 1);

        let mut residual_left = residual(boundaries[0]);

        for i in 0..NR_SUB_INTERVALS {
            let residual_right = residual(boundaries[i + 1]);

            if residual_left * residual_right <= 0.0 {
                let root = brent_solver(
                    residual,
                    boundaries[i],
                    boundaries[i + 1],
                    self.settings
                );

                if let Ok(inflow_angle) = root {
                    return Some(inflow_angle);
                }
            }

            residual_left = residual_right;
        }

        None
    }

    /// The Ning (2013) residual for a section: the mismatch between the inflow angle and the
    /// velocity triangle it implies through the induction factors.
    fn residual(
        &self,
        inflow_angle: f64,
        index: usize,
        condition: &OperatingCondition,
        axial_velocity: f64,
        tangential_velocity: f64,
    ) -> f64 {
        let state = self.evaluate_section(inflow_angle, index, condition);

        let local_speed_ratio = tangential_velocity / axial_velocity;

        let mut axial_factor = 1.0 - state.induction.axial;
        let mut tangential_factor =
            local_speed_ratio * (1.0 + state.induction.tangential);

        if axial_factor.abs() < MIN_RESIDUAL_DENOMINATOR {
            axial_factor = MIN_RESIDUAL_DENOMINATOR;
        }

        if tangential_factor.abs() < MIN_RESIDUAL_DENOMINATOR {
            tangential_factor = MIN_RESIDUAL_DENOMINATOR;
        }

        inflow_angle.sin() / axial_factor - inflow_angle.cos() / tangential_factor
    }

    /// Evaluates the aerodynamic state of a section at a given inflow angle: the effective angle
    /// of attack, the projected force coefficients and the induction factors.
    fn evaluate_section(
        &self,
        inflow_angle: f64,
        index: usize,
        condition: &OperatingCondition,
    ) -> SectionState {
        let angle_of_attack = inflow_angle - (self.geometry.twist(index) + condition.pitch);

        let coefficients = self.geometry.section_model(index).coefficients(angle_of_attack);

        let sin_inflow = inflow_angle.sin();
        let cos_inflow = inflow_angle.cos();

        let normal_coefficient = coefficients.lift * cos_inflow + coefficients.drag * sin_inflow;
        let tangential_coefficient = coefficients.lift * sin_inflow - coefficients.drag * cos_inflow;

        let loss_factor = self.loss_model.evaluate(&LossInput {
            radius: self.geometry.radius(index),
            rotor_radius: self.geometry.rotor_radius,
            hub_radius: self.geometry.hub_radius,
            chord: self.geometry.chord(index),
            inflow_angle,
            num_blades: self.geometry.num_blades,
            tip_avoidance: self.tip_avoidance,
        });

        let induction = self.wake_model.evaluate(&InductionInput {
            inflow_angle,
            normal_coefficient,
            tangential_coefficient,
            solidity: self.geometry.solidity(index),
            loss_factor,
        });

        SectionState {
            normal_coefficient,
            tangential_coefficient,
            induction,
        }
    }
}

/// Converts a rotor speed in revolutions per minute to radians per second
pub fn rpm_to_rad_per_sec(rpm: f64) -> f64 {
    rpm * 2.0 * PI / 60.0
}

/// Converts a rotor speed in radians per second to revolutions per minute
pub fn rad_per_sec_to_rpm(rad_per_sec: f64) -> f64 {
    rad_per_sec * 60.0 / (2.0 * PI)
}
