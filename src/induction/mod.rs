// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! Induction model for the velocities at the rotor plane.
//!
//! The induction factors express how much the axial velocity is reduced, and the tangential
//! velocity increased, at the rotor plane compared to the undisturbed inflow. For lightly loaded
//! rotors the factors follow directly from the momentum balance. For heavily loaded rotors the
//! momentum balance breaks down, and the axial factor is instead taken from an empirical
//! relation between the thrust coefficient and the induction, which is tuned to match measured
//! wake states.

use serde::{Serialize, Deserialize};

use crate::error::Error;

/// Threshold on |sin(phi)| and |cos(phi)| below which the corresponding induction factor is
/// forced to zero
pub const TRIG_EPSILON: f64 = 1e-12;

/// Threshold on the momentum balance denominators below which the balance is treated as
/// singular and the induction factor is forced to zero
const MIN_DENOMINATOR: f64 = 1e-12;

/// Lower bound on the loss factor when it enters a denominator
const MIN_LOSS_FACTOR: f64 = 1e-9;

#[derive(Debug, Clone, Copy)]
/// Input state for evaluating the induction factors at a single blade section
pub struct InductionInput {
    /// Local inflow angle [rad]
    pub inflow_angle: f64,
    /// Force coefficient normal to the rotor plane
    pub normal_coefficient: f64,
    /// Force coefficient tangential to the rotor plane
    pub tangential_coefficient: f64,
    /// Local solidity of the rotor annulus
    pub solidity: f64,
    /// Loss factor from one of the models in [crate::loss_models]
    pub loss_factor: f64,
}

#[derive(Debug, Clone, Copy, Default)]
/// Induction factors at a single blade section, together with the non-dimensional load factors
/// they were computed from
pub struct InductionOutput {
    /// Axial induction factor
    pub axial: f64,
    /// Tangential induction factor
    pub tangential: f64,
    /// Axial load factor: solidity * Cn / (4 F sin^2(phi))
    pub k_axial: f64,
    /// Tangential load factor: solidity * Ct / (4 F sin(phi) cos(phi))
    pub k_tangential: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
/// Empirical wake model for the axial induction at high rotor loading.
///
/// Below the transition value the axial induction follows the momentum balance. Above it, the
/// induction is found from a linear empirical thrust curve that is continuous with the momentum
/// result at the transition point.
pub struct EmpiricalWake {
    #[serde(default="EmpiricalWake::default_wake_transition")]
    /// The axial induction where the model transitions from the momentum balance to the
    /// empirical relation. Must be within (0, 1).
    pub wake_transition: f64,
}

impl EmpiricalWake {
    pub fn default_wake_transition() -> f64 {0.4}

    /// Returns a model with the transition value used by the Bladed software
    pub fn bladed() -> Self {
        Self {
            wake_transition: 0.3539,
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.wake_transition <= 0.0 || self.wake_transition >= 1.0 {
            return Err(Error::DomainError(
                format!("the wake transition must be within (0, 1), got {}", self.wake_transition)
            ));
        }

        Ok(())
    }

    /// Evaluates the induction factors for the input state.
    ///
    /// The sines and cosines of the inflow angle are used with their actual signs, so that
    /// sections in reversed flow get the correct signs on the load factors. When either of them
    /// is too close to zero the corresponding induction factor is set to zero, and the solver is
    /// expected to pick the solution up in the opposite inflow angle branch.
    pub fn evaluate(&self, input: &InductionInput) -> InductionOutput {
        let sin_inflow = input.inflow_angle.sin();
        let cos_inflow = input.inflow_angle.cos();

        let loss_factor = input.loss_factor.max(MIN_LOSS_FACTOR);

        let mut output = InductionOutput::default();

        if sin_inflow.abs() >= TRIG_EPSILON {
            output.k_axial =
                input.solidity * input.normal_coefficient /
                (4.0 * loss_factor * sin_inflow.powi(2));

            output.axial = self.axial_induction(output.k_axial);
        }

        if sin_inflow.abs() >= TRIG_EPSILON && cos_inflow.abs() >= TRIG_EPSILON {
            output.k_tangential =
                input.solidity * input.tangential_coefficient /
                (4.0 * loss_factor * sin_inflow * cos_inflow);

            output.tangential = Self::tangential_induction(output.k_tangential);
        }

        output
    }

    /// The axial induction as a function of the axial load factor.
    pub fn axial_induction(&self, k_axial: f64) -> f64 {
        let transition_load = self.wake_transition / (1.0 - self.wake_transition);

        if k_axial <= transition_load {
            let denominator = 1.0 + k_axial;

            if denominator.abs() < MIN_DENOMINATOR {
                return 0.0;
            }

            k_axial / denominator
        } else {
            self.empirical_axial_induction(k_axial)
        }
    }

    /// The empirical high-thrust relation. The closure solves
    /// `k (1 - a)^2 = x_w^2 + (1 - 2 x_w) a` for the induction `a`, which corresponds to a
    /// thrust curve that is linear in the induction and continuous with the momentum balance at
    /// the transition point.
    fn empirical_axial_induction(&self, k_axial: f64) -> f64 {
        let transition = self.wake_transition;

        let gamma_1 = 2.0 * k_axial + 1.0 - 2.0 * transition;
        let gamma_2 = gamma_1.powi(2) - 4.0 * k_axial * (k_axial - transition.powi(2));
        let gamma_3 = 2.0 * k_axial;

        (gamma_1 - gamma_2.max(0.0).sqrt()) / gamma_3
    }

    /// The tangential induction as a function of the tangential load factor.
    pub fn tangential_induction(k_tangential: f64) -> f64 {
        let denominator = 1.0 - k_tangential;

        if denominator.abs() < MIN_DENOMINATOR {
            return 0.0;
        }

        k_tangential / denominator
    }
}

impl Default for EmpiricalWake {
    fn default() -> Self {
        Self {
            wake_transition: Self::default_wake_transition(),
        }
    }
}
