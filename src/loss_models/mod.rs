// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! Loss models that account for the finite number of blades.
//!
//! The momentum balance in the blade element momentum equations assumes an actuator disc with
//! infinitely many blades. The models in this module correct the balance with a loss factor
//! between zero and one, following the classical Prandtl approximation for tip and hub losses.

use serde::{Serialize, Deserialize};

use std::f64::consts::PI;

use rotormath::special_functions::clip;

/// Lower bound on |sin(phi)| in the loss factor denominators
const MIN_SIN_INFLOW_ANGLE: f64 = 1e-9;

#[derive(Debug, Clone, Copy)]
/// Input state for evaluating the loss factor at a single blade section
pub struct LossInput {
    /// Radius of the blade section [m]
    pub radius: f64,
    /// Radius at the blade tip [m]
    pub rotor_radius: f64,
    /// Radius at the blade root [m]
    pub hub_radius: f64,
    /// Chord length of the blade section [m]
    pub chord: f64,
    /// Local inflow angle [rad]
    pub inflow_angle: f64,
    pub num_blades: usize,
    /// Extra distance added between the section and the tip to avoid the singularity in the
    /// Prandtl tip loss expression [m]
    pub tip_avoidance: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
/// Loss model variants for the finite number of blades
pub enum LossModel {
    /// No correction, as for an ideal actuator disc
    NoLoss,
    /// Prandtl loss factor at the blade tip only
    PrandtlTip,
    /// Prandtl loss factor at the blade root only
    PrandtlHub,
    #[default]
    /// The product of the Prandtl tip and hub loss factors
    PrandtlCombined,
}

impl LossModel {
    /// Evaluates the loss factor for the input state. The returned value is always in [0, 1].
    pub fn evaluate(&self, input: &LossInput) -> f64 {
        match self {
            LossModel::NoLoss => 1.0,
            LossModel::PrandtlTip => Self::prandtl_tip(input),
            LossModel::PrandtlHub => Self::prandtl_hub(input),
            LossModel::PrandtlCombined => Self::prandtl_tip(input) * Self::prandtl_hub(input),
        }
    }

    fn prandtl_tip(input: &LossInput) -> f64 {
        // The avoidance distance keeps the factor nonzero when the section approaches the tip
        let avoidance = 0.01 * input.chord + input.tip_avoidance;

        let sin_inflow_angle = input.inflow_angle.sin().abs().max(MIN_SIN_INFLOW_ANGLE);

        let distance_factor =
            (avoidance + input.rotor_radius - input.radius) / (input.radius * sin_inflow_angle);

        Self::prandtl_factor(distance_factor, input.num_blades)
    }

    fn prandtl_hub(input: &LossInput) -> f64 {
        let avoidance = 0.01 * input.chord;

        let sin_inflow_angle = input.inflow_angle.sin().abs().max(MIN_SIN_INFLOW_ANGLE);

        let distance_factor =
            (avoidance + input.radius - input.hub_radius) / (input.hub_radius * sin_inflow_angle);

        Self::prandtl_factor(distance_factor, input.num_blades)
    }

    fn prandtl_factor(distance_factor: f64, num_blades: usize) -> f64 {
        let exponential = (-0.5 * num_blades as f64 * distance_factor).exp();

        (2.0 / PI) * clip(exponential, 0.0, 1.0).acos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mid_span_input() -> LossInput {
        LossInput {
            radius: 5.0,
            rotor_radius: 10.0,
            hub_radius: 0.5,
            chord: 0.1,
            inflow_angle: 0.2,
            num_blades: 3,
            tip_avoidance: 0.0,
        }
    }

    #[test]
    fn no_loss_is_one() {
        let input = mid_span_input();

        assert_eq!(LossModel::NoLoss.evaluate(&input), 1.0);
    }

    #[test]
    fn tip_loss_is_small_at_mid_span() {
        let input = mid_span_input();

        let factor = LossModel::PrandtlTip.evaluate(&input);

        dbg!(factor);

        assert!(factor > 0.99 && factor < 1.0, "factor = {}", factor);
    }

    #[test]
    fn tip_loss_drops_sharply_close_to_the_tip() {
        let input = LossInput {
            radius: 9.9,
            ..mid_span_input()
        };

        let factor = LossModel::PrandtlTip.evaluate(&input);

        dbg!(factor);

        assert!(factor < 0.5, "factor = {}", factor);
    }

    #[test]
    fn hub_loss_drops_close_to_the_root() {
        let at_mid_span = LossModel::PrandtlHub.evaluate(&mid_span_input());

        let close_to_root = LossModel::PrandtlHub.evaluate(&LossInput {
            radius: 0.51,
            ..mid_span_input()
        });

        dbg!(at_mid_span, close_to_root);

        assert!(close_to_root < at_mid_span);
        assert!(close_to_root < 0.5);
    }

    #[test]
    fn combined_loss_is_the_product() {
        let input = mid_span_input();

        let tip = LossModel::PrandtlTip.evaluate(&input);
        let hub = LossModel::PrandtlHub.evaluate(&input);
        let combined = LossModel::PrandtlCombined.evaluate(&input);

        assert!((combined - tip * hub).abs() < 1e-12);
    }

    #[test]
    fn loss_factors_stay_within_bounds() {
        for loss_model in [
            LossModel::NoLoss,
            LossModel::PrandtlTip,
            LossModel::PrandtlHub,
            LossModel::PrandtlCombined,
        ] {
            for i in 0..100 {
                let radius = 0.51 + 9.49 * (i as f64) / 99.0;

                let factor = loss_model.evaluate(&LossInput {
                    radius,
                    ..mid_span_input()
                });

                assert!((0.0..=1.0).contains(&factor), "factor = {}", factor);
            }
        }
    }
}
