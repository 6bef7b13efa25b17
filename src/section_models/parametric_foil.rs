// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

use serde::{Serialize, Deserialize};

use rotormath::special_functions;

use std::f64::consts::PI;

use super::SectionCoefficients;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
/// Parametric model of a foil profile that can compute lift, drag and moment coefficients.
///
/// The model is useful when no measured or computed polar is available, for instance when
/// setting up idealised rotors in tests or early design studies. It is divided in two core
/// sub-models:
///
/// 1) For angles of attack below stall, the lift is assumed to be linear in the angle of attack
///    and the drag is assumed to be a second order polynomial.
/// 2) For angles of attack above stall, both the lift and drag are assumed to be harmonic
///    functions which primarily is adjusted by setting the *max value* after stall.
///
/// The transit between the two models is done using a sigmoid function, where both the transition
/// point and the width of the transition can be adjusted.
pub struct ParametricFoil {
    #[serde(default)]
    /// Lift coefficient at zero angle of attack. This is zero by default, but can be set to a
    /// non-zero value to account for camber.
    pub cl_zero_angle: f64,
    #[serde(default="ParametricFoil::default_cl_initial_slope")]
    /// How fast the lift coefficient increases with angle of attack, when the angle of attack is
    /// small. The default value is 2 * pi, which is a typical value for a normal foil profile.
    pub cl_initial_slope: f64,
    #[serde(default="ParametricFoil::default_one")]
    /// The maximum lift coefficient after stall.
    pub cl_max_after_stall: f64,
    #[serde(default)]
    /// Drag coefficient at zero angle of attack
    pub cd_zero_angle: f64,
    #[serde(default)]
    /// Factor to give the drag coefficient a second order term. This is zero by default.
    pub cd_second_order_factor: f64,
    #[serde(default="ParametricFoil::default_one")]
    /// The maximum drag coefficient after stall.
    pub cd_max_after_stall: f64,
    #[serde(default="ParametricFoil::default_cd_power_after_stall")]
    /// Power factor for the harmonic dependency of the drag coefficient after stall. Set to 1.6 by
    /// default.
    pub cd_power_after_stall: f64,
    #[serde(default)]
    /// Moment coefficient, assumed constant with the angle of attack. Zero by default.
    pub cm_constant: f64,
    #[serde(default="ParametricFoil::default_mean_stall_angle")]
    /// The mean stall angle for positive angles of attack, which is the mean angle where the
    /// model transitions from pre-stall to post-stall behavior. The default value is 20 degrees.
    pub mean_positive_stall_angle: f64,
    #[serde(default="ParametricFoil::default_mean_stall_angle")]
    /// The mean stall angle for negative angles of attack, which is the mean angle where the
    /// model transitions from pre-stall to post-stall behavior. The default value is 20 degrees.
    pub mean_negative_stall_angle: f64,
    #[serde(default="ParametricFoil::default_stall_range")]
    /// The range of the stall transition. The default value is 6 degrees.
    pub stall_range: f64,
}

fn wrapped_stall_angle(angle_of_attack: f64) -> f64 {
    let mut effective = angle_of_attack.abs();

    while effective > PI {
        effective -= PI;
    }

    effective * angle_of_attack.signum()
}

impl ParametricFoil {
    fn default_one() -> f64 {1.0}
    pub fn default_cl_initial_slope()     -> f64 {2.0 * PI}
    pub fn default_mean_stall_angle()     -> f64 {20.0_f64.to_radians()}
    pub fn default_stall_range()          -> f64 {6.0_f64.to_radians()}
    pub fn default_cd_power_after_stall() -> f64 {1.6}

    /// Returns the lift, drag and moment coefficients at the given angle of attack.
    ///
    /// # Arguments
    /// * `angle_of_attack` - Angle of attack in radians.
    pub fn coefficients(&self, angle_of_attack: f64) -> SectionCoefficients {
        SectionCoefficients {
            lift: self.lift_coefficient(angle_of_attack),
            drag: self.drag_coefficient(angle_of_attack),
            moment: self.cm_constant,
        }
    }

    pub fn lift_coefficient(&self, angle_of_attack: f64) -> f64 {
        let cl_pre_stall = self.cl_zero_angle + self.cl_initial_slope * angle_of_attack;

        let stall_angle = wrapped_stall_angle(angle_of_attack);

        let cl_post_stall = self.cl_max_after_stall * (2.0 * stall_angle).sin();

        self.combine_pre_and_post_stall(angle_of_attack, cl_pre_stall, cl_post_stall)
    }

    pub fn drag_coefficient(&self, angle_of_attack: f64) -> f64 {
        let stall_angle = wrapped_stall_angle(angle_of_attack);

        let cd_pre_stall =
            self.cd_zero_angle + self.cd_second_order_factor * angle_of_attack.powi(2);
        let cd_post_stall =
            self.cd_max_after_stall * stall_angle.sin().abs().powf(self.cd_power_after_stall);

        self.combine_pre_and_post_stall(angle_of_attack, cd_pre_stall, cd_post_stall)
    }

    /// Calculates the amount of stall for a given angle of attack.
    pub fn amount_of_stall(&self, angle_of_attack: f64) -> f64 {
        let mean_stall_angle = if angle_of_attack >= 0.0 {
            self.mean_positive_stall_angle.abs()
        } else {
            self.mean_negative_stall_angle.abs()
        };

        special_functions::sigmoid_zero_to_one(
            angle_of_attack.abs(),
            mean_stall_angle,
            self.stall_range
        )
    }

    fn combine_pre_and_post_stall(&self, angle_of_attack: f64, pre_stall: f64, post_stall: f64) -> f64 {
        let amount_of_stall = self.amount_of_stall(angle_of_attack);

        pre_stall * (1.0 - amount_of_stall) + amount_of_stall * post_stall
    }
}

impl Default for ParametricFoil {
    fn default() -> Self {
        Self {
            cl_zero_angle:          0.0,
            cl_initial_slope:       Self::default_cl_initial_slope(),
            cl_max_after_stall:     Self::default_one(),
            cd_zero_angle:          0.0,
            cd_second_order_factor: 0.0,
            cd_max_after_stall:     Self::default_one(),
            cd_power_after_stall:   Self::default_cd_power_after_stall(),
            cm_constant:            0.0,
            mean_positive_stall_angle: Self::default_mean_stall_angle(),
            mean_negative_stall_angle: Self::default_mean_stall_angle(),
            stall_range:            Self::default_stall_range(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_lift_coefficent() {
        let foil = ParametricFoil::default();

        let angle_of_attack = 5.0_f64.to_radians();

        let cl_theory = 2.0 * PI * angle_of_attack;
        let cl_model = foil.lift_coefficient(angle_of_attack);

        let cl_error = (cl_model - cl_theory).abs();

        dbg!(&cl_error);

        assert!(cl_error < 1e-5);
    }

    #[test]
    fn large_angle_of_attack() {
        let foil = ParametricFoil::default();

        let angle_of_attack = 80.0_f64.to_radians();

        let cd = foil.drag_coefficient(angle_of_attack);

        dbg!(cd);

        // Deep stall drag should be close to the configured post-stall maximum
        assert!(cd > 0.5 && cd <= foil.cd_max_after_stall + 1e-12);
    }

    #[test]
    fn stall_reduces_the_lift_slope() {
        let foil = ParametricFoil::default();

        let below_stall = foil.lift_coefficient(10.0_f64.to_radians());
        let above_stall = foil.lift_coefficient(35.0_f64.to_radians());

        let linear_at_35_deg = 2.0 * PI * 35.0_f64.to_radians();

        dbg!(below_stall, above_stall);

        assert!(above_stall < linear_at_35_deg);
    }
}
