// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! Tests of the rotor level performance figures from the post-processor

use rotormath::solvers::SolverSettings;

use crate::bem::{BemSolver, OperatingCondition};
use crate::bem::postprocess::{postprocess, BemPostprocessResult};
use crate::geometry::TurbineGeometry;
use crate::fluid::FluidProperties;
use crate::loss_models::LossModel;
use crate::induction::EmpiricalWake;
use crate::wind::InflowModel;

use super::test_setup::OptimalRotor;

const BETZ_LIMIT: f64 = 16.0 / 27.0;

fn solve_and_postprocess(
    geometry: &TurbineGeometry,
    condition: &OperatingCondition,
    loss_model: LossModel,
) -> BemPostprocessResult {
    let inflow = InflowModel::default().build(
        geometry, condition.wind_speed, condition.rotor_speed, condition.azimuth
    );

    let wake_model = EmpiricalWake::default();
    let settings = SolverSettings::default();

    let solver = BemSolver::new(geometry, &loss_model, &wake_model, &settings, 0.001);

    let solution = solver.solve(condition, &inflow);

    postprocess(geometry, condition, &inflow, &solution, &FluidProperties::default())
}

#[test]
fn design_point_performance_of_a_megawatt_rotor() {
    let rotor = OptimalRotor::default();
    let geometry = rotor.build();

    let condition = rotor.design_condition(8.0);

    assert!(
        (condition.tip_speed_ratio(geometry.rotor_radius) - rotor.design_tip_speed_ratio).abs()
        < 1e-12
    );

    let result = solve_and_postprocess(&geometry, &condition, LossModel::PrandtlCombined);

    dbg!(result.power_coefficient, result.thrust_coefficient, result.thrust, result.power);

    assert!(result.success);

    assert!(
        result.power_coefficient > 0.40 && result.power_coefficient < BETZ_LIMIT + 1e-3,
        "Cp = {}", result.power_coefficient
    );

    assert!(
        result.thrust_coefficient > 0.55 && result.thrust_coefficient < 1.0,
        "Ct = {}", result.thrust_coefficient
    );

    // A rotor of this size produces a thrust of a few hundred kilonewtons at 8 m/s
    assert!(
        result.thrust > 2.0e5 && result.thrust < 5.5e5,
        "thrust = {}", result.thrust
    );

    assert!(result.power > 1.0e6, "power = {}", result.power);
}

#[test]
fn power_coefficient_respects_the_betz_limit_without_losses() {
    let rotor = OptimalRotor {
        zero_angle_drag_coefficient: 0.0,
        ..Default::default()
    };

    let geometry = rotor.build();

    let condition = rotor.design_condition(8.0);

    let result = solve_and_postprocess(&geometry, &condition, LossModel::NoLoss);

    dbg!(result.power_coefficient);

    assert!(result.success);
    assert!(
        result.power_coefficient <= BETZ_LIMIT + 1e-3,
        "Cp = {}", result.power_coefficient
    );
    assert!(result.power_coefficient > 0.45, "Cp = {}", result.power_coefficient);
}

#[test]
fn removing_the_tip_loss_raises_the_power_coefficient() {
    let rotor = OptimalRotor::default();
    let geometry = rotor.build();

    let condition = rotor.design_condition(8.0);

    let with_losses =
        solve_and_postprocess(&geometry, &condition, LossModel::PrandtlCombined);
    let without_losses =
        solve_and_postprocess(&geometry, &condition, LossModel::NoLoss);

    dbg!(with_losses.power_coefficient, without_losses.power_coefficient);

    assert!(
        without_losses.power_coefficient > with_losses.power_coefficient,
        "no loss: {}, with losses: {}",
        without_losses.power_coefficient,
        with_losses.power_coefficient
    );
}

#[test]
fn increasing_pitch_reduces_the_power_coefficient() {
    let rotor = OptimalRotor::default();
    let geometry = rotor.build();

    let mut previous_cp = f64::INFINITY;

    for pitch_degrees in [2.0_f64, 4.0, 6.0] {
        let condition = OperatingCondition {
            pitch: pitch_degrees.to_radians(),
            ..rotor.design_condition(8.0)
        };

        let result = solve_and_postprocess(&geometry, &condition, LossModel::PrandtlCombined);

        dbg!(pitch_degrees, result.power_coefficient);

        assert!(
            result.power_coefficient < previous_cp,
            "Cp did not drop when the pitch was raised to {} degrees", pitch_degrees
        );

        previous_cp = result.power_coefficient;
    }
}

#[test]
fn rotor_integrals_are_consistent_with_the_distributions() {
    let rotor = OptimalRotor::default();
    let geometry = rotor.build();

    let condition = rotor.design_condition(8.0);

    let result = solve_and_postprocess(&geometry, &condition, LossModel::PrandtlCombined);

    let thrust_sum: f64 = result.thrust_distribution.iter().sum();
    let torque_sum: f64 = result.torque_distribution.iter().sum();

    assert!((result.thrust - thrust_sum).abs() < 1e-9 * thrust_sum.abs());
    assert!((result.torque - torque_sum).abs() < 1e-9 * torque_sum.abs());
    assert_eq!(result.power, condition.rotor_speed * result.torque);
}

#[test]
fn beam_loads_accumulate_towards_the_root() {
    let rotor = OptimalRotor::default();
    let geometry = rotor.build();

    let condition = rotor.design_condition(8.0);

    let result = solve_and_postprocess(&geometry, &condition, LossModel::PrandtlCombined);

    // The cumulative axial force at the root equals the blade share of the thrust
    let blade_thrust = result.thrust / geometry.num_blades as f64;

    assert!(
        (result.cumulative_axial_forces[0] - blade_thrust).abs() < 1e-9 * blade_thrust,
        "cumulative = {}, blade thrust = {}",
        result.cumulative_axial_forces[0], blade_thrust
    );

    // The cumulative loads grow monotonically from the tip towards the root
    for pair in result.cumulative_flap_moments.windows(2) {
        assert!(pair[0] >= pair[1]);
    }

    assert!(result.root_flap_moment > 0.0);
    assert!(result.root_edge_moment > 0.0);

    dbg!(result.root_flap_moment, result.root_edge_moment);
}

#[test]
fn aerodynamic_centre_offsets_shift_the_pitching_moment() {
    let rotor = OptimalRotor::default();

    let mut geometry = rotor.build();

    for section in &mut geometry.sections {
        section.aero_centre_x = 0.25 * section.chord;
    }

    let condition = rotor.design_condition(8.0);

    let result = solve_and_postprocess(&geometry, &condition, LossModel::PrandtlCombined);

    assert!(result.success);

    // With the force acting a quarter chord away from the reference point, the sectional
    // pitching moments can no longer equal the pure airfoil moments
    let mid_span = geometry.num_sections() / 2;

    let shift = result.pitch_moment_distribution[mid_span] -
        result.airfoil_moment_distribution[mid_span];

    dbg!(shift, result.root_pitch_moment);

    assert!(shift.abs() > 0.0);
    assert!(result.root_pitch_moment.is_finite());
}

#[test]
fn sectional_reynolds_and_mach_numbers_are_plausible() {
    let rotor = OptimalRotor::default();
    let geometry = rotor.build();

    let condition = rotor.design_condition(8.0);

    let result = solve_and_postprocess(&geometry, &condition, LossModel::PrandtlCombined);

    for i in 0..geometry.num_sections() {
        assert!(
            result.reynolds_numbers[i] > 1.0e6,
            "section {}: Re = {}", i, result.reynolds_numbers[i]
        );

        assert!(
            result.mach_numbers[i] < 0.3,
            "section {}: Ma = {}", i, result.mach_numbers[i]
        );
    }
}
