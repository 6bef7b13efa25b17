// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! Tests of the solver itself: convergence, residual tolerance and determinism

use rotormath::solvers::SolverSettings;

use crate::bem::BemSolver;
use crate::loss_models::LossModel;
use crate::induction::EmpiricalWake;
use crate::wind::InflowModel;

use super::test_setup::OptimalRotor;

#[test]
fn all_sections_converge_at_the_design_point() {
    let rotor = OptimalRotor::default();
    let geometry = rotor.build();

    let condition = rotor.design_condition(8.0);

    let inflow = InflowModel::default().build(
        &geometry, condition.wind_speed, condition.rotor_speed, condition.azimuth
    );

    let loss_model = LossModel::PrandtlCombined;
    let wake_model = EmpiricalWake::default();
    let settings = SolverSettings::default();

    let solver = BemSolver::new(&geometry, &loss_model, &wake_model, &settings, 0.001);

    let result = solver.solve(&condition, &inflow);

    dbg!(result.nr_failed_sections());

    assert!(result.success);
    assert!(result.converged.iter().all(|&converged| converged));
}

#[test]
fn converged_sections_satisfy_the_residual_tolerance() {
    let rotor = OptimalRotor::default();
    let geometry = rotor.build();

    let condition = rotor.design_condition(8.0);

    let inflow = InflowModel::default().build(
        &geometry, condition.wind_speed, condition.rotor_speed, condition.azimuth
    );

    let loss_model = LossModel::PrandtlCombined;
    let wake_model = EmpiricalWake::default();
    let settings = SolverSettings::default();

    let solver = BemSolver::new(&geometry, &loss_model, &wake_model, &settings, 0.001);

    let result = solver.solve(&condition, &inflow);

    for i in 0..geometry.num_sections() {
        assert!(result.converged[i]);

        // The residual can be reconstructed from the converged state alone
        let inflow_angle = result.inflow_angles[i];

        let local_speed_ratio =
            inflow.tangential_velocities[i] / inflow.axial_velocities[i];

        let residual =
            inflow_angle.sin() / (1.0 - result.axial_inductions[i]) -
            inflow_angle.cos() /
            (local_speed_ratio * (1.0 + result.tangential_inductions[i]));

        dbg!(i, residual);

        assert!(
            residual.abs() <= settings.tolerance,
            "section {}: residual = {}", i, residual
        );
    }
}

#[test]
fn inductions_stay_within_physical_bounds() {
    let rotor = OptimalRotor::default();
    let geometry = rotor.build();

    let loss_model = LossModel::PrandtlCombined;
    let wake_model = EmpiricalWake::default();
    let settings = SolverSettings::default();

    let solver = BemSolver::new(&geometry, &loss_model, &wake_model, &settings, 0.001);

    for wind_speed in [5.0, 8.0, 11.0] {
        let condition = rotor.design_condition(wind_speed);

        let inflow = InflowModel::default().build(
            &geometry, condition.wind_speed, condition.rotor_speed, condition.azimuth
        );

        let result = solver.solve(&condition, &inflow);

        for i in 0..geometry.num_sections() {
            let axial = result.axial_inductions[i];

            // Above the wake transition the empirical relation takes over, and the induction
            // stays below one
            assert!(axial < 1.0, "section {}: axial induction = {}", i, axial);
        }
    }
}

#[test]
fn average_induction_is_close_to_the_optimum_at_the_design_point() {
    let rotor = OptimalRotor::default();
    let geometry = rotor.build();

    let condition = rotor.design_condition(8.0);

    let inflow = InflowModel::default().build(
        &geometry, condition.wind_speed, condition.rotor_speed, condition.azimuth
    );

    let loss_model = LossModel::PrandtlCombined;
    let wake_model = EmpiricalWake::default();
    let settings = SolverSettings::default();

    let solver = BemSolver::new(&geometry, &loss_model, &wake_model, &settings, 0.001);

    let result = solver.solve(&condition, &inflow);

    let average_axial: f64 =
        result.axial_inductions.iter().sum::<f64>() / geometry.num_sections() as f64;

    dbg!(average_axial);

    // The rotor is designed for an axial induction of one third
    assert!(average_axial > 0.15 && average_axial < 0.5, "average = {}", average_axial);
}

#[test]
fn identical_inputs_give_identical_outputs() {
    let rotor = OptimalRotor::default();
    let geometry = rotor.build();

    let condition = rotor.design_condition(9.0);

    let inflow = InflowModel::default().build(
        &geometry, condition.wind_speed, condition.rotor_speed, condition.azimuth
    );

    let loss_model = LossModel::PrandtlCombined;
    let wake_model = EmpiricalWake::default();
    let settings = SolverSettings::default();

    let solver = BemSolver::new(&geometry, &loss_model, &wake_model, &settings, 0.001);

    let first = solver.solve(&condition, &inflow);
    let second = solver.solve(&condition, &inflow);

    assert_eq!(first.inflow_angles, second.inflow_angles);
    assert_eq!(first.axial_inductions, second.axial_inductions);
    assert_eq!(first.tangential_inductions, second.tangential_inductions);
    assert_eq!(first.normal_coefficients, second.normal_coefficients);
    assert_eq!(first.tangential_coefficients, second.tangential_coefficients);
}
