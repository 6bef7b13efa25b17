// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! Post-processing of a converged solver state into section loads, rotor integrals and
//! cumulative blade beam loads.

use std::f64::consts::PI;

use rotormath::vec3::Vec3;
use rotormath::matrix::Matrix;

use crate::geometry::TurbineGeometry;
use crate::fluid::FluidProperties;
use crate::wind::RotorInflow;

use super::{OperatingCondition, SolverResult};

/// Freestream dynamic pressure below this is treated as no wind, and the non-dimensional
/// coefficients are left at zero
const MIN_DYNAMIC_PRESSURE: f64 = 1e-12;

#[derive(Debug, Clone, Default)]
/// The full post-processed state of the rotor at a single operating condition.
///
/// All distributed quantities are per section. The force and torque distributions are summed
/// over all blades, while the cumulative beam loads are for a single blade, accumulated from
/// the tip towards the root. The rotor coefficients are normalised with the annulus area
/// between the hub and the tip.
pub struct BemPostprocessResult {
    /// Effective angle of attack at each section [rad]
    pub effective_angles_of_attack: Vec<f64>,
    pub lift_coefficients: Vec<f64>,
    pub drag_coefficients: Vec<f64>,
    pub moment_coefficients: Vec<f64>,
    pub reynolds_numbers: Vec<f64>,
    pub mach_numbers: Vec<f64>,
    /// Local power coefficient of the annulus each section covers
    pub local_power_coefficients: Vec<f64>,
    /// Local thrust coefficient of the annulus each section covers
    pub local_thrust_coefficients: Vec<f64>,
    /// Radial width of each section element [m]
    pub section_widths: Vec<f64>,
    /// Thrust from each element, all blades [N]
    pub thrust_distribution: Vec<f64>,
    /// Torque from each element, all blades [Nm]
    pub torque_distribution: Vec<f64>,
    /// In-plane force from each element, all blades [N]
    pub edge_force_distribution: Vec<f64>,
    /// Pitching moment from each element around the section reference point, single blade [Nm]
    pub pitch_moment_distribution: Vec<f64>,
    /// Pitching moment from each element around the aerodynamic centre, single blade [Nm]
    pub airfoil_moment_distribution: Vec<f64>,

    /// Cumulative axial force from the tip down to each section, single blade [N]
    pub cumulative_axial_forces: Vec<f64>,
    /// Cumulative in-plane force from the tip down to each section, single blade [N]
    pub cumulative_edge_forces: Vec<f64>,
    /// Cumulative flapwise bending moment, single blade [Nm]
    pub cumulative_flap_moments: Vec<f64>,
    /// Cumulative edgewise bending moment, single blade [Nm]
    pub cumulative_edge_moments: Vec<f64>,
    /// Cumulative pitching moment, single blade [Nm]
    pub cumulative_pitch_moments: Vec<f64>,

    /// Rotor thrust [N]
    pub thrust: f64,
    /// Rotor torque [Nm]
    pub torque: f64,
    /// Aerodynamic power [W]
    pub power: f64,
    pub power_coefficient: f64,
    pub thrust_coefficient: f64,
    pub torque_coefficient: f64,
    /// Sum of the in-plane forces over all elements and blades [N]
    pub edge_force_sum: f64,
    /// Flapwise bending moment at the blade root, single blade [Nm]
    pub root_flap_moment: f64,
    /// Edgewise bending moment at the blade root, single blade [Nm]
    pub root_edge_moment: f64,
    /// Pitching moment at the blade root, single blade [Nm]
    pub root_pitch_moment: f64,

    /// False if any section failed to converge. The distributed arrays are still filled in as
    /// far as possible, but the rotor integrals only include converged sections.
    pub success: bool,
}

/// Maps a converged solver state to section loads and rotor integrals.
///
/// # Arguments
/// * `geometry` - The rotor geometry.
/// * `condition` - The operating condition the solver state belongs to.
/// * `inflow` - The sectional inflow velocities the solver state belongs to.
/// * `solution` - The converged solver state.
/// * `fluid` - The fluid properties used for forces, Reynolds and Mach numbers.
pub fn postprocess(
    geometry: &TurbineGeometry,
    condition: &OperatingCondition,
    inflow: &RotorInflow,
    solution: &SolverResult,
    fluid: &FluidProperties,
) -> BemPostprocessResult {
    let nr_sections = geometry.num_sections();
    let num_blades = geometry.num_blades as f64;

    let mut result = BemPostprocessResult {
        effective_angles_of_attack: vec![0.0; nr_sections],
        lift_coefficients: vec![0.0; nr_sections],
        drag_coefficients: vec![0.0; nr_sections],
        moment_coefficients: vec![0.0; nr_sections],
        reynolds_numbers: vec![0.0; nr_sections],
        mach_numbers: vec![0.0; nr_sections],
        local_power_coefficients: vec![0.0; nr_sections],
        local_thrust_coefficients: vec![0.0; nr_sections],
        section_widths: geometry.section_widths(),
        thrust_distribution: vec![0.0; nr_sections],
        torque_distribution: vec![0.0; nr_sections],
        edge_force_distribution: vec![0.0; nr_sections],
        pitch_moment_distribution: vec![0.0; nr_sections],
        airfoil_moment_distribution: vec![0.0; nr_sections],
        cumulative_axial_forces: vec![0.0; nr_sections],
        cumulative_edge_forces: vec![0.0; nr_sections],
        cumulative_flap_moments: vec![0.0; nr_sections],
        cumulative_edge_moments: vec![0.0; nr_sections],
        cumulative_pitch_moments: vec![0.0; nr_sections],
        success: solution.success,
        ..Default::default()
    };

    let freestream_dynamic_pressure =
        0.5 * fluid.density * condition.wind_speed.powi(2);

    for i in 0..nr_sections {
        let chord = geometry.chord(i);
        let radius = geometry.radius(i);
        let width = result.section_widths[i];

        let inflow_angle = solution.inflow_angles[i];

        let angle_of_attack =
            inflow_angle - (geometry.twist(i) + condition.pitch);

        let coefficients = geometry.section_model(i).coefficients(angle_of_attack);

        let axial_velocity =
            inflow.axial_velocities[i] * (1.0 - solution.axial_inductions[i]);
        let tangential_velocity =
            inflow.tangential_velocities[i] * (1.0 + solution.tangential_inductions[i]);

        let relative_velocity =
            (axial_velocity.powi(2) + tangential_velocity.powi(2)).sqrt();

        result.effective_angles_of_attack[i] = angle_of_attack;
        result.lift_coefficients[i] = coefficients.lift;
        result.drag_coefficients[i] = coefficients.drag;
        result.moment_coefficients[i] = coefficients.moment;
        result.reynolds_numbers[i] = relative_velocity * chord / fluid.kinematic_viscosity;
        result.mach_numbers[i] = relative_velocity / fluid.speed_of_sound;

        let dynamic_pressure = 0.5 * fluid.density * relative_velocity.powi(2);

        // The solver stores zero force coefficients for failed sections, so their loads vanish
        let normal_coefficient = solution.normal_coefficients[i];
        let tangential_coefficient = solution.tangential_coefficients[i];

        let thrust_element =
            num_blades * dynamic_pressure * normal_coefficient * chord * width;
        let edge_force_element =
            num_blades * dynamic_pressure * tangential_coefficient * chord * width;
        let torque_element = edge_force_element * radius;
        let airfoil_moment_element =
            dynamic_pressure * coefficients.moment * chord.powi(2) * width;

        result.thrust_distribution[i] = thrust_element;
        result.torque_distribution[i] = torque_element;
        result.edge_force_distribution[i] = edge_force_element;
        result.airfoil_moment_distribution[i] = airfoil_moment_element;
        result.pitch_moment_distribution[i] = airfoil_moment_element +
            aero_centre_moment(
                geometry, condition, i,
                dynamic_pressure * chord * width,
                normal_coefficient,
                tangential_coefficient,
            );

        if freestream_dynamic_pressure > MIN_DYNAMIC_PRESSURE {
            let annulus_area = 2.0 * PI * radius * width;

            result.local_thrust_coefficients[i] =
                thrust_element / (freestream_dynamic_pressure * annulus_area);
            result.local_power_coefficients[i] =
                condition.rotor_speed * torque_element /
                (freestream_dynamic_pressure * condition.wind_speed * annulus_area);
        }
    }

    // Rotor integrals over converged sections only
    for i in 0..nr_sections {
        if !solution.converged[i] {
            continue;
        }

        result.thrust += result.thrust_distribution[i];
        result.torque += result.torque_distribution[i];
        result.edge_force_sum += result.edge_force_distribution[i];
    }

    result.power = condition.rotor_speed * result.torque;

    let swept_area = geometry.swept_area();

    if freestream_dynamic_pressure > MIN_DYNAMIC_PRESSURE {
        result.thrust_coefficient =
            result.thrust / (freestream_dynamic_pressure * swept_area);
        result.power_coefficient =
            result.power / (freestream_dynamic_pressure * condition.wind_speed * swept_area);
        result.torque_coefficient =
            result.torque / (freestream_dynamic_pressure * swept_area * geometry.rotor_radius);
    }

    accumulate_beam_loads(geometry, &mut result, num_blades);

    result.root_flap_moment = result.cumulative_flap_moments[0];
    result.root_edge_moment = result.cumulative_edge_moments[0];
    result.root_pitch_moment = result.cumulative_pitch_moments[0];

    result
}

/// The contribution to the sectional pitching moment from the force acting at the aerodynamic
/// centre, which is offset from the section reference point. The offset is given in the chord
/// coordinate system and is rotated into the rotor plane by the twist and pitch angles.
fn aero_centre_moment(
    geometry: &TurbineGeometry,
    condition: &OperatingCondition,
    index: usize,
    force_factor: f64,
    normal_coefficient: f64,
    tangential_coefficient: f64,
) -> f64 {
    let offset_local = Vec3::new(
        geometry.aero_centre_x(index),
        geometry.aero_centre_y(index),
        0.0
    );

    if offset_local.length_squared() == 0.0 {
        return 0.0;
    }

    let chord_to_rotor_plane =
        Matrix::rotation_z(geometry.twist(index) + condition.pitch);

    let moment_arm = chord_to_rotor_plane.multiply_vec3(offset_local);

    // Per-blade force on the element in the rotor plane section frame: x tangential, y axial,
    // z along the span
    let force = force_factor * Vec3::new(tangential_coefficient, normal_coefficient, 0.0);

    moment_arm.cross(force).z
}

/// Accumulates the per-blade beam loads from the tip towards the root. The force distributions
/// are summed over all blades, so they are scaled back to a single blade here.
fn accumulate_beam_loads(
    geometry: &TurbineGeometry,
    result: &mut BemPostprocessResult,
    num_blades: f64,
) {
    let nr_sections = geometry.num_sections();

    let mut axial_force = 0.0;
    let mut edge_force = 0.0;
    let mut flap_moment = 0.0;
    let mut edge_moment = 0.0;
    let mut pitch_moment = 0.0;

    for i in (0..nr_sections).rev() {
        let radius = geometry.radius(i);

        axial_force += result.thrust_distribution[i] / num_blades;
        edge_force += result.edge_force_distribution[i] / num_blades;
        flap_moment += radius * result.thrust_distribution[i] / num_blades;
        edge_moment += radius * result.edge_force_distribution[i] / num_blades;
        pitch_moment += result.pitch_moment_distribution[i];

        result.cumulative_axial_forces[i] = axial_force;
        result.cumulative_edge_forces[i] = edge_force;
        result.cumulative_flap_moments[i] = flap_moment;
        result.cumulative_edge_moments[i] = edge_moment;
        result.cumulative_pitch_moments[i] = pitch_moment;
    }
}
