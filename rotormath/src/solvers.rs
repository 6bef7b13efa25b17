
// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! Numerical solvers, such as root-finding algorithms.

use crate::error::Error;

#[derive(Debug, Clone)]
/// General structure for passing in settings to a numerical solver
pub struct SolverSettings {
    /// Tolerance for the solver to stop iterating
    pub tolerance: f64,
    /// Maximum number of iterations to perform for the solver
    pub max_iterations: usize,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 400,
        }
    }
}

/// Brent's method for finding the root of a function on a bracketing interval.
///
/// The algorithm combines bisection with the secant method and inverse quadratic interpolation,
/// and keeps the bisection fallback whenever the interpolated step behaves badly. The returned
/// value satisfies `|f(x)| <= settings.tolerance`.
///
/// For more: <https://en.wikipedia.org/wiki/Brent%27s_method>
///
/// # Arguments
/// * `f` - The function to find the root of. Must be a function of one variable.
/// * `lower` - Lower end of the bracketing interval.
/// * `upper` - Upper end of the bracketing interval.
/// * `settings` - The settings for the solver. See `SolverSettings` for more information.
///
/// # Errors
/// * [Error::NoBracket] if the function does not change sign on the input interval.
/// * [Error::MaxIterations] if the iteration budget is exhausted before the residual tolerance
///   is met.
pub fn brent_solver(
    f: impl Fn(f64) -> f64,
    lower: f64,
    upper: f64,
    settings: &SolverSettings
) -> Result<f64, Error> {
    let mut a = lower;
    let mut b = upper;
    let mut f_a = f(a);
    let mut f_b = f(b);

    if f_a.abs() <= settings.tolerance {
        return Ok(a);
    }
    if f_b.abs() <= settings.tolerance {
        return Ok(b);
    }

    if f_a * f_b > 0.0 {
        return Err(Error::NoBracket(
            format!("no sign change on the interval [{}, {}]", lower, upper)
        ));
    }

    // The point b should hold the best estimate of the root
    if f_a.abs() < f_b.abs() {
        std::mem::swap(&mut a, &mut b);
        std::mem::swap(&mut f_a, &mut f_b);
    }

    let mut c = a;
    let mut f_c = f_a;
    let mut d = c;
    let mut bisection_used = true;

    for _ in 0..settings.max_iterations {
        let x_tolerance = f64::EPSILON * (b.abs() + 1.0);

        let mut s = if f_a != f_c && f_b != f_c {
            // Inverse quadratic interpolation
            a * f_b * f_c / ((f_a - f_b) * (f_a - f_c)) +
            b * f_a * f_c / ((f_b - f_a) * (f_b - f_c)) +
            c * f_a * f_b / ((f_c - f_a) * (f_c - f_b))
        } else {
            // Secant step
            b - f_b * (b - a) / (f_b - f_a)
        };

        let interval_limit = (3.0 * a + b) / 4.0;

        let s_outside_interval =
            !((interval_limit < s && s < b) || (b < s && s < interval_limit));

        let step_too_large = if bisection_used {
            (s - b).abs() >= 0.5 * (b - c).abs()
        } else {
            (s - b).abs() >= 0.5 * (c - d).abs()
        };

        let interval_too_small = if bisection_used {
            (b - c).abs() < x_tolerance
        } else {
            (c - d).abs() < x_tolerance
        };

        if s_outside_interval || step_too_large || interval_too_small {
            s = 0.5 * (a + b);
            bisection_used = true;
        } else {
            bisection_used = false;
        }

        let f_s = f(s);

        d = c;
        c = b;
        f_c = f_b;

        if f_a * f_s < 0.0 {
            b = s;
            f_b = f_s;
        } else {
            a = s;
            f_a = f_s;
        }

        if f_a.abs() < f_b.abs() {
            std::mem::swap(&mut a, &mut b);
            std::mem::swap(&mut f_a, &mut f_b);
        }

        if f_b.abs() <= settings.tolerance {
            return Ok(b);
        }
    }

    Err(Error::MaxIterations(
        format!("residual still {} after {} iterations", f_b, settings.max_iterations)
    ))
}

/// Secant method for finding the root of a function.
///
/// Unlike [brent_solver], the secant method does not need a bracketing interval, but convergence
/// is not guaranteed. The last estimate is returned regardless of whether the tolerance was met.
///
/// For more: <https://en.wikipedia.org/wiki/Secant_method>
///
/// # Arguments
/// * `f` - The function to find the root of. Must be a function of one variable.
/// * `x1` - The first initial guess for the root.
/// * `x2` - The second initial guess for the root.
/// * `settings` - The settings for the solver. See `SolverSettings` for more information.
pub fn secant_solver(
    f: impl Fn(f64) -> f64,
    x1: f64,
    x2: f64,
    settings: &SolverSettings
) -> f64 {
    let f1 = f(x1);
    let f2 = f(x2);

    let (mut x_previous, mut x_previous_previous) = if f1.abs() < f2.abs() {
        (x1, x2)
    } else {
        (x2, x1)
    };

    let (mut f_previous, mut f_previous_previous) = if f1.abs() < f2.abs() {
        (f1, f2)
    } else {
        (f2, f1)
    };

    for _ in 0..settings.max_iterations {
        if f_previous.abs() < settings.tolerance {
            break;
        }

        let delta_x = x_previous - x_previous_previous;
        let delta_f = f_previous - f_previous_previous;

        if delta_f == 0.0 {
            break;
        }

        let x_new = x_previous - f_previous * delta_x / delta_f;

        x_previous_previous = x_previous;
        f_previous_previous = f_previous;

        x_previous = x_new;
        f_previous = f(x_new);
    }

    x_previous
}
