
// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! *Special functions* means functions that are well known, but which otherwise are just functions
//! that produce a value based on some input. The name *special functions* is inspired by the
//! the scipy library.

use crate::error::Error;

/// Clips the input value to the interval between `lower` and `upper`.
pub fn clip(x: f64, lower: f64, upper: f64) -> f64 {
    x.max(lower).min(upper)
}

/// A sigmoid function where the value goes from zero to one.
///
/// ## Arguments
/// * `x` - The input value to the function
/// * `x0` - The x-value where the function is equal to 0.5
/// * `transition_range` - The range around x0 where the function transitions from close to 0 to
///   close to 1.
///
/// ## Returns
/// The value of the sigmoid function at the input
pub fn sigmoid_zero_to_one(x: f64, x0: f64, transition_range: f64) -> f64 {
    // The slope constant is set such that this function returns 0.01 at x = x0 - transition_range
    // and 0.99 at x = x0 + transition_range
    let slope = 4.5951212 / transition_range;

    let x_prime = slope * (x - x0);

    1.0 / ( 1.0 + f64::exp(-x_prime))
}

const EULER_MASCHERONI: f64 = 0.577215664901532860606512090;

const HALF_LOG_TWO_PI: f64 = 0.91893853320467274178032973640562;

/// Numerator coefficients of the rational approximation of the gamma function on [1, 2)
const GAMMA_P: [f64; 8] = [
    -1.71618513886549492533811e+0,
     2.47656508055759199108314e+1,
    -3.79804256470945635097577e+2,
     6.29331155312818442661052e+2,
     8.66966202790413211295064e+2,
    -3.14512729688483675254357e+4,
    -3.61444134186911729807069e+4,
     6.64561438202405440627855e+4,
];

/// Denominator coefficients of the rational approximation of the gamma function on [1, 2)
const GAMMA_Q: [f64; 8] = [
    -3.08402300119738975254353e+1,
     3.15350626979604161529144e+2,
    -1.01515636749021914166146e+3,
    -3.10777167157231109440444e+3,
     2.25381184209801510330112e+4,
     4.75584627752788110767815e+3,
    -1.34659959864969306392456e+5,
    -1.15132259675553483497211e+5,
];

/// Coefficients of the asymptotic series used by [ln_gamma] for large arguments
const LN_GAMMA_C: [f64; 8] = [
     1.0 / 12.0,
    -1.0 / 360.0,
     1.0 / 1260.0,
    -1.0 / 1680.0,
     1.0 / 1188.0,
    -691.0 / 360360.0,
     1.0 / 156.0,
    -3617.0 / 122400.0,
];

/// The gamma function for positive arguments.
///
/// The value is computed with a rational minimax approximation on the interval [1, 2), combined
/// with the recurrence relation to move the argument into this interval. For arguments larger
/// than 12 the value is computed as `exp(ln_gamma(x))`, where [ln_gamma] uses an asymptotic
/// series.
///
/// ## Errors
/// Returns [Error::Domain] for arguments less than or equal to zero.
pub fn gamma(x: f64) -> Result<f64, Error> {
    if x <= 0.0 {
        return Err(Error::Domain(
            format!("the gamma function requires a positive argument, got {}", x)
        ));
    }

    // For very small arguments, 1/(x (1 + gamma_euler x)) is accurate to machine precision
    if x < 0.001 {
        return Ok(1.0 / (x * (1.0 + EULER_MASCHERONI * x)));
    }

    if x >= 12.0 {
        // Larger arguments than this overflow a double precision float anyway
        if x > 171.624 {
            return Ok(f64::INFINITY);
        }

        return Ok(ln_gamma(x)?.exp());
    }

    // Move the argument into [1, 2), where the rational approximation applies
    let mut y = x;
    let mut n = 0;

    let argument_was_less_than_one = y < 1.0;

    if argument_was_less_than_one {
        y += 1.0;
    } else {
        n = y.floor() as usize - 1;
        y -= n as f64;
    }

    let z = y - 1.0;

    let mut numerator = 0.0;
    let mut denominator = 1.0;

    for i in 0..8 {
        numerator = (numerator + GAMMA_P[i]) * z;
        denominator = denominator * z + GAMMA_Q[i];
    }

    let mut result = numerator / denominator + 1.0;

    if argument_was_less_than_one {
        // Use the identity gamma(x) = gamma(x + 1)/x
        result /= y - 1.0;
    } else {
        // Use the identity gamma(x + 1) = x gamma(x) to scale back up
        let mut factor = y;

        for _ in 0..n {
            result *= factor;
            factor += 1.0;
        }
    }

    Ok(result)
}

/// The natural logarithm of the gamma function for positive arguments.
///
/// For arguments below 12 the value is computed directly from [gamma]. Above 12 an asymptotic
/// series based on Stirling's formula is used.
///
/// ## Errors
/// Returns [Error::Domain] for arguments less than or equal to zero.
pub fn ln_gamma(x: f64) -> Result<f64, Error> {
    if x <= 0.0 {
        return Err(Error::Domain(
            format!("the log gamma function requires a positive argument, got {}", x)
        ));
    }

    if x < 12.0 {
        return Ok(gamma(x)?.abs().ln());
    }

    let z = 1.0 / (x * x);

    let mut sum = LN_GAMMA_C[7];

    for i in (0..7).rev() {
        sum *= z;
        sum += LN_GAMMA_C[i];
    }

    let series = sum / x;

    Ok((x - 0.5) * x.ln() - x + HALF_LOG_TWO_PI + series)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigmoid() {
        let x0 = 2.4;
        let transition_range = 1.2;

        let f0 = sigmoid_zero_to_one(x0, x0, transition_range);

        let f_n = sigmoid_zero_to_one(x0 - transition_range, x0, transition_range);
        let f_p = sigmoid_zero_to_one(x0 + transition_range, x0, transition_range);

        dbg!(f0, f_n, f_p);

        assert!((f0 - 0.5).abs() < 1e-9, "f0 = {}", f0);
        assert!((f_n - 0.01).abs() < 1e-6, "f_n = {}", f_n);
        assert!((f_p - 0.99).abs() < 1e-6, "f_p = {}", f_p);
    }

    #[test]
    fn test_clip() {
        assert_eq!(clip(0.5, 0.0, 1.0), 0.5);
        assert_eq!(clip(-0.5, 0.0, 1.0), 0.0);
        assert_eq!(clip(1.5, 0.0, 1.0), 1.0);
    }

    #[test]
    fn gamma_at_known_values() {
        let sqrt_pi = std::f64::consts::PI.sqrt();

        assert!((gamma(0.5).unwrap() - sqrt_pi).abs() < 1e-10);
        assert!((gamma(1.0).unwrap() - 1.0).abs() < 1e-12);
        assert!((gamma(1.5).unwrap() - 0.886226925452758).abs() < 1e-10);
        assert!((gamma(4.0).unwrap() - 6.0).abs() < 1e-10);
    }

    #[test]
    fn gamma_for_large_arguments() {
        // gamma(13) = 12!
        let relative_error = (gamma(13.0).unwrap() - 479001600.0).abs() / 479001600.0;

        dbg!(relative_error);

        assert!(relative_error < 1e-9);
    }

    #[test]
    fn ln_gamma_for_large_arguments() {
        let value = ln_gamma(100.0).unwrap();

        assert!((value - 359.1342053695754).abs() < 1e-8, "value = {}", value);
    }

    #[test]
    fn gamma_outside_the_domain() {
        assert!(matches!(gamma(0.0), Err(Error::Domain(_))));
        assert!(matches!(gamma(-2.3), Err(Error::Domain(_))));
        assert!(matches!(ln_gamma(-1.0), Err(Error::Domain(_))));
    }
}
