// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! Interpolation functions

/// Returns a value that is linearly interpolated on the input values. Target values outside the
/// range of the input data are clamped to the end points.
///
/// # Arguments
/// * `x_target` - the x value for the interpolated value
/// * `x_data` - x values for the input data used in the interpolation. Must be sorted in
///   increasing order.
/// * `y_data` - y values for the input data used in the interpolation. The y values can be of any
///   type that supports the mathematical operations necessary to perform linear interpolation.
pub fn linear_interpolation<T>(x_target: f64, x_data: &[f64], y_data: &[T]) -> T
where T:
    std::ops::Mul<f64, Output = T> +
    std::ops::Add<T, Output = T> +
    std::ops::Sub<T, Output = T> +
    Copy
{
    match x_data.len() {
        0 => panic!("x_data is empty"),
        1 => y_data[0],
        2 => linear_interpolation_two_data_points(x_target, x_data, y_data),
        _ => {
            let index_min = binary_search(x_target, x_data);

            if index_min == x_data.len() - 1 {
                y_data[index_min]
            } else {
                linear_interpolation_two_data_points(
                    x_target,
                    &x_data[index_min..index_min+2],
                    &y_data[index_min..index_min+2]
                )
            }
        }
    }
}

/// Returns the index of the largest value in `x_data` that is smaller than or equal to
/// `x_target`, assuming sorted input data.
pub fn binary_search(x_target: f64, x_data: &[f64]) -> usize {
    let mut index_min = 0;
    let mut index_max = x_data.len() - 1;

    while index_max - index_min > 1 {
        let index_mid = (index_min + index_max) / 2;

        if x_data[index_mid] > x_target {
            index_max = index_mid;
        } else {
            index_min = index_mid;
        }
    }

    index_min
}

pub fn linear_interpolation_two_data_points<T>(x_target: f64, x_data: &[f64], y_data: &[T]) -> T
where T:
    std::ops::Mul<f64, Output = T> +
    std::ops::Add<T, Output = T> +
    std::ops::Sub<T, Output = T> +
    Copy
{
    if x_target <= x_data[0] {
        y_data[0]
    } else if x_target >= x_data[1] {
        y_data[1]
    } else {
        let delta_y = y_data[1] - y_data[0];

        y_data[0] + delta_y * ((x_target - x_data[0]) / (x_data[1] - x_data[0]))
    }
}

pub fn linear_array_interpolation<T>(x_target_array: &[f64], x_data: &[f64], y_data: &[T]) -> Vec<T>
where T:
    std::ops::Mul<f64, Output = T> +
    std::ops::Add<T, Output = T> +
    std::ops::Sub<T, Output = T> +
    Copy
{
    let mut y_target_array: Vec<T> = Vec::with_capacity(x_target_array.len());

    for x_target in x_target_array {
        y_target_array.push(linear_interpolation(*x_target, x_data, y_data));
    }

    y_target_array
}

/// Checks that the values are strictly increasing. The interpolation functions in this module,
/// and in particular [binary_search], require this from the x values of a data table.
pub fn is_strictly_increasing(x_data: &[f64]) -> bool {
    x_data.windows(2).all(|pair| pair[1] > pair[0])
}
