// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! A square matrix structure with the standard operations needed for geometry transformations

use serde::{Serialize, Deserialize};

use crate::vec3::Vec3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A square matrix where the data is stored as a flat vector in row-major order.
pub struct Matrix {
    pub data: Vec<f64>,
    pub size: usize,
}

impl Matrix {
    /// Creates a new matrix with the given size, filled with zeros
    pub fn zeros(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Creates a new identity matrix with the given size
    pub fn identity(size: usize) -> Self {
        let mut out = Self::zeros(size);

        for i in 0..size {
            out[[i, i]] = 1.0;
        }

        out
    }

    /// Creates a 3x3 rotation matrix for a rotation around the x-axis
    pub fn rotation_x(angle: f64) -> Self {
        let mut out = Self::identity(3);

        out[[1, 1]] =  angle.cos();
        out[[1, 2]] = -angle.sin();
        out[[2, 1]] =  angle.sin();
        out[[2, 2]] =  angle.cos();

        out
    }

    /// Creates a 3x3 rotation matrix for a rotation around the y-axis
    pub fn rotation_y(angle: f64) -> Self {
        let mut out = Self::identity(3);

        out[[0, 0]] =  angle.cos();
        out[[0, 2]] =  angle.sin();
        out[[2, 0]] = -angle.sin();
        out[[2, 2]] =  angle.cos();

        out
    }

    /// Creates a 3x3 rotation matrix for a rotation around the z-axis
    pub fn rotation_z(angle: f64) -> Self {
        let mut out = Self::identity(3);

        out[[0, 0]] =  angle.cos();
        out[[0, 1]] = -angle.sin();
        out[[1, 0]] =  angle.sin();
        out[[1, 1]] =  angle.cos();

        out
    }

    #[inline(always)]
    pub fn flat_index(&self, indices: [usize; 2]) -> usize {
        indices[0] * self.size + indices[1]
    }

    /// Multiplies two matrices of the same size
    pub fn mat_mult(&self, rhs: &Self) -> Self {
        assert_eq!(self.size, rhs.size, "matrix sizes do not match");

        let mut out = Self::zeros(self.size);

        for i in 0..self.size {
            for j in 0..self.size {
                let mut sum = 0.0;

                for k in 0..self.size {
                    sum += self[[i, k]] * rhs[[k, j]];
                }

                out[[i, j]] = sum;
            }
        }

        out
    }

    /// Multiplies a 3x3 matrix with a 3D vector
    pub fn multiply_vec3(&self, rhs: Vec3) -> Vec3 {
        assert_eq!(self.size, 3, "multiply_vec3 requires a 3x3 matrix");

        Vec3 {
            x: self[[0, 0]] * rhs.x + self[[0, 1]] * rhs.y + self[[0, 2]] * rhs.z,
            y: self[[1, 0]] * rhs.x + self[[1, 1]] * rhs.y + self[[1, 2]] * rhs.z,
            z: self[[2, 0]] * rhs.x + self[[2, 1]] * rhs.y + self[[2, 2]] * rhs.z,
        }
    }
}

impl std::ops::Index<[usize; 2]> for Matrix {
    type Output = f64;

    fn index(&self, indices: [usize; 2]) -> &f64 {
        &self.data[indices[0] * self.size + indices[1]]
    }
}

impl std::ops::IndexMut<[usize; 2]> for Matrix {
    fn index_mut(&mut self, indices: [usize; 2]) -> &mut f64 {
        let flat_index = self.flat_index(indices);

        &mut self.data[flat_index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_multiplication() {
        let identity = Matrix::identity(3);
        let rotation = Matrix::rotation_z(0.43);

        let product = identity.mat_mult(&rotation);

        assert_eq!(product, rotation);
    }

    #[test]
    fn rotation_of_a_vector() {
        let rotation = Matrix::rotation_z(90.0_f64.to_radians());

        let rotated = rotation.multiply_vec3(Vec3::unit_x());

        dbg!(rotated);

        assert!((rotated.x - 0.0).abs() < 1e-12);
        assert!((rotated.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rotation_matrices_match_rodrigues_rotation() {
        let angle = 0.73;

        let vector = Vec3::new(1.3, -0.2, 0.8);

        let from_matrix = Matrix::rotation_x(angle).multiply_vec3(vector);
        let from_rodrigues = vector.rotate_around_axis(angle, Vec3::unit_x());

        assert!((from_matrix - from_rodrigues).length() < 1e-12);
    }
}
