// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! Geometry transformations, such as rotation and translation

use crate::vec3::Vec3;

impl Vec3 {
    #[inline]
    /// Translates the vector by the given translation vector
    pub fn translate(self, translation: Self) -> Self {
        self + translation
    }

    #[inline]
    /// Uses the Rodrigues' rotation formmula to rotate the vector around the given axis.
    ///
    /// Source: <https://en.wikipedia.org/wiki/Rodrigues%27_rotation_formula>
    pub fn rotate_around_axis(self, angle: f64, axis: Self) -> Self {
        let axis_normalized = axis.normalize();

        let cos_angle = angle.cos();
        let sin_angle = angle.sin();

        self * cos_angle +
        axis_normalized.cross(self) * sin_angle +
        axis_normalized * axis_normalized.dot(self) * (1.0 - cos_angle)
    }
}
