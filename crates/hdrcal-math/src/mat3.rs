//! 3x3 matrix for linear color transforms.
//!
//! # Convention
//!
//! Row-major storage, column vectors:
//!
//! ```text
//! | m00 m01 m02 |   | r |   | X |
//! | m10 m11 m12 | * | g | = | Y |
//! | m20 m21 m22 |   | b |   | Z |
//! ```
//!
//! Primaries matrices are built from columns (one column per primary's XYZ),
//! so [`Mat3::from_col_vecs`] is the usual constructor.

use crate::Vec3;
use std::ops::{Index, Mul};

/// Determinants with smaller magnitude are treated as singular.
pub const SINGULAR_EPSILON: f32 = 1e-10;

/// A 3x3 matrix.
///
/// ```rust
/// use hdrcal_math::{Mat3, Vec3};
///
/// let v = Vec3::new(1.0, 2.0, 3.0);
/// assert_eq!(Mat3::IDENTITY * v, v);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Mat3 {
    /// Elements as `[row0, row1, row2]`.
    pub m: [[f32; 3]; 3],
}

impl Mat3 {
    /// Zero matrix.
    pub const ZERO: Self = Self { m: [[0.0; 3]; 3] };

    /// Identity matrix.
    pub const IDENTITY: Self = Self::diagonal(1.0, 1.0, 1.0);

    /// Creates a matrix from row arrays.
    #[inline]
    pub const fn from_rows(rows: [[f32; 3]; 3]) -> Self {
        Self { m: rows }
    }

    /// Creates a matrix from column arrays.
    #[inline]
    pub const fn from_cols(c: [[f32; 3]; 3]) -> Self {
        Self::from_rows([
            [c[0][0], c[1][0], c[2][0]],
            [c[0][1], c[1][1], c[2][1]],
            [c[0][2], c[1][2], c[2][2]],
        ])
    }

    /// Creates a matrix whose columns are the given vectors.
    #[inline]
    pub fn from_col_vecs(c0: Vec3, c1: Vec3, c2: Vec3) -> Self {
        Self::from_cols([c0.to_array(), c1.to_array(), c2.to_array()])
    }

    /// Creates a diagonal matrix.
    #[inline]
    pub const fn diagonal(d0: f32, d1: f32, d2: f32) -> Self {
        Self::from_rows([[d0, 0.0, 0.0], [0.0, d1, 0.0], [0.0, 0.0, d2]])
    }

    /// Returns column `i`.
    #[inline]
    pub fn col(&self, i: usize) -> Vec3 {
        Vec3::new(self.m[0][i], self.m[1][i], self.m[2][i])
    }

    /// Returns row `i`.
    #[inline]
    pub fn row(&self, i: usize) -> Vec3 {
        Vec3::from_array(self.m[i])
    }

    /// Multiplies column `i` by `s.i` for every column.
    ///
    /// Equivalent to `self * Mat3::diagonal(s.x, s.y, s.z)`.
    #[inline]
    pub fn scale_cols(&self, s: Vec3) -> Self {
        Self::from_col_vecs(self.col(0) * s.x, self.col(1) * s.y, self.col(2) * s.z)
    }

    /// Transpose.
    #[inline]
    pub fn transpose(&self) -> Self {
        Self::from_cols(self.m)
    }

    /// Determinant by cofactor expansion along the first row.
    #[inline]
    pub fn determinant(&self) -> f32 {
        let m = &self.m;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Closed-form inverse (adjugate over determinant).
    ///
    /// Returns `None` when `|det| < SINGULAR_EPSILON` or the result is not
    /// finite, so callers never see NaN.
    ///
    /// ```rust
    /// use hdrcal_math::Mat3;
    ///
    /// let inv = Mat3::diagonal(2.0, 4.0, 8.0).inverse().unwrap();
    /// assert_eq!(inv, Mat3::diagonal(0.5, 0.25, 0.125));
    /// ```
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() < SINGULAR_EPSILON {
            return None;
        }

        let m = &self.m;
        let k = 1.0 / det;
        let inv = Self::from_rows([
            [
                (m[1][1] * m[2][2] - m[1][2] * m[2][1]) * k,
                (m[0][2] * m[2][1] - m[0][1] * m[2][2]) * k,
                (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * k,
            ],
            [
                (m[1][2] * m[2][0] - m[1][0] * m[2][2]) * k,
                (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * k,
                (m[0][2] * m[1][0] - m[0][0] * m[1][2]) * k,
            ],
            [
                (m[1][0] * m[2][1] - m[1][1] * m[2][0]) * k,
                (m[0][1] * m[2][0] - m[0][0] * m[2][1]) * k,
                (m[0][0] * m[1][1] - m[0][1] * m[1][0]) * k,
            ],
        ]);
        inv.is_finite().then_some(inv)
    }

    /// `self * v`.
    #[inline]
    pub fn transform(&self, v: Vec3) -> Vec3 {
        Vec3::new(self.row(0).dot(v), self.row(1).dot(v), self.row(2).dot(v))
    }

    /// `self * other`.
    #[inline]
    pub fn mul_mat(&self, other: &Self) -> Self {
        let mut out = Self::ZERO;
        for i in 0..3 {
            for j in 0..3 {
                out.m[i][j] = self.row(i).dot(other.col(j));
            }
        }
        out
    }

    /// True if every element is finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.m.iter().flatten().all(|x| x.is_finite())
    }

    /// Converts to glam Mat3 (column-major).
    #[inline]
    pub fn to_glam(&self) -> glam::Mat3 {
        glam::Mat3::from_cols_array_2d(&self.transpose().m)
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        self.transform(rhs)
    }
}

impl Mul for Mat3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mul_mat(&rhs)
    }
}

impl Index<usize> for Mat3 {
    type Output = [f32; 3];

    #[inline]
    fn index(&self, i: usize) -> &[f32; 3] {
        &self.m[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sample() -> Mat3 {
        Mat3::from_rows([[1.0, 2.0, 3.0], [0.0, 1.0, 4.0], [5.0, 6.0, 0.0]])
    }

    #[test]
    fn test_from_cols_is_transpose_of_rows() {
        let m = sample();
        assert_eq!(Mat3::from_cols(m.m), m.transpose());
        assert_eq!(m.col(2), Vec3::new(3.0, 4.0, 0.0));
    }

    #[test]
    fn test_determinant() {
        assert_abs_diff_eq!(sample().determinant(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_inverse() {
        let m = sample();
        let id = m * m.inverse().unwrap();
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_abs_diff_eq!(id.m[i][j], expected, epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn test_singular_has_no_inverse() {
        let m = Mat3::from_rows([[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [1.0, 1.0, 1.0]]);
        assert!(m.inverse().is_none());
        assert!(Mat3::ZERO.inverse().is_none());
    }

    #[test]
    fn test_scale_cols() {
        let m = sample().scale_cols(Vec3::new(2.0, 1.0, 0.5));
        assert_eq!(m, sample() * Mat3::diagonal(2.0, 1.0, 0.5));
    }

    #[test]
    fn test_glam_layout() {
        let g = sample().to_glam();
        let v = glam::Vec3::new(1.0, 1.0, 1.0);
        let out = g * v;
        assert_eq!(out, (sample() * Vec3::ONE).to_glam());
    }
}
