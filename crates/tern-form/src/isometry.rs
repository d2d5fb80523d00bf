//! Scaled isometries between ternary forms.

use std::ops::Mul;

use num_bigint::BigInt;
use tern_core::Int;

use crate::form::QuadForm;
use crate::matrix::{self, Mat3, Vec3};

/// Integral 3×3 matrix `S` acting on column vectors.
///
/// `S` is an isometry from `q₁` to `q₂` at squared scale `s²` when
/// `Sᵀ A₁ S = s² A₂`. Composition `first * second` applies `second` in the
/// coordinates of `first`'s target, so chains read left to right.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Isometry<R> {
    matrix: Mat3<R>,
}

impl<R: Int> Isometry<R> {
    /// The identity map.
    pub fn identity() -> Self {
        Self {
            matrix: matrix::identity(),
        }
    }

    /// `value · I`.
    pub fn scalar(value: R) -> Self {
        Self {
            matrix: matrix::scalar(value),
        }
    }

    /// Wraps a row-major matrix.
    pub fn from_matrix(matrix: Mat3<R>) -> Self {
        Self { matrix }
    }

    /// Builds the isometry sending `e_j` to `columns[j]`.
    pub fn from_columns(columns: [&Vec3<R>; 3]) -> Self {
        Self {
            matrix: matrix::from_columns(columns),
        }
    }

    /// Underlying row-major matrix.
    pub fn matrix(&self) -> &Mat3<R> {
        &self.matrix
    }

    /// Image of `e_j`.
    pub fn column(&self, j: usize) -> Vec3<R> {
        matrix::column(&self.matrix, j)
    }

    /// Determinant.
    pub fn determinant(&self) -> R {
        matrix::det(&self.matrix)
    }

    /// Scaled inverse `scale² · S⁻¹`, an isometry back from `q₂` to `q₁` at
    /// the same scale. The division by `det S` is exact for genuine scaled
    /// isometries.
    pub fn inverse(&self, scale: &R) -> Self {
        let det = self.determinant();
        let scaled = matrix::scale(&matrix::adjugate(&self.matrix), &(scale.clone() * scale.clone()));
        Self {
            matrix: matrix::div_exact(&scaled, &det),
        }
    }

    /// Checks `Sᵀ A_from S = scalar · A_to`. Evaluated in exact arithmetic,
    /// since `Sᵀ A S` can leave the native range while `S` itself fits.
    pub fn is_isometry(&self, from: &QuadForm<R>, to: &QuadForm<R>, scalar: &R) -> bool {
        let lhs = matrix::congruence(&matrix::to_big(&from.gram()), &matrix::to_big(&self.matrix));
        lhs == matrix::scale(&matrix::to_big(&to.gram()), &scalar.to_big())
    }

    /// The same matrix over arbitrary precision integers.
    pub fn to_big(&self) -> Isometry<BigInt> {
        Isometry::from_matrix(matrix::to_big(&self.matrix))
    }

    /// Re-expresses the isometry at another width.
    pub fn convert<T: Int>(&self) -> Option<Isometry<T>> {
        matrix::convert(&self.matrix).map(Isometry::from_matrix)
    }

    /// Replaces column `j` by its negation.
    pub fn negate_column(&mut self, j: usize) {
        for row in self.matrix.iter_mut() {
            row[j] = -row[j].clone();
        }
    }
}

impl<R: Int> Mul<&Isometry<R>> for &Isometry<R> {
    type Output = Isometry<R>;

    fn mul(self, rhs: &Isometry<R>) -> Isometry<R> {
        Isometry {
            matrix: matrix::mul(&self.matrix, &rhs.matrix),
        }
    }
}

impl<R: Int> Mul for Isometry<R> {
    type Output = Isometry<R>;

    fn mul(self, rhs: Isometry<R>) -> Isometry<R> {
        &self * &rhs
    }
}
