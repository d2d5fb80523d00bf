//! Integral positive definite ternary quadratic forms.

use std::fmt;

use num_bigint::BigInt;
use tern_core::{ErrorInfo, Int, TernError};
use tracing::trace;

use crate::isometry::Isometry;
use crate::matrix::{self, Mat3, Vec3};
use crate::reduce;

/// `q(x, y, z) = a x² + b y² + c z² + f yz + g xz + h xy`.
///
/// Equality and hashing compare coefficients. Forms returned by
/// [`QuadForm::reduce`] are canonical, so for them coefficient equality is
/// class equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuadForm<R> {
    a: R,
    b: R,
    c: R,
    f: R,
    g: R,
    h: R,
}

impl<R: Int> QuadForm<R> {
    /// Builds a form, rejecting anything that is not positive definite.
    pub fn new(a: R, b: R, c: R, f: R, g: R, h: R) -> Result<Self, TernError> {
        let form = Self { a, b, c, f, g, h };
        let two = R::from_small(2);
        let minor1 = two.clone() * form.a.clone();
        let minor2 = minor1.clone() * two * form.b.clone() - form.h.clone() * form.h.clone();
        let disc = form.discriminant();
        if !minor1.is_positive() || !minor2.is_positive() || !disc.is_positive() {
            return Err(TernError::Form(
                ErrorInfo::new("not-positive-definite", "form is not positive definite")
                    .with_context("form", &form)
                    .with_hint("leading principal minors of the Gram matrix must be positive"),
            ));
        }
        Ok(form)
    }

    /// Builds a form from coefficients ordered `[a, b, c, f, g, h]`.
    pub fn from_coefficients(coefficients: [R; 6]) -> Result<Self, TernError> {
        let [a, b, c, f, g, h] = coefficients;
        Self::new(a, b, c, f, g, h)
    }

    /// Builds a form from a symmetric Gram matrix with even diagonal.
    pub fn from_gram(gram: &Mat3<R>) -> Result<Self, TernError> {
        let two = R::from_small(2);
        if (0..3).any(|i| gram[i][i].is_odd()) {
            return Err(TernError::Form(ErrorInfo::new(
                "odd-diagonal",
                "Gram matrix of an integral form needs an even diagonal",
            )));
        }
        debug_assert!(
            gram[0][1] == gram[1][0] && gram[0][2] == gram[2][0] && gram[1][2] == gram[2][1],
            "Gram matrix must be symmetric"
        );
        Self::new(
            gram[0][0].clone() / two.clone(),
            gram[1][1].clone() / two.clone(),
            gram[2][2].clone() / two,
            gram[1][2].clone(),
            gram[0][2].clone(),
            gram[0][1].clone(),
        )
    }

    /// Coefficients ordered `[a, b, c, f, g, h]`.
    pub fn coefficients(&self) -> [R; 6] {
        [
            self.a.clone(),
            self.b.clone(),
            self.c.clone(),
            self.f.clone(),
            self.g.clone(),
            self.h.clone(),
        ]
    }

    /// Coefficient of `x²`.
    pub fn a(&self) -> &R {
        &self.a
    }

    /// Coefficient of `y²`.
    pub fn b(&self) -> &R {
        &self.b
    }

    /// Coefficient of `z²`.
    pub fn c(&self) -> &R {
        &self.c
    }

    /// Coefficient of `yz`.
    pub fn f(&self) -> &R {
        &self.f
    }

    /// Coefficient of `xz`.
    pub fn g(&self) -> &R {
        &self.g
    }

    /// Coefficient of `xy`.
    pub fn h(&self) -> &R {
        &self.h
    }

    /// Gram matrix `[[2a, h, g], [h, 2b, f], [g, f, 2c]]`.
    pub fn gram(&self) -> Mat3<R> {
        let two = R::from_small(2);
        [
            [two.clone() * self.a.clone(), self.h.clone(), self.g.clone()],
            [self.h.clone(), two.clone() * self.b.clone(), self.f.clone()],
            [self.g.clone(), self.f.clone(), two * self.c.clone()],
        ]
    }

    /// `det(A) / 2 = 4abc + fgh − af² − bg² − ch²`.
    pub fn discriminant(&self) -> R {
        let four = R::from_small(4);
        four * self.a.clone() * self.b.clone() * self.c.clone()
            + self.f.clone() * self.g.clone() * self.h.clone()
            - self.a.clone() * self.f.clone() * self.f.clone()
            - self.b.clone() * self.g.clone() * self.g.clone()
            - self.c.clone() * self.h.clone() * self.h.clone()
    }

    /// `q(x)`.
    pub fn evaluate(&self, x: &Vec3<R>) -> R {
        matrix::quadratic(&self.gram(), x) / R::from_small(2)
    }

    /// `b(x, y) = xᵀ A y`, so that `b(x, x) = 2 q(x)`.
    pub fn bilinear(&self, x: &Vec3<R>, y: &Vec3<R>) -> R {
        matrix::bilinear(&self.gram(), x, y)
    }

    /// Canonical representative of the class of `self`.
    ///
    /// `iso` is right-multiplied by the change of basis, so an isometry into
    /// `self` becomes an isometry into the returned form at the same scale.
    pub fn reduce(&self, iso: &mut Isometry<R>) -> Result<QuadForm<R>, TernError> {
        let basis = reduce::canonical_basis(&self.gram())?;
        let canonical = Self::from_gram(&matrix::congruence(&self.gram(), &basis))?;
        trace!(form = %self, canonical = %canonical, "reduced form");
        *iso = &*iso * &Isometry::from_matrix(basis);
        Ok(canonical)
    }

    /// Canonical representative, discarding the change of basis.
    pub fn canonical(&self) -> Result<QuadForm<R>, TernError> {
        let mut iso = Isometry::identity();
        self.reduce(&mut iso)
    }

    /// Every integral automorphism, proper and improper.
    pub fn automorphisms(&self) -> Result<Vec<Isometry<R>>, TernError> {
        Ok(reduce::automorphisms(&self.gram())?
            .into_iter()
            .map(Isometry::from_matrix)
            .collect())
    }

    /// Order of the full integral orthogonal group (contains `−I`).
    pub fn num_automorphisms(&self) -> Result<usize, TernError> {
        Ok(reduce::automorphisms(&self.gram())?.len())
    }

    /// Automorphisms of determinant `+1`.
    pub fn proper_automorphisms(&self) -> Result<Vec<Isometry<R>>, TernError> {
        Ok(self
            .automorphisms()?
            .into_iter()
            .filter(|aut| aut.determinant().is_one())
            .collect())
    }

    /// The same form over arbitrary precision integers.
    pub fn to_big(&self) -> QuadForm<BigInt> {
        QuadForm {
            a: self.a.to_big(),
            b: self.b.to_big(),
            c: self.c.to_big(),
            f: self.f.to_big(),
            g: self.g.to_big(),
            h: self.h.to_big(),
        }
    }

    /// Re-expresses the form at another width.
    pub fn convert<T: Int>(&self) -> Option<QuadForm<T>> {
        Some(QuadForm {
            a: tern_core::convert(&self.a)?,
            b: tern_core::convert(&self.b)?,
            c: tern_core::convert(&self.c)?,
            f: tern_core::convert(&self.f)?,
            g: tern_core::convert(&self.g)?,
            h: tern_core::convert(&self.h)?,
        })
    }
}

impl<R: Int> fmt::Display for QuadForm<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}, {}, {}]",
            self.a, self.b, self.c, self.f, self.g, self.h
        )
    }
}
