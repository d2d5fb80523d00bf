//! Spinor norm characters of rational rotations.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use tern_core::{valuation, Int};

use crate::form::QuadForm;
use crate::isometry::Isometry;
use crate::matrix::{self, Mat3};

/// Evaluates spinor norms modulo squares at a fixed list of primes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spinor<R> {
    primes: Vec<R>,
}

impl<R: Int> Spinor<R> {
    /// Evaluator for the given ordered primes; bit `i` of every character
    /// refers to `primes[i]`.
    pub fn new(primes: Vec<R>) -> Self {
        Self { primes }
    }

    /// The ordered primes.
    pub fn primes(&self) -> &[R] {
        &self.primes
    }

    /// Character bits of the rotation `σ = iso / scale` of `form`.
    ///
    /// `iso` must satisfy `isoᵀ A iso = scale² A` with positive determinant.
    /// `σ` is written as a product of reflections `τ_u` by sending `e₀`, `e₁`,
    /// `e₂` back to themselves in turn; the spinor norm is `Π Q(u)` modulo
    /// squares and bit `i` is set when its valuation at `primes[i]` is odd.
    pub fn norm(&self, form: &QuadForm<R>, iso: &Isometry<R>, scale: &R) -> u64 {
        self.norm_exact(form, &iso.to_big(), &scale.to_big())
    }

    /// [`Spinor::norm`] for a rotation already lifted to arbitrary precision,
    /// such as a product of chained isometries whose entries or scale leave
    /// the native range.
    pub fn norm_exact(&self, form: &QuadForm<R>, iso: &Isometry<BigInt>, scale: &BigInt) -> u64 {
        let gram: Mat3<BigInt> = matrix::to_big(&form.gram());
        debug_assert!(iso.determinant().is_positive(), "spinor norm needs a rotation");
        debug_assert!(
            matrix::congruence(&gram, iso.matrix()) == matrix::scale(&gram, &(scale * scale)),
            "spinor norm needs an automorphism at the given scale"
        );

        let mut sigma: Mat3<BigInt> = iso.matrix().clone();
        let mut denom = scale.clone();
        let primes: Vec<BigInt> = self.primes.iter().map(Int::to_big).collect();
        let mut bits = 0u64;

        for i in 0..3 {
            let mut u = matrix::column(&sigma, i);
            u[i] -= &denom;
            if matrix::is_zero(&u) {
                continue;
            }
            let au = matrix::mul_vec(&gram, &u);
            let norm = matrix::dot(&u, &au);
            for (bit, p) in primes.iter().enumerate() {
                if valuation(&norm, p).0 % 2 == 1 {
                    bits ^= 1 << bit;
                }
            }
            // τ_u · σ = (N·I − 2·u·uᵀA) · S / (N · s)
            let two = BigInt::from(2);
            let reflection = matrix::from_fn(|r, c| {
                let diagonal = if r == c { norm.clone() } else { BigInt::zero() };
                diagonal - &two * &u[r] * &au[c]
            });
            sigma = matrix::mul(&reflection, &sigma);
            denom *= &norm;

            let content = sigma
                .iter()
                .flatten()
                .fold(denom.clone(), |acc, x| acc.gcd(x));
            if !content.is_one() {
                sigma = matrix::div_exact(&sigma, &content);
                denom /= &content;
            }
        }
        debug_assert!(
            sigma == matrix::scalar(denom.clone()),
            "reflection decomposition must end at the identity"
        );
        bits
    }

    /// Re-expresses the evaluator at another width.
    pub fn convert<T: Int>(&self) -> Option<Spinor<T>> {
        let primes = self
            .primes
            .iter()
            .map(tern_core::convert)
            .collect::<Option<Vec<T>>>()?;
        Some(Spinor::new(primes))
    }
}
