//! Genus representatives and their discovery path bookkeeping.

use std::collections::BTreeMap;

use num_bigint::BigInt;
use num_traits::One;
use tern_core::Int;
use tern_form::{Isometry, QuadForm};

use crate::store::Classed;

/// Multiplicities of the primes along a discovery path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimeExponents<R> {
    exponents: BTreeMap<R, u32>,
}

impl<R: Int> PrimeExponents<R> {
    /// Empty path.
    pub fn new() -> Self {
        Self {
            exponents: BTreeMap::new(),
        }
    }

    /// Records one more step at `p`.
    pub fn increment(&mut self, p: &R) {
        *self.exponents.entry(p.clone()).or_insert(0) += 1;
    }

    /// Multiplicity of `p`.
    pub fn get(&self, p: &R) -> u32 {
        self.exponents.get(p).copied().unwrap_or(0)
    }

    /// `Π p^e`.
    pub fn pow(&self) -> R {
        tern_core::pow_product(self.exponents.iter())
    }

    /// `Π p^e` in arbitrary precision.
    pub fn pow_big(&self) -> BigInt {
        self.exponents
            .iter()
            .fold(BigInt::one(), |acc, (p, e)| acc * num_traits::pow(p.to_big(), *e as usize))
    }

    /// `(prime, multiplicity)` pairs in increasing prime order.
    pub fn iter(&self) -> impl Iterator<Item = (&R, &u32)> {
        self.exponents.iter()
    }

    /// Whether the path is empty.
    pub fn is_empty(&self) -> bool {
        self.exponents.is_empty()
    }

    /// Re-expresses the primes at another width.
    pub fn convert<T: Int>(&self) -> Option<PrimeExponents<T>> {
        let exponents = self
            .exponents
            .iter()
            .map(|(p, e)| tern_core::convert(p).map(|p| (p, *e)))
            .collect::<Option<BTreeMap<T, u32>>>()?;
        Some(PrimeExponents { exponents })
    }
}

impl<R: Int> Default for PrimeExponents<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// One class of the genus.
///
/// During enumeration `to_mother` holds the edge isometry from the parent
/// (scale `prime`) and `from_mother` is the identity; finalisation replaces
/// both with the absolute isometries to and from the root form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenusRep<R> {
    /// Canonical form of the class.
    pub form: QuadForm<R>,
    /// Isometry from the root form to `form` at scale `exponents.pow()`.
    pub to_mother: Isometry<R>,
    /// Isometry from `form` to the root form at scale `exponents.pow()`.
    pub from_mother: Isometry<R>,
    /// Index of the representative this one was found from.
    pub parent: Option<usize>,
    /// Prime of the discovering neighbor step, 1 for the root.
    pub prime: R,
    /// Primes along the discovery path.
    pub exponents: PrimeExponents<R>,
}

impl<R: Int> GenusRep<R> {
    /// The root representative.
    pub fn root(form: QuadForm<R>) -> Self {
        Self {
            form,
            to_mother: Isometry::identity(),
            from_mother: Isometry::identity(),
            parent: None,
            prime: R::one(),
            exponents: PrimeExponents::new(),
        }
    }

    /// A representative reached from `parent` by a `prime`-neighbor step.
    pub fn child(form: QuadForm<R>, edge: Isometry<R>, parent: usize, prime: R) -> Self {
        Self {
            form,
            to_mother: edge,
            from_mother: Isometry::identity(),
            parent: Some(parent),
            prime,
            exponents: PrimeExponents::new(),
        }
    }

    /// Re-expresses the representative at another width.
    pub fn convert<T: Int>(&self) -> Option<GenusRep<T>> {
        Some(GenusRep {
            form: self.form.convert()?,
            to_mother: self.to_mother.convert()?,
            from_mother: self.from_mother.convert()?,
            parent: self.parent,
            prime: tern_core::convert(&self.prime)?,
            exponents: self.exponents.convert()?,
        })
    }
}

impl<R: Int> Classed for GenusRep<R> {
    type Class = QuadForm<R>;

    fn class(&self) -> &QuadForm<R> {
        &self.form
    }
}
