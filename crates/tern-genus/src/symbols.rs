//! Local data at the primes dividing the discriminant.

use num_bigint::BigInt;
use tern_core::{factor, hilbert_symbol, Int};
use tern_form::QuadForm;

/// A prime dividing the discriminant, its exponent there, and whether the
/// form is anisotropic (Hilbert symbol −1) at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimeSymbol<R> {
    /// The prime.
    pub p: R,
    /// Exponent of `p` in the discriminant.
    pub power: u32,
    /// Whether the local Hilbert symbol is −1.
    pub ramified: bool,
}

impl<R: Int> PrimeSymbol<R> {
    /// Builds a symbol from its parts.
    pub fn new(p: R, power: u32, ramified: bool) -> Self {
        Self { p, power, ramified }
    }

    /// One symbol per prime dividing the discriminant of `form`, in
    /// increasing prime order.
    pub fn for_form(form: &QuadForm<R>) -> Vec<Self> {
        let (a, b) = hasse_arguments(form);
        factor(&form.discriminant())
            .into_iter()
            .map(|(p, power)| {
                let ramified = hilbert_symbol(&a, &b, &p.to_big()) == -1;
                Self { p, power, ramified }
            })
            .collect()
    }

    /// Re-expresses the symbol at another width.
    pub fn convert<T: Int>(&self) -> Option<PrimeSymbol<T>> {
        Some(PrimeSymbol {
            p: tern_core::convert(&self.p)?,
            power: self.power,
            ramified: self.ramified,
        })
    }
}

/// `(h² − 4ab, −a·disc)`, whose Hilbert symbol at `p` is the local Hasse
/// invariant of the form.
pub(crate) fn hasse_arguments<R: Int>(form: &QuadForm<R>) -> (BigInt, BigInt) {
    let a = form.a().to_big();
    let b = form.b().to_big();
    let h = form.h().to_big();
    let disc = form.discriminant().to_big();
    (&h * &h - BigInt::from(4) * &a * &b, -(a * disc))
}
