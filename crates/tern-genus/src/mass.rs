//! Mass of a genus, scaled by 24.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::ToPrimitive;
use tern_core::{hilbert_symbol, ErrorInfo, Int, TernError};
use tern_form::QuadForm;

use crate::symbols::{hasse_arguments, PrimeSymbol};

/// `2·disc · Π (p + (a′, b′)_p) / (2p)` over the symbols, which is 24 times
/// the mass. The quotient must be exact.
pub fn mass_x24<R: Int>(form: &QuadForm<R>, symbols: &[PrimeSymbol<R>]) -> Result<BigInt, TernError> {
    let (a, b) = hasse_arguments(form);
    let disc = form.discriminant().to_big();
    let mut numerator = BigInt::from(2) * &disc;
    let mut denominator = BigInt::from(1);
    for symbol in symbols {
        let p = symbol.p.to_big();
        numerator *= &p + BigInt::from(hilbert_symbol(&a, &b, &p));
        denominator *= BigInt::from(2) * &p;
    }
    let (quotient, remainder) = numerator.div_rem(&denominator);
    if remainder != BigInt::from(0) {
        return Err(TernError::Genus(
            ErrorInfo::new("mass-not-integral", "scaled mass is not an integer")
                .with_context("numerator", &numerator)
                .with_context("denominator", &denominator)
                .with_hint("the prime symbols must list every prime dividing the discriminant"),
        ));
    }
    Ok(quotient)
}

/// Contribution `48 / |O(q)|` of one class to the scaled mass sum.
pub fn class_weight<R: Int>(form: &QuadForm<R>) -> Result<BigInt, TernError> {
    let order = form.num_automorphisms()?;
    debug_assert!(order > 0 && 48 % order == 0, "automorphism group order must divide 48");
    Ok(BigInt::from(48 / order.max(1)))
}

/// Expected number of classes, `⌈mass_x24 / 24⌉`, used to size the store.
pub fn estimated_size(mass_x24: &BigInt) -> usize {
    let (quotient, remainder) = mass_x24.div_rem(&BigInt::from(24));
    let rounded = if remainder > BigInt::from(0) {
        quotient + 1
    } else {
        quotient
    };
    rounded.to_usize().unwrap_or(1).max(1)
}
