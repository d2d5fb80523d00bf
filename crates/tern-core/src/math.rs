//! Elementary number theory used by prime selection and the mass formula.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::int::Int;

/// Returns whether `n` is prime. Trial division; field primes are small.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let mut d = 5u64;
    while d <= n / d {
        if n % d == 0 || n % (d + 2) == 0 {
            return false;
        }
        d += 6;
    }
    true
}

/// Returns the smallest prime strictly greater than `n`.
pub fn next_prime(n: u64) -> u64 {
    let mut candidate = n.saturating_add(1).max(2);
    while !is_prime(candidate) {
        candidate += 1;
    }
    candidate
}

/// Splits `n = p^v · rest` with `p ∤ rest`. `n` must be nonzero.
pub fn valuation<R: Int>(n: &R, p: &R) -> (u32, R) {
    let mut rest = n.clone();
    let mut v = 0u32;
    if rest.is_zero() {
        return (v, rest);
    }
    loop {
        let (q, r) = rest.div_rem(p);
        if !r.is_zero() {
            return (v, rest);
        }
        rest = q;
        v += 1;
    }
}

/// Factors `|n|` into `(prime, exponent)` pairs in increasing order.
pub fn factor<R: Int>(n: &R) -> Vec<(R, u32)> {
    let mut rest = n.abs();
    let mut factors = Vec::new();
    if rest.is_zero() {
        return factors;
    }
    let two = R::from_small(2);
    let mut d = two.clone();
    while d.clone() * d.clone() <= rest {
        let (v, remaining) = valuation(&rest, &d);
        if v > 0 {
            factors.push((d.clone(), v));
            rest = remaining;
        }
        d = if d == two {
            R::from_small(3)
        } else {
            d + two.clone()
        };
    }
    if rest > R::one() {
        factors.push((rest, 1));
    }
    factors
}

/// Legendre symbol `(a / p)` for an odd prime `p`: 1, -1, or 0 when `p | a`.
pub fn legendre(a: &BigInt, p: &BigInt) -> i32 {
    let residue = a.mod_floor(p);
    if residue.is_zero() {
        return 0;
    }
    let exponent = (p - BigInt::one()) / BigInt::from(2);
    if residue.modpow(&exponent, p).is_one() {
        1
    } else {
        -1
    }
}

/// Local Hilbert symbol `(a, b)_p` at a finite prime `p`.
///
/// Returns 0 when either argument is zero (the symbol is undefined there).
pub fn hilbert_symbol(a: &BigInt, b: &BigInt, p: &BigInt) -> i32 {
    if a.is_zero() || b.is_zero() {
        return 0;
    }
    let (alpha, u) = valuation(a, p);
    let (beta, v) = valuation(b, p);

    if *p == BigInt::from(2) {
        let eps = |x: &BigInt| u32::from(x.mod_floor(&BigInt::from(4)) == BigInt::from(3));
        let omega = |x: &BigInt| {
            let r = x.mod_floor(&BigInt::from(8));
            u32::from(r == BigInt::from(3) || r == BigInt::from(5))
        };
        let e = eps(&u) * eps(&v) + alpha * omega(&v) + beta * omega(&u);
        return if e % 2 == 0 { 1 } else { -1 };
    }

    let mut symbol = 1;
    if alpha % 2 == 1 && beta % 2 == 1 && p.mod_floor(&BigInt::from(4)) == BigInt::from(3) {
        symbol = -symbol;
    }
    if beta % 2 == 1 {
        symbol *= legendre(&u, p);
    }
    if alpha % 2 == 1 {
        symbol *= legendre(&v, p);
    }
    symbol
}

/// Product `Π p^e` over the given pairs.
pub fn pow_product<'a, R: Int, I>(pairs: I) -> R
where
    I: IntoIterator<Item = (&'a R, &'a u32)>,
{
    pairs.into_iter().fold(R::one(), |acc, (p, e)| {
        acc * num_traits::pow(p.clone(), *e as usize)
    })
}
