//! Integer widths the engine can be instantiated over.
//!
//! Forms, isometries and genus tables are generic over [`Int`]. The native
//! widths (`i64`, `i128`) are fast but can overflow on large discriminants or
//! long neighbor chains; [`BigInt`] never overflows. A genus built at one
//! width can be re-expressed at another through the explicit conversion in
//! `tern-genus`, which goes through [`Int::to_big`] / [`Int::from_big`].

use std::fmt::{Debug, Display};
use std::hash::Hash;

use num_bigint::BigInt;
use num_integer::{Integer, Roots};
use num_traits::{FromPrimitive, Signed, ToPrimitive};

/// Signed integer type usable as the coefficient ring of the engine.
pub trait Int:
    Integer
    + Roots
    + Signed
    + FromPrimitive
    + ToPrimitive
    + Clone
    + Hash
    + Debug
    + Display
    + Send
    + Sync
    + 'static
{
    /// Short label used in reports and logs.
    const WIDTH: &'static str;

    /// Embeds a machine integer. Every supported width contains `i64`.
    fn from_small(value: i64) -> Self;

    /// Widens the value to an arbitrary precision integer.
    fn to_big(&self) -> BigInt;

    /// Narrows an arbitrary precision integer, `None` when it does not fit.
    fn from_big(value: &BigInt) -> Option<Self>;
}

impl Int for i64 {
    const WIDTH: &'static str = "i64";

    fn from_small(value: i64) -> Self {
        value
    }

    fn to_big(&self) -> BigInt {
        BigInt::from(*self)
    }

    fn from_big(value: &BigInt) -> Option<Self> {
        value.to_i64()
    }
}

impl Int for i128 {
    const WIDTH: &'static str = "i128";

    fn from_small(value: i64) -> Self {
        i128::from(value)
    }

    fn to_big(&self) -> BigInt {
        BigInt::from(*self)
    }

    fn from_big(value: &BigInt) -> Option<Self> {
        value.to_i128()
    }
}

impl Int for BigInt {
    const WIDTH: &'static str = "bigint";

    fn from_small(value: i64) -> Self {
        BigInt::from(value)
    }

    fn to_big(&self) -> BigInt {
        self.clone()
    }

    fn from_big(value: &BigInt) -> Option<Self> {
        Some(value.clone())
    }
}

/// Re-expresses `value` at another width.
pub fn convert<R: Int, T: Int>(value: &R) -> Option<T> {
    T::from_big(&value.to_big())
}
