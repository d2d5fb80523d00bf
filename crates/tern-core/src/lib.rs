#![deny(missing_docs)]
#![doc = "Core error, randomness, precision and number theory helpers shared by the tern crates."]

pub mod errors;
pub mod int;
pub mod math;
pub mod provenance;
pub mod rng;

pub use errors::{ErrorInfo, TernError};
pub use int::{convert, Int};
pub use math::{factor, hilbert_symbol, is_prime, legendre, next_prime, pow_product, valuation};
pub use provenance::{content_hash, ReportProvenance, SchemaVersion};
pub use rng::{derive_substream_seed, fresh_seed, RngHandle};

/// Re-export of the arbitrary precision integer used for masses and widening.
pub use num_bigint::BigInt;
