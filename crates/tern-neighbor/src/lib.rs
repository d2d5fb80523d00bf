#![deny(missing_docs)]
#![doc = "Prime fields and p-neighbor construction for ternary quadratic forms."]

/// Prime fields with seeded element search.
pub mod field;
/// Isotropic lines and p-neighbor lattices.
pub mod manager;

pub use field::{Characteristic, FiniteField};
pub use manager::{Neighbor, NeighborManager};
