#![deny(missing_docs)]
#![doc = "Integral ternary quadratic forms: canonical reduction, automorphism \
groups, scaled isometries, lattice bases and spinor norm characters."]

/// Quadratic form type and class operations.
pub mod form;
/// Scaled isometries and their composition.
pub mod isometry;
/// Lattice bases from generating sets.
pub mod lattice;
/// 3×3 integer matrix kernel.
pub mod matrix;
mod reduce;
/// Spinor norm character evaluation.
pub mod spinor;

pub use form::QuadForm;
pub use isometry::Isometry;
pub use lattice::lattice_basis;
pub use matrix::{Mat3, Vec3};
pub use spinor::Spinor;
