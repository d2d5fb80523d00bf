#![deny(missing_docs)]
#![doc = "Genus enumeration by p-neighbors, spinor character subspaces and \
Hecke matrices for integral positive definite ternary quadratic forms."]

/// Spinor character subspaces and the conductor recurrence.
pub mod conductor;
/// Re-expressing a genus at another integer width.
pub mod convert;
mod enumerate;
mod finalize;
/// Hecke operators in dense and compressed sparse row form.
pub mod hecke;
/// Scaled mass of a genus.
pub mod mass;
/// Genus representatives and path exponents.
pub mod rep;
/// Serializable genus and Hecke reports.
pub mod report;
/// JSON serialisation helpers for reports.
#[path = "serde.rs"]
pub mod serde_io;
/// Class keyed ordered set.
pub mod store;
/// Prime symbols of a discriminant.
pub mod symbols;

use std::collections::{BTreeMap, BTreeSet};

use num_bigint::BigInt;
use tern_core::{factor, fresh_seed, is_prime, ErrorInfo, Int, TernError};
use tern_form::{QuadForm, Spinor};
use tracing::info;

pub use hecke::{CsrMatrix, DenseMatrix, Transition};
pub use rep::{GenusRep, PrimeExponents};
pub use report::{GenusReport, HeckeMatrix, HeckeReport};
pub use store::{ClassSet, Classed};
pub use symbols::PrimeSymbol;

/// Largest number of prime symbols; conductors are indexed by a 64-bit mask.
pub const MAX_PRIME_SYMBOLS: usize = 63;

/// The classes of a genus with the tables needed for Hecke operators.
///
/// Built once by [`Genus::new`] and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Genus<R> {
    disc: R,
    prime_divisors: Vec<R>,
    conductors: Vec<R>,
    dims: Vec<usize>,
    lut_positions: Vec<Vec<Option<usize>>>,
    mass_x24: BigInt,
    spinor_primes: BTreeSet<u32>,
    reps: ClassSet<GenusRep<R>>,
    spinor: Spinor<R>,
    seed: u64,
}

impl<R: Int> Genus<R> {
    /// Enumerates the genus of `form`.
    ///
    /// `symbols` must list the primes dividing the discriminant (see
    /// [`PrimeSymbol::for_form`]). The mass formula assumes a squarefree
    /// discriminant; other forms fail with `discriminant-not-squarefree`. A missing `seed` is drawn fresh and can be
    /// read back with [`Genus::seed`].
    pub fn new(
        form: &QuadForm<R>,
        symbols: &[PrimeSymbol<R>],
        seed: Option<u64>,
    ) -> Result<Self, TernError> {
        if symbols.len() > MAX_PRIME_SYMBOLS {
            return Err(TernError::Genus(
                ErrorInfo::new("too-many-primes", "at most 63 prime symbols are supported")
                    .with_context("symbols", symbols.len()),
            ));
        }
        validate_symbols(symbols)?;
        require_squarefree(&form.discriminant())?;
        let seed = seed.unwrap_or_else(fresh_seed);

        let mother = form.canonical()?;
        let disc = mother.discriminant();
        let prime_divisors: Vec<R> = symbols.iter().map(|s| s.p.clone()).collect();
        let spinor = Spinor::new(prime_divisors.clone());
        let conductors = conductor::conductors(&prime_divisors);
        let mass_x24 = mass::mass_x24(&mother, symbols)?;

        let enumeration = enumerate::enumerate(mother, &mass_x24, seed)?;
        let mut reps = enumeration.reps;
        finalize::finalize(&mut reps)?;
        let subspaces = conductor::assign_positions(&reps, &spinor, conductors.len())?;

        info!(
            disc = %disc,
            classes = reps.len(),
            mass_x24 = %mass_x24,
            spinor_primes = ?enumeration.spinor_primes,
            seed,
            "genus complete"
        );
        Ok(Self {
            disc,
            prime_divisors,
            conductors,
            dims: subspaces.dims,
            lut_positions: subspaces.positions,
            mass_x24,
            spinor_primes: enumeration.spinor_primes,
            reps,
            spinor,
            seed,
        })
    }

    /// Enumerates the genus of `form` with symbols derived from its
    /// discriminant.
    pub fn from_form(form: &QuadForm<R>, seed: Option<u64>) -> Result<Self, TernError> {
        Self::new(form, &PrimeSymbol::for_form(form), seed)
    }

    /// Number of classes.
    pub fn size(&self) -> usize {
        self.reps.len()
    }

    /// Seed driving every finite field choice.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Discriminant shared by every class.
    pub fn discriminant(&self) -> &R {
        &self.disc
    }

    /// Primes of the symbols, in input order.
    pub fn prime_divisors(&self) -> &[R] {
        &self.prime_divisors
    }

    /// Conductor of every bitmask over [`Genus::prime_divisors`].
    pub fn conductors(&self) -> &[R] {
        &self.conductors
    }

    /// Dimension of every conductor subspace, indexed like
    /// [`Genus::conductors`].
    pub fn dimensions(&self) -> &[usize] {
        &self.dims
    }

    /// Conductor value to subspace dimension.
    pub fn dimension_map(&self) -> BTreeMap<R, usize> {
        self.conductors
            .iter()
            .cloned()
            .zip(self.dims.iter().copied())
            .collect()
    }

    /// Basis position of every representative in the subspace of conductor
    /// index `k`, `None` where the representative does not contribute.
    pub fn lookup(&self, k: usize) -> Option<&[Option<usize>]> {
        self.lut_positions.get(k).map(Vec::as_slice)
    }

    /// `24 · mass`.
    pub fn mass_x24(&self) -> &BigInt {
        &self.mass_x24
    }

    /// Primes at which enumeration found a new class.
    pub fn spinor_primes(&self) -> &BTreeSet<u32> {
        &self.spinor_primes
    }

    /// Representatives in discovery order; index 0 is the root.
    pub fn representatives(&self) -> &ClassSet<GenusRep<R>> {
        &self.reps
    }

    /// The root form every isometry is relative to.
    pub fn mother(&self) -> &QuadForm<R> {
        &self.reps[0].form
    }

    /// The spinor character evaluator.
    pub fn spinor(&self) -> &Spinor<R> {
        &self.spinor
    }
}

fn validate_symbols<R: Int>(symbols: &[PrimeSymbol<R>]) -> Result<(), TernError> {
    let mut seen = BTreeSet::new();
    for symbol in symbols {
        let is_valid = symbol.p.to_u64().map_or(false, is_prime);
        if !is_valid {
            return Err(TernError::Genus(
                ErrorInfo::new("not-prime", "prime symbol does not carry a prime")
                    .with_context("p", &symbol.p),
            ));
        }
        if !seen.insert(symbol.p.clone()) {
            return Err(TernError::Genus(
                ErrorInfo::new("duplicate-prime-symbol", "each prime may appear once")
                    .with_context("p", &symbol.p),
            ));
        }
    }
    Ok(())
}

fn require_squarefree<R: Int>(disc: &R) -> Result<(), TernError> {
    match factor(disc).into_iter().find(|(_, e)| *e > 1) {
        None => Ok(()),
        Some((p, e)) => Err(TernError::Genus(
            ErrorInfo::new(
                "discriminant-not-squarefree",
                "the mass formula needs a squarefree discriminant",
            )
            .with_context("discriminant", disc)
            .with_context("p", &p)
            .with_context("exponent", e),
        )),
    }
}
