//! p-neighbor search for the classes of a genus.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::Arc;

use num_bigint::BigInt;
use tern_core::{next_prime, ErrorInfo, Int, TernError};
use tern_form::QuadForm;
use tern_neighbor::{FiniteField, NeighborManager};
use tracing::{debug, trace};

use crate::mass::{class_weight, estimated_size};
use crate::rep::GenusRep;
use crate::store::ClassSet;

/// Consecutive primes without a new class before the search gives up.
const STALL_LIMIT: usize = 24;

/// Classes in discovery order plus the primes that discovered them.
pub(crate) struct Enumeration<R> {
    pub(crate) reps: ClassSet<GenusRep<R>>,
    pub(crate) spinor_primes: BTreeSet<u32>,
}

/// Scans neighbors of every known class at increasing good primes until
/// `Σ 48/|O|` reaches `mass_x24`. Classes found during a scan are scanned at
/// the same prime.
pub(crate) fn enumerate<R: Int>(
    mother: QuadForm<R>,
    mass_x24: &BigInt,
    seed: u64,
) -> Result<Enumeration<R>, TernError> {
    let disc = mother.discriminant();
    let mut mass_sum = class_weight(&mother)?;
    let mut reps = ClassSet::with_capacity(estimated_size(mass_x24));
    reps.insert(GenusRep::root(mother));
    let mut spinor_primes = BTreeSet::new();

    let mut prime = 1u64;
    let mut stalled = 0usize;
    let mut done = reached(&mass_sum, mass_x24)?;
    while !done {
        prime = next_good_prime(prime, &disc);
        let p = u32::try_from(prime).map_err(|_| {
            TernError::Genus(
                ErrorInfo::new("prime-out-of-range", "neighbor primes must fit in 32 bits")
                    .with_context("p", prime),
            )
        })?;
        let field = Arc::new(FiniteField::new(p, seed)?);
        let found_before = reps.len();
        trace!(p, classes = reps.len(), "scanning neighbors");

        let mut cursor = 0;
        while !done && cursor < reps.len() {
            let manager = NeighborManager::new(reps[cursor].form.clone(), Arc::clone(&field))?;
            for t in 0..=prime {
                let neighbor = manager.get_reduced_neighbor_rep(t)?;
                if reps.contains(&neighbor.form) {
                    continue;
                }
                mass_sum += class_weight(&neighbor.form)?;
                let rep = GenusRep::child(
                    neighbor.form,
                    neighbor.isometry,
                    cursor,
                    R::from_small(i64::from(p)),
                );
                reps.insert(rep);
                spinor_primes.insert(p);
                debug!(
                    index = reps.len() - 1,
                    parent = cursor,
                    p,
                    mass_sum = %mass_sum,
                    "new genus representative"
                );
                done = reached(&mass_sum, mass_x24)?;
                if done {
                    break;
                }
            }
            cursor += 1;
        }

        stalled = if reps.len() == found_before { stalled + 1 } else { 0 };
        if !done && stalled >= STALL_LIMIT {
            return Err(TernError::Genus(
                ErrorInfo::new("enumeration-stalled", "neighbor search stopped finding classes")
                    .with_context("classes", reps.len())
                    .with_context("mass_sum", &mass_sum)
                    .with_context("mass_x24", mass_x24)
                    .with_hint("check that the prime symbols match the discriminant"),
            ));
        }
    }
    Ok(Enumeration {
        reps,
        spinor_primes,
    })
}

fn reached(mass_sum: &BigInt, mass_x24: &BigInt) -> Result<bool, TernError> {
    match mass_sum.cmp(mass_x24) {
        Ordering::Less => Ok(false),
        Ordering::Equal => Ok(true),
        Ordering::Greater => Err(TernError::Genus(
            ErrorInfo::new("mass-overshoot", "classes found exceed the mass of the genus")
                .with_context("mass_sum", mass_sum)
                .with_context("mass_x24", mass_x24),
        )),
    }
}

/// Smallest prime above `prime` that does not divide `disc`.
pub(crate) fn next_good_prime<R: Int>(prime: u64, disc: &R) -> u64 {
    let mut candidate = next_prime(prime);
    while disc.is_multiple_of(&R::from_small(candidate as i64)) {
        candidate = next_prime(candidate);
    }
    candidate
}
