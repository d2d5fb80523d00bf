//! Spinor character subspaces.

use tern_core::{Int, TernError};
use tern_form::Spinor;

use crate::rep::GenusRep;
use crate::store::ClassSet;

/// Conductor of every bitmask over `primes`: `conductors[0] = 1` and
/// `conductors[n] = primes[top] · conductors[n without top]`, `top` being the
/// highest set bit of `n`.
pub fn conductors<R: Int>(primes: &[R]) -> Vec<R> {
    let count = 1usize << primes.len();
    let mut values = Vec::with_capacity(count);
    values.push(R::one());
    for n in 1..count {
        let top = usize::BITS - 1 - n.leading_zeros();
        let value = primes[top as usize].clone() * values[n ^ (1 << top)].clone();
        values.push(value);
    }
    values
}

/// Whether a character vector acts by −1 on the component selected by `mask`.
pub fn is_odd(bits: u64, mask: u64) -> bool {
    (bits & mask).count_ones() % 2 == 1
}

/// Per conductor dimensions and basis positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Subspaces {
    pub(crate) dims: Vec<usize>,
    pub(crate) positions: Vec<Vec<Option<usize>>>,
}

/// A representative contributes to conductor `k` unless one of its proper
/// automorphisms has odd character on `k`. Contributing representatives get
/// consecutive positions in discovery order.
pub(crate) fn assign_positions<R: Int>(
    reps: &ClassSet<GenusRep<R>>,
    spinor: &Spinor<R>,
    num_conductors: usize,
) -> Result<Subspaces, TernError> {
    let mut dims = vec![0usize; num_conductors];
    let mut positions = vec![vec![None; reps.len()]; num_conductors];
    let one = R::one();
    for (n, rep) in reps.iter().enumerate() {
        let characters: Vec<u64> = rep
            .form
            .proper_automorphisms()?
            .iter()
            .map(|aut| spinor.norm(&rep.form, aut, &one))
            .collect();
        for k in 0..num_conductors {
            let mask = k as u64;
            if characters.iter().any(|&bits| is_odd(bits, mask)) {
                continue;
            }
            positions[k][n] = Some(dims[k]);
            dims[k] += 1;
        }
    }
    Ok(Subspaces { dims, positions })
}
