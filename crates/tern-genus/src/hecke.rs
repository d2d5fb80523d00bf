//! Hecke operators on the conductor subspaces.
//!
//! Both encodings share [`Genus::row_transitions`]: for a row `n` it lists the
//! class and spinor character of each of the `p + 1` neighbors of
//! representative `n`. A transition to class `r` with character `bits`
//! contributes `±1` at `(pos_k(n), pos_k(r))` in every subspace `k` where
//! both positions exist, `−1` exactly when `bits & k` has odd parity.

use std::collections::BTreeMap;
use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tern_core::{is_prime, ErrorInfo, Int, TernError};
use tern_neighbor::{FiniteField, NeighborManager};
use tracing::debug;

use crate::Genus;

/// Square matrix stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenseMatrix {
    /// Number of rows and columns.
    pub dim: usize,
    /// Entries, `data[row * dim + col]`.
    pub data: Vec<i64>,
}

impl DenseMatrix {
    /// The zero matrix.
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            data: vec![0; dim * dim],
        }
    }

    /// Entry at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> i64 {
        self.data[row * self.dim + col]
    }

    /// Sum of row `row`.
    pub fn row_sum(&self, row: usize) -> i64 {
        self.data[row * self.dim..(row + 1) * self.dim].iter().sum()
    }

    /// Sum of the diagonal.
    pub fn trace(&self) -> i64 {
        (0..self.dim).map(|i| self.get(i, i)).sum()
    }
}

/// Square matrix in compressed sparse row form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsrMatrix {
    /// Number of rows and columns.
    pub dim: usize,
    /// Nonzero entries row by row.
    pub data: Vec<i64>,
    /// Column of each entry of `data`.
    pub indices: Vec<usize>,
    /// Row `i` occupies `data[indptr[i]..indptr[i + 1]]`.
    pub indptr: Vec<usize>,
}

impl CsrMatrix {
    fn empty(dim: usize) -> Self {
        Self {
            dim,
            data: Vec::new(),
            indices: Vec::new(),
            indptr: vec![0; dim + 1],
        }
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    /// Expands to a dense matrix.
    pub fn to_dense(&self) -> DenseMatrix {
        let mut dense = DenseMatrix::zeros(self.dim);
        for row in 0..self.dim {
            for idx in self.indptr[row]..self.indptr[row + 1] {
                dense.data[row * self.dim + self.indices[idx]] += self.data[idx];
            }
        }
        dense
    }
}

/// A neighbor transition packed as `(target << num_primes) | character`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Transition(u128);

impl Transition {
    /// Packs a target class index with its character bits.
    pub fn pack(target: usize, character: u64, num_primes: usize) -> Self {
        debug_assert!(num_primes >= 64 || character >> num_primes == 0);
        Self(((target as u128) << num_primes) | u128::from(character))
    }

    /// Target class index.
    pub fn target(self, num_primes: usize) -> usize {
        (self.0 >> num_primes) as usize
    }

    /// Character bits.
    pub fn character(self, num_primes: usize) -> u64 {
        (self.0 & ((1u128 << num_primes) - 1)) as u64
    }
}

/// `−1` when `bits` has odd parity, else `1`.
pub fn char_val(bits: u64) -> i64 {
    if bits.count_ones() % 2 == 1 {
        -1
    } else {
        1
    }
}

impl<R: Int> Genus<R> {
    /// Hecke operator at `p` on every conductor subspace, as dense matrices
    /// keyed by conductor.
    pub fn hecke_matrix_dense(&self, p: u32) -> Result<BTreeMap<R, DenseMatrix>, TernError> {
        let field = self.hecke_field(p)?;
        debug!(p, classes = self.size(), "building dense hecke matrices");
        let num_primes = self.prime_divisors.len();
        let mut matrices: Vec<DenseMatrix> = self.dims.iter().map(|&d| DenseMatrix::zeros(d)).collect();

        for n in 0..self.size() {
            let transitions = self.row_transitions(n, &field)?;
            for (k, matrix) in matrices.iter_mut().enumerate() {
                let lut = &self.lut_positions[k];
                let Some(row) = lut[n] else {
                    continue;
                };
                for transition in &transitions {
                    let Some(col) = lut[transition.target(num_primes)] else {
                        continue;
                    };
                    matrix.data[row * matrix.dim + col] +=
                        char_val(transition.character(num_primes) & k as u64);
                }
            }
        }
        Ok(self.conductors.iter().cloned().zip(matrices).collect())
    }

    /// Hecke operator at `p` on every conductor subspace, in CSR form keyed
    /// by conductor.
    pub fn hecke_matrix_sparse(&self, p: u32) -> Result<BTreeMap<R, CsrMatrix>, TernError> {
        let field = self.hecke_field(p)?;
        debug!(p, classes = self.size(), "building sparse hecke matrices");
        let num_primes = self.prime_divisors.len();
        let mut matrices: Vec<CsrMatrix> = self.dims.iter().map(|&d| CsrMatrix::empty(d)).collect();
        let mut rows: Vec<Vec<i64>> = self.dims.iter().map(|&d| vec![0; d]).collect();

        for n in 0..self.size() {
            let transitions = self.row_transitions(n, &field)?;
            for (k, (matrix, row)) in matrices.iter_mut().zip(rows.iter_mut()).enumerate() {
                let lut = &self.lut_positions[k];
                let Some(row_pos) = lut[n] else {
                    continue;
                };
                for transition in &transitions {
                    if let Some(col) = lut[transition.target(num_primes)] {
                        row[col] += char_val(transition.character(num_primes) & k as u64);
                    }
                }

                let mut nnz = 0;
                for (col, value) in row.iter_mut().enumerate() {
                    if *value != 0 {
                        matrix.data.push(*value);
                        matrix.indices.push(col);
                        *value = 0;
                        nnz += 1;
                    }
                }
                matrix.indptr[row_pos + 1] = matrix.indptr[row_pos] + nnz;
            }
        }
        Ok(self.conductors.iter().cloned().zip(matrices).collect())
    }

    /// Dense Hecke operators at several primes, computed in parallel.
    pub fn hecke_matrices_dense(
        &self,
        primes: &[u32],
    ) -> Result<BTreeMap<u32, BTreeMap<R, DenseMatrix>>, TernError> {
        primes
            .par_iter()
            .map(|&p| self.hecke_matrix_dense(p).map(|matrices| (p, matrices)))
            .collect()
    }

    /// Sparse Hecke operators at several primes, computed in parallel.
    pub fn hecke_matrices_sparse(
        &self,
        primes: &[u32],
    ) -> Result<BTreeMap<u32, BTreeMap<R, CsrMatrix>>, TernError> {
        primes
            .par_iter()
            .map(|&p| self.hecke_matrix_sparse(p).map(|matrices| (p, matrices)))
            .collect()
    }

    fn hecke_field(&self, p: u32) -> Result<Arc<FiniteField>, TernError> {
        if !is_prime(u64::from(p)) {
            return Err(TernError::Hecke(
                ErrorInfo::new("not-prime", "Hecke operators are indexed by primes")
                    .with_context("p", p),
            ));
        }
        if self.disc.is_multiple_of(&R::from_small(i64::from(p))) {
            return Err(TernError::Hecke(
                ErrorInfo::new("prime-divides-discriminant", "Hecke prime must not divide the discriminant")
                    .with_context("p", p)
                    .with_context("discriminant", &self.disc),
            ));
        }
        Ok(Arc::new(FiniteField::new(p, self.seed)?))
    }

    /// Class index and spinor character of each `p`-neighbor of
    /// representative `n`.
    pub fn row_transitions(
        &self,
        n: usize,
        field: &Arc<FiniteField>,
    ) -> Result<Vec<Transition>, TernError> {
        let num_primes = self.prime_divisors.len();
        let p = R::from_small(field.prime() as i64);
        let current = &self.reps[n];
        let manager = NeighborManager::new(current.form.clone(), Arc::clone(field))?;
        let mother = self.mother();

        let mut transitions = Vec::with_capacity(manager.num_neighbors() as usize);
        for t in 0..=field.prime() {
            let neighbor = manager.get_reduced_neighbor_rep(t)?;
            let r = self.reps.index_of(&neighbor.form).ok_or_else(|| {
                TernError::Hecke(
                    ErrorInfo::new("neighbor-class-missing", "neighbor class is not in the genus")
                        .with_context("row", n)
                        .with_context("t", t)
                        .with_context("p", field.prime())
                        .with_context("form", &neighbor.form)
                        .with_hint("the genus is incomplete or reduction is not canonical"),
                )
            })?;

            let bits = if r == n {
                self.spinor.norm(&neighbor.form, &neighbor.isometry, &p)
            } else {
                let target = &self.reps[r];
                let path = &(&current.to_mother.to_big() * &neighbor.isometry.to_big())
                    * &target.from_mother.to_big();
                let scale = p.to_big() * current.exponents.pow_big() * target.exponents.pow_big();
                self.spinor.norm_exact(mother, &path, &scale)
            };
            transitions.push(Transition::pack(r, bits, num_primes));
        }
        Ok(transitions)
    }
}
