//! Bases of integral lattices given by generators.

use tern_core::Int;

use crate::matrix::{self, Mat3, Vec3};

/// Triangular basis of the lattice spanned by `generators`, returned as the
/// columns of a matrix. `None` when the generators do not span a full rank
/// lattice.
///
/// For each coordinate in turn the pool is reduced by Euclid's algorithm on
/// that coordinate until a single generator has a nonzero entry there; that
/// generator becomes the next basis vector.
pub fn lattice_basis<R: Int>(generators: &[Vec3<R>]) -> Option<Mat3<R>> {
    let mut pool: Vec<Vec3<R>> = generators
        .iter()
        .filter(|v| !matrix::is_zero(v))
        .cloned()
        .collect();
    let mut basis: Vec<Vec3<R>> = Vec::with_capacity(3);

    for col in 0..3 {
        loop {
            let pivot = pool
                .iter()
                .enumerate()
                .filter(|(_, v)| !v[col].is_zero())
                .min_by(|(_, x), (_, y)| x[col].abs().cmp(&y[col].abs()))
                .map(|(idx, _)| idx)?;
            let pivot_vec = pool[pivot].clone();
            let mut reduced_any = false;
            for (idx, v) in pool.iter_mut().enumerate() {
                if idx == pivot || v[col].is_zero() {
                    continue;
                }
                let q = v[col].div_floor(&pivot_vec[col]);
                for k in 0..3 {
                    v[k] = v[k].clone() - q.clone() * pivot_vec[k].clone();
                }
                reduced_any = true;
            }
            pool.retain(|v| !matrix::is_zero(v));
            if !reduced_any {
                let idx = pool.iter().position(|v| *v == pivot_vec)?;
                basis.push(pool.swap_remove(idx));
                break;
            }
        }
    }

    Some(matrix::from_columns([&basis[0], &basis[1], &basis[2]]))
}
