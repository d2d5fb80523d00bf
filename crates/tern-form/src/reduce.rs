//! Canonical reduction and automorphism enumeration for ternary Gram matrices.
//!
//! Every routine works on the Gram matrix `A` (even diagonal) and returns
//! integral change-of-basis matrices whose columns are the new basis vectors
//! expressed in the old basis.

use itertools::iproduct;
use tern_core::{ErrorInfo, Int, TernError};

use crate::matrix::{self, Mat3, Vec3};

/// Norm and coordinates of a lattice vector.
#[derive(Debug, Clone)]
pub(crate) struct ShortVector<R> {
    pub(crate) norm: R,
    pub(crate) coords: Vec3<R>,
}

/// Pairwise (Lagrange style) reduction. Returns the reduced Gram matrix and
/// the unimodular, determinant one basis realising it.
///
/// A step fires while `2|A_ij| > A_ii` for some `i ≠ j`, replacing `v_j` by
/// `v_j − k·v_i` with `k` the nearest integer to `A_ij / A_ii`. Each step
/// strictly lowers `A_jj`, so the loop terminates.
pub(crate) fn pair_reduce<R: Int>(gram: &Mat3<R>) -> (Mat3<R>, Mat3<R>) {
    let two = R::from_small(2);
    let mut g = gram.clone();
    let mut basis = matrix::identity::<R>();
    loop {
        let mut changed = false;
        for (i, j) in iproduct!(0..3, 0..3) {
            if i == j {
                continue;
            }
            let qi = g[i][i].clone();
            let bij = g[i][j].clone();
            if two.clone() * bij.abs() <= qi {
                continue;
            }
            let k = (two.clone() * bij + qi.clone()).div_floor(&(two.clone() * qi));
            let mut step = matrix::identity::<R>();
            step[i][j] = -k;
            g = matrix::congruence(&g, &step);
            basis = matrix::mul(&basis, &step);
            changed = true;
        }
        if !changed {
            return (g, basis);
        }
    }
}

/// All nonzero `x` with `xᵀ A x ≤ bound`, sorted by norm then coordinates.
///
/// The search box comes from `x_i² ≤ bound · (A⁻¹)_ii`, so `A` should be pair
/// reduced first to keep it small.
pub(crate) fn short_vectors<R: Int>(
    gram: &Mat3<R>,
    bound: &R,
) -> Result<Vec<ShortVector<R>>, TernError> {
    let det = matrix::det(gram);
    let adj = matrix::adjugate(gram);
    let mut radii = [0i64; 3];
    for (i, radius) in radii.iter_mut().enumerate() {
        let squared = (bound.clone() * adj[i][i].clone()).div_floor(&det);
        let root = squared.sqrt();
        *radius = root.to_i64().ok_or_else(|| {
            TernError::Form(
                ErrorInfo::new("search-box-overflow", "short vector search box is too large")
                    .with_context("radius", root.clone()),
            )
        })?;
    }

    let mut found = Vec::new();
    for (x, y, z) in iproduct!(
        -radii[0]..=radii[0],
        -radii[1]..=radii[1],
        -radii[2]..=radii[2]
    ) {
        if x == 0 && y == 0 && z == 0 {
            continue;
        }
        let coords = matrix::vec_from_small::<R>([x, y, z]);
        let norm = matrix::quadratic(gram, &coords);
        if norm <= *bound {
            found.push(ShortVector { norm, coords });
        }
    }
    found.sort_by(|a, b| a.norm.cmp(&b.norm).then_with(|| a.coords.cmp(&b.coords)));
    Ok(found)
}

/// Successive minima `λ₁ ≤ λ₂ ≤ λ₃` by greedy rank growth over a norm sorted
/// vector list.
pub(crate) fn successive_minima<R: Int>(vectors: &[ShortVector<R>]) -> Option<[R; 3]> {
    let mut chosen: Vec<&ShortVector<R>> = Vec::with_capacity(3);
    for candidate in vectors {
        let independent = match chosen.len() {
            0 => true,
            1 => !matrix::is_zero(&matrix::cross(&chosen[0].coords, &candidate.coords)),
            _ => !matrix::det(&matrix::from_columns([
                &chosen[0].coords,
                &chosen[1].coords,
                &candidate.coords,
            ]))
            .is_zero(),
        };
        if independent {
            chosen.push(candidate);
            if chosen.len() == 3 {
                return Some([
                    chosen[0].norm.clone(),
                    chosen[1].norm.clone(),
                    chosen[2].norm.clone(),
                ]);
            }
        }
    }
    None
}

fn shell<R: Int>(vectors: &[ShortVector<R>], norm: &R) -> Vec<Vec3<R>> {
    vectors
        .iter()
        .filter(|v| v.norm == *norm)
        .map(|v| v.coords.clone())
        .collect()
}

fn not_positive_definite() -> TernError {
    TernError::Form(ErrorInfo::new(
        "not-positive-definite",
        "lattice does not have full rank short vectors",
    ))
}

/// Basis of the canonical form of `gram`: among all determinant one bases
/// realising the successive minima, the one whose Gram matrix has the
/// lexicographically smallest off-diagonal tuple `(A₀₁, A₀₂, A₁₂)`. Ties keep
/// the first basis in enumeration order.
pub(crate) fn canonical_basis<R: Int>(gram: &Mat3<R>) -> Result<Mat3<R>, TernError> {
    let (reduced, pair_basis) = pair_reduce(gram);
    let bound = (0..3)
        .map(|i| reduced[i][i].clone())
        .max()
        .unwrap_or_else(R::zero);
    let vectors = short_vectors(&reduced, &bound)?;
    let minima = successive_minima(&vectors).ok_or_else(not_positive_definite)?;
    let shells = [
        shell(&vectors, &minima[0]),
        shell(&vectors, &minima[1]),
        shell(&vectors, &minima[2]),
    ];

    let mut best: Option<([R; 3], Mat3<R>)> = None;
    for u in &shells[0] {
        let au = matrix::mul_vec(&reduced, u);
        for v in &shells[1] {
            let a01 = matrix::dot(&au, v);
            if let Some((key, _)) = &best {
                if a01 > key[0] {
                    continue;
                }
            }
            let av = matrix::mul_vec(&reduced, v);
            for w in &shells[2] {
                let basis = matrix::from_columns([u, v, w]);
                if !matrix::det(&basis).is_one() {
                    continue;
                }
                let key = [a01.clone(), matrix::dot(&au, w), matrix::dot(&av, w)];
                let better = match &best {
                    None => true,
                    Some((current, _)) => key < *current,
                };
                if better {
                    best = Some((key, basis));
                }
            }
        }
    }
    let (_, local) = best.ok_or_else(not_positive_definite)?;
    Ok(matrix::mul(&pair_basis, &local))
}

/// Every integral `U` with `|det U| = 1` and `Uᵀ A U = A`.
pub(crate) fn automorphisms<R: Int>(gram: &Mat3<R>) -> Result<Vec<Mat3<R>>, TernError> {
    let (reduced, pair_basis) = pair_reduce(gram);
    let bound = (0..3)
        .map(|i| reduced[i][i].clone())
        .max()
        .unwrap_or_else(R::zero);
    let vectors = short_vectors(&reduced, &bound)?;
    let shells = [
        shell(&vectors, &reduced[0][0]),
        shell(&vectors, &reduced[1][1]),
        shell(&vectors, &reduced[2][2]),
    ];

    // Back to the caller's basis: U = P · U_r · P⁻¹ with det P = 1.
    let pair_inverse = matrix::adjugate(&pair_basis);
    let mut found = Vec::new();
    for u in &shells[0] {
        let au = matrix::mul_vec(&reduced, u);
        for v in &shells[1] {
            if matrix::dot(&au, v) != reduced[0][1] {
                continue;
            }
            let av = matrix::mul_vec(&reduced, v);
            for w in &shells[2] {
                if matrix::dot(&au, w) != reduced[0][2] || matrix::dot(&av, w) != reduced[1][2] {
                    continue;
                }
                let local = matrix::from_columns([u, v, w]);
                if matrix::det(&local).abs().is_one() {
                    found.push(matrix::mul(&pair_basis, &matrix::mul(&local, &pair_inverse)));
                }
            }
        }
    }
    Ok(found)
}
