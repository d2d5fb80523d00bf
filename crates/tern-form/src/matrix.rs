//! Fixed size 3×3 integer matrix kernel.
//!
//! Matrices are row-major arrays; `m[i][j]` is row `i`, column `j`. Basis
//! vectors and isometries are stored column-wise, so the image of `e_j`
//! under `S` is `column(S, j)`.

use num_bigint::BigInt;
use tern_core::Int;

/// Column vector of length three.
pub type Vec3<R> = [R; 3];

/// Row-major 3×3 matrix.
pub type Mat3<R> = [[R; 3]; 3];

/// Builds a matrix from an entry generator.
pub fn from_fn<R, F>(mut f: F) -> Mat3<R>
where
    F: FnMut(usize, usize) -> R,
{
    std::array::from_fn(|i| std::array::from_fn(|j| f(i, j)))
}

/// Identity matrix.
pub fn identity<R: Int>() -> Mat3<R> {
    scalar(R::one())
}

/// `value · I`.
pub fn scalar<R: Int>(value: R) -> Mat3<R> {
    from_fn(|i, j| if i == j { value.clone() } else { R::zero() })
}

/// Matrix product `a · b`.
pub fn mul<R: Int>(a: &Mat3<R>, b: &Mat3<R>) -> Mat3<R> {
    from_fn(|i, j| {
        (0..3).fold(R::zero(), |acc, k| {
            acc + a[i][k].clone() * b[k][j].clone()
        })
    })
}

/// Matrix vector product `m · v`.
pub fn mul_vec<R: Int>(m: &Mat3<R>, v: &Vec3<R>) -> Vec3<R> {
    std::array::from_fn(|i| dot(&m[i], v))
}

/// Euclidean dot product of two coordinate vectors.
pub fn dot<R: Int>(u: &Vec3<R>, v: &Vec3<R>) -> R {
    (0..3).fold(R::zero(), |acc, k| acc + u[k].clone() * v[k].clone())
}

/// Transpose.
pub fn transpose<R: Int>(m: &Mat3<R>) -> Mat3<R> {
    from_fn(|i, j| m[j][i].clone())
}

/// Entry-wise multiple `k · m`.
pub fn scale<R: Int>(m: &Mat3<R>, k: &R) -> Mat3<R> {
    from_fn(|i, j| m[i][j].clone() * k.clone())
}

/// Entry-wise exact quotient `m / k`.
pub fn div_exact<R: Int>(m: &Mat3<R>, k: &R) -> Mat3<R> {
    from_fn(|i, j| {
        debug_assert!(m[i][j].is_multiple_of(k), "inexact matrix division");
        m[i][j].clone() / k.clone()
    })
}

/// Determinant.
pub fn det<R: Int>(m: &Mat3<R>) -> R {
    let minor = |r0: usize, r1: usize, c0: usize, c1: usize| {
        m[r0][c0].clone() * m[r1][c1].clone() - m[r0][c1].clone() * m[r1][c0].clone()
    };
    m[0][0].clone() * minor(1, 2, 1, 2) - m[0][1].clone() * minor(1, 2, 0, 2)
        + m[0][2].clone() * minor(1, 2, 0, 1)
}

/// Adjugate, so that `m · adjugate(m) = det(m) · I`.
pub fn adjugate<R: Int>(m: &Mat3<R>) -> Mat3<R> {
    // Cyclic index shifts give the signed cofactors of a 3×3 matrix directly.
    let cofactor = |i: usize, j: usize| {
        let (i1, i2) = ((i + 1) % 3, (i + 2) % 3);
        let (j1, j2) = ((j + 1) % 3, (j + 2) % 3);
        m[i1][j1].clone() * m[i2][j2].clone() - m[i1][j2].clone() * m[i2][j1].clone()
    };
    from_fn(|i, j| cofactor(j, i))
}

/// Congruence `uᵀ · a · u`.
pub fn congruence<R: Int>(a: &Mat3<R>, u: &Mat3<R>) -> Mat3<R> {
    mul(&transpose(u), &mul(a, u))
}

/// Column `j` as a vector.
pub fn column<R: Int>(m: &Mat3<R>, j: usize) -> Vec3<R> {
    std::array::from_fn(|i| m[i][j].clone())
}

/// Matrix whose columns are the given vectors.
pub fn from_columns<R: Int>(columns: [&Vec3<R>; 3]) -> Mat3<R> {
    from_fn(|i, j| columns[j][i].clone())
}

/// Quadratic value `vᵀ · a · v`.
pub fn quadratic<R: Int>(a: &Mat3<R>, v: &Vec3<R>) -> R {
    dot(v, &mul_vec(a, v))
}

/// Bilinear value `uᵀ · a · v`.
pub fn bilinear<R: Int>(a: &Mat3<R>, u: &Vec3<R>, v: &Vec3<R>) -> R {
    dot(u, &mul_vec(a, v))
}

/// Cross product; zero exactly when `u` and `v` are parallel.
pub fn cross<R: Int>(u: &Vec3<R>, v: &Vec3<R>) -> Vec3<R> {
    std::array::from_fn(|i| {
        let (a, b) = ((i + 1) % 3, (i + 2) % 3);
        u[a].clone() * v[b].clone() - u[b].clone() * v[a].clone()
    })
}

/// Embeds machine integers.
pub fn vec_from_small<R: Int>(v: [i64; 3]) -> Vec3<R> {
    v.map(R::from_small)
}

/// Re-expresses a matrix at another width.
pub fn convert<R: Int, T: Int>(m: &Mat3<R>) -> Option<Mat3<T>> {
    let mut out: Mat3<T> = from_fn(|_, _| T::zero());
    for (i, row) in m.iter().enumerate() {
        for (j, entry) in row.iter().enumerate() {
            out[i][j] = tern_core::convert(entry)?;
        }
    }
    Some(out)
}

/// Lifts a matrix to arbitrary precision.
pub fn to_big<R: Int>(m: &Mat3<R>) -> Mat3<BigInt> {
    from_fn(|i, j| m[i][j].to_big())
}

/// Entry-wise zero test.
pub fn is_zero<R: Int>(v: &Vec3<R>) -> bool {
    v.iter().all(|x| x.is_zero())
}
