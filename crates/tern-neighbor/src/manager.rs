//! p-neighbors of a ternary form.

use std::sync::Arc;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::Signed;
use tern_core::{ErrorInfo, Int, TernError};
use tern_form::{lattice_basis, matrix, Isometry, Mat3, QuadForm, Vec3};
use tracing::trace;

use crate::field::{Characteristic, FiniteField};

/// Substream used for isotropic vector search.
const ISOTROPIC_STREAM: u64 = 0x6973;

/// Random draws before falling back to an exhaustive isotropic search.
const RANDOM_ATTEMPTS: u64 = 64;

/// A neighbor form together with the isometry reaching it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neighbor<R> {
    /// The neighbor, canonical when produced by
    /// [`NeighborManager::get_reduced_neighbor_rep`].
    pub form: QuadForm<R>,
    /// Isometry from the source form to `form` at scale `p`.
    pub isometry: Isometry<R>,
}

/// Enumerates the `p + 1` neighbors of a form at a prime `p ∤ disc`.
///
/// Isotropic lines mod `p` are parameterised through one fixed isotropic
/// vector `x₀`: each line through `x₀` meets the conic `q ≡ 0` in exactly one
/// further point, and the lines through `x₀` are indexed by the points
/// `w(t) = e_i + t·e_j` (`t < p`) and `w(p) = e_j` of the coordinate line
/// opposite the pivot of `x₀`.
#[derive(Debug, Clone)]
pub struct NeighborManager<R> {
    form: QuadForm<R>,
    gram: Mat3<BigInt>,
    field: Arc<FiniteField>,
    anchor: [u64; 3],
    others: (usize, usize),
}

impl<R: Int> NeighborManager<R> {
    /// Prepares neighbor enumeration of `form` over `field`.
    pub fn new(form: QuadForm<R>, field: Arc<FiniteField>) -> Result<Self, TernError> {
        let p = field.prime();
        if field.residue(&form.discriminant()) == 0 {
            return Err(TernError::Field(
                ErrorInfo::new("prime-divides-discriminant", "neighbors need a good prime")
                    .with_context("p", p)
                    .with_context("discriminant", form.discriminant()),
            ));
        }
        let gram = matrix::to_big(&form.gram());
        let anchor = find_isotropic(&form, &field);
        let pivot = anchor.iter().position(|&x| x != 0).unwrap_or(0);
        let others = match pivot {
            0 => (1, 2),
            1 => (0, 2),
            _ => (0, 1),
        };
        trace!(p, form = %form, ?anchor, "isotropic anchor");
        Ok(Self {
            form,
            gram,
            field,
            anchor,
            others,
        })
    }

    /// The form whose neighbors are enumerated.
    pub fn form(&self) -> &QuadForm<R> {
        &self.form
    }

    /// Number of neighbors, `p + 1`.
    pub fn num_neighbors(&self) -> u64 {
        self.field.prime() + 1
    }

    /// Isotropic vector mod `p` on the `t`-th line, `0 ≤ t ≤ p`.
    pub fn isotropic_vector(&self, t: u64) -> [u64; 3] {
        debug_assert!(t <= self.field.prime(), "neighbor parameter out of range");
        let field = &*self.field;
        let (i, j) = self.others;
        let mut w = [0u64; 3];
        if t == field.prime() {
            w[j] = 1;
        } else {
            w[i] = 1;
            w[j] = t;
        }
        let coefficients = self.residues();
        let cross = bilinear_mod(field, &coefficients, &self.anchor, &w);
        if cross == 0 {
            return self.anchor;
        }
        let inv = field.inverse(cross).unwrap_or_default();
        let lambda = field.neg(field.mul(eval_mod(field, &coefficients, &w), inv));
        let mut point = [0u64; 3];
        for k in 0..3 {
            point[k] = field.add(field.mul(lambda, self.anchor[k]), w[k]);
        }
        debug_assert_eq!(eval_mod(field, &coefficients, &point), 0);
        point
    }

    /// The `t`-th neighbor. `iso` is right-multiplied by the basis of the
    /// neighbor lattice (scaled by `p`), so it keeps mapping into the result.
    ///
    /// Fails with `precision-overflow` when the unreduced neighbor does not
    /// fit `R`; [`NeighborManager::get_reduced_neighbor_rep`] only narrows
    /// after reduction.
    pub fn get_neighbor(&self, t: u64, iso: &mut Isometry<R>) -> Result<QuadForm<R>, TernError> {
        let (edge, neighbor) = self.neighbor_lattice(t)?;
        let form = neighbor
            .convert::<R>()
            .ok_or_else(|| precision_overflow::<R>(&neighbor))?;
        let edge = edge
            .convert::<R>()
            .ok_or_else(|| precision_overflow::<R>(&neighbor))?;
        *iso = &*iso * &edge;
        Ok(form)
    }

    /// The `t`-th neighbor in canonical form with the isometry from the
    /// source form at scale `p`.
    pub fn get_reduced_neighbor_rep(&self, t: u64) -> Result<Neighbor<R>, TernError> {
        let (mut isometry, neighbor) = self.neighbor_lattice(t)?;
        let reduced = neighbor.reduce(&mut isometry)?;
        let form = reduced
            .convert::<R>()
            .ok_or_else(|| precision_overflow::<R>(&reduced))?;
        let isometry = isometry
            .convert::<R>()
            .ok_or_else(|| precision_overflow::<R>(&reduced))?;
        Ok(Neighbor { form, isometry })
    }

    /// Basis of the `t`-th neighbor lattice and the neighbor form. The Gram
    /// matrix `SᵀAS / p²` of an unreduced neighbor grows like `p⁴`, so this
    /// runs in exact arithmetic.
    fn neighbor_lattice(&self, t: u64) -> Result<(Isometry<BigInt>, QuadForm<BigInt>), TernError> {
        let field = &*self.field;
        let p: BigInt = field.lift(field.prime());
        let p2 = &p * &p;
        let two = BigInt::from(2);
        let mut v: Vec3<BigInt> = self.isotropic_vector(t).map(|x| field.lift(x));

        // Lift so that q(v) ≡ 0 mod p².
        let qv = matrix::quadratic(&self.gram, &v) / &two;
        if !qv.is_multiple_of(&p2) {
            let av = matrix::mul_vec(&self.gram, &v);
            let (j, inv) = first_invertible(field, &av).ok_or_else(degenerate_line)?;
            let quotient = field.residue(&(qv / &p));
            let c = field.neg(field.mul(quotient, inv));
            v[j] += &p * field.lift::<BigInt>(c);
        }
        debug_assert!((matrix::quadratic(&self.gram, &v) / &two).is_multiple_of(&p2));

        // pL_v + Zv with L_v = {x : b(x, v) ≡ 0 mod p}.
        let phi = matrix::mul_vec(&self.gram, &v);
        let (j, inv) = first_invertible(field, &phi).ok_or_else(degenerate_line)?;
        let mut generators: Vec<Vec3<BigInt>> = Vec::with_capacity(4);
        for i in (0..3).filter(|&i| i != j) {
            let mut g: Vec3<BigInt> = Default::default();
            g[i] = p.clone();
            let coeff = field.neg(field.mul(field.residue(&phi[i]), inv));
            g[j] = &p * field.lift::<BigInt>(coeff);
            generators.push(g);
        }
        let mut g: Vec3<BigInt> = Default::default();
        g[j] = p2.clone();
        generators.push(g);
        generators.push(v);

        let basis = lattice_basis(&generators).ok_or_else(degenerate_line)?;
        let mut edge = Isometry::from_matrix(basis);
        if edge.determinant().is_negative() {
            edge.negate_column(0);
        }
        debug_assert!(edge.determinant() == &p2 * &p);

        let neighbor_gram = matrix::div_exact(&matrix::congruence(&self.gram, edge.matrix()), &p2);
        let neighbor = QuadForm::from_gram(&neighbor_gram)?;
        debug_assert!(neighbor.discriminant() == self.form.discriminant().to_big());
        Ok((edge, neighbor))
    }

    fn residues(&self) -> [u64; 6] {
        self.form.coefficients().map(|x| self.field.residue(&x))
    }
}

fn degenerate_line() -> TernError {
    TernError::Field(ErrorInfo::new(
        "degenerate-isotropic-line",
        "isotropic vector lies in the radical of the form mod p",
    ))
}

fn precision_overflow<R: Int>(form: &QuadForm<BigInt>) -> TernError {
    TernError::Form(
        ErrorInfo::new("precision-overflow", "neighbor form does not fit the integer width")
            .with_context("width", R::WIDTH)
            .with_context("form", form)
            .with_hint("use a wider precision"),
    )
}

fn first_invertible<R: Int>(field: &FiniteField, v: &Vec3<R>) -> Option<(usize, u64)> {
    v.iter()
        .enumerate()
        .find_map(|(j, x)| field.inverse(field.residue(x)).map(|inv| (j, inv)))
}

/// `q(x) mod p` from coefficient residues `[a, b, c, f, g, h]`.
fn eval_mod(field: &FiniteField, q: &[u64; 6], x: &[u64; 3]) -> u64 {
    let terms = [
        field.mul(q[0], field.mul(x[0], x[0])),
        field.mul(q[1], field.mul(x[1], x[1])),
        field.mul(q[2], field.mul(x[2], x[2])),
        field.mul(q[3], field.mul(x[1], x[2])),
        field.mul(q[4], field.mul(x[0], x[2])),
        field.mul(q[5], field.mul(x[0], x[1])),
    ];
    terms.iter().fold(0, |acc, &t| field.add(acc, t))
}

/// `b(x, y) = q(x + y) − q(x) − q(y) mod p`.
fn bilinear_mod(field: &FiniteField, q: &[u64; 6], x: &[u64; 3], y: &[u64; 3]) -> u64 {
    let sum = [
        field.add(x[0], y[0]),
        field.add(x[1], y[1]),
        field.add(x[2], y[2]),
    ];
    field.sub(
        eval_mod(field, q, &sum),
        field.add(eval_mod(field, q, x), eval_mod(field, q, y)),
    )
}

fn find_isotropic<R: Int>(form: &QuadForm<R>, field: &FiniteField) -> [u64; 3] {
    let q = form.coefficients().map(|x| field.residue(&x));
    if q[2] == 0 {
        return [0, 0, 1];
    }
    if let Characteristic::Odd { .. } = field.characteristic() {
        // c z² + (f y + g x) z + (a x² + b y² + h x y) = 0 in z.
        let mut rng = field.rng(ISOTROPIC_STREAM);
        let two_c_inv = field.inverse(field.mul(2, q[2])).unwrap_or_default();
        for _ in 0..RANDOM_ATTEMPTS {
            let x = field.random(&mut rng);
            let y = field.random(&mut rng);
            if x == 0 && y == 0 {
                continue;
            }
            let linear = field.add(field.mul(q[3], y), field.mul(q[4], x));
            let constant = eval_mod(field, &q, &[x, y, 0]);
            let disc = field.sub(field.mul(linear, linear), field.mul(4, field.mul(q[2], constant)));
            if let Some(root) = field.sqrt(disc) {
                let z = field.mul(field.sub(root, linear), two_c_inv);
                return [x, y, z];
            }
        }
    }
    exhaustive_isotropic(field, &q)
}

fn exhaustive_isotropic(field: &FiniteField, q: &[u64; 6]) -> [u64; 3] {
    let p = field.prime();
    for x in 0..p {
        for y in 0..p {
            for z in 0..p {
                let v = [x, y, z];
                if v != [0, 0, 0] && eval_mod(field, q, &v) == 0 {
                    return v;
                }
            }
        }
    }
    // Chevalley–Warning guarantees a nontrivial zero of a ternary form mod p.
    [0, 0, 1]
}
