use std::collections::BTreeSet;
use std::sync::Arc;

use num_bigint::BigInt;

use tern_core::TernError;
use tern_form::{Isometry, QuadForm};
use tern_neighbor::{FiniteField, NeighborManager};

fn projective(field: &FiniteField, v: [u64; 3]) -> [u64; 3] {
    let lead = v.iter().copied().find(|&x| x != 0).expect("nonzero vector");
    let inv = field.inverse(lead).expect("invertible");
    v.map(|x| field.mul(x, inv))
}

fn check_neighbors(form: QuadForm<i64>, p: u32) -> Result<(), TernError> {
    let field = Arc::new(FiniteField::new(p, 0x5eed)?);
    let manager = NeighborManager::new(form.clone(), field.clone())?;
    let mut lines = BTreeSet::new();
    for t in 0..=field.prime() {
        let v = manager.isotropic_vector(t);
        let value: i64 = form.evaluate(&v.map(|x| x as i64));
        assert_eq!(value.rem_euclid(i64::from(p)), 0, "t = {t}");
        lines.insert(projective(&field, v));

        let mut iso = Isometry::identity();
        let neighbor = manager.get_neighbor(t, &mut iso)?;
        assert_eq!(neighbor.discriminant(), form.discriminant());
        let scale = i64::from(p);
        assert!(iso.is_isometry(&form, &neighbor, &(scale * scale)));
        assert_eq!(iso.determinant(), scale * scale * scale);

        let reduced = manager.get_reduced_neighbor_rep(t)?;
        assert!(reduced.isometry.is_isometry(&form, &reduced.form, &(scale * scale)));
        assert_eq!(reduced.form, neighbor.canonical()?);
    }
    assert_eq!(lines.len() as u64, manager.num_neighbors());
    Ok(())
}

#[test]
fn a3_neighbors_at_odd_primes() -> Result<(), TernError> {
    let a3 = QuadForm::new(1i64, 1, 1, 1, 1, 1)?;
    check_neighbors(a3.clone(), 3)?;
    check_neighbors(a3, 5)
}

#[test]
fn discriminant_eleven_neighbors() -> Result<(), TernError> {
    let q = QuadForm::new(1i64, 1, 4, 1, 1, 1)?;
    for p in [2, 3, 5, 7] {
        check_neighbors(q.clone(), p)?;
    }
    Ok(())
}

#[test]
fn neighbors_stay_in_the_genus() -> Result<(), TernError> {
    let first = QuadForm::new(1i64, 1, 4, 1, 1, 1)?.canonical()?;
    let second = QuadForm::new(1i64, 1, 3, 1, 0, 0)?.canonical()?;
    let field = Arc::new(FiniteField::new(3, 9)?);
    let manager = NeighborManager::new(first.clone(), field)?;
    for t in 0..=3 {
        let neighbor = manager.get_reduced_neighbor_rep(t)?;
        assert!(neighbor.form == first || neighbor.form == second);
    }
    Ok(())
}

#[test]
fn bad_primes_are_rejected() -> Result<(), TernError> {
    let q = QuadForm::new(1i64, 1, 4, 1, 1, 1)?;
    let field = Arc::new(FiniteField::new(11, 0)?);
    let err = NeighborManager::new(q, field).unwrap_err();
    assert_eq!(err.code(), "prime-divides-discriminant");
    Ok(())
}

#[test]
fn reduced_neighbors_agree_across_widths() -> Result<(), TernError> {
    let form = QuadForm::new(1i64, 1, 1001, 1, 1, 1)?;
    let wide = form.to_big();
    let field = Arc::new(FiniteField::new(101, 0x3002)?);
    let narrow = NeighborManager::new(form.clone(), field.clone())?;
    let exact = NeighborManager::new(wide, field.clone())?;
    let scale = 101i64;
    for t in 0..=field.prime() {
        let a = narrow.get_reduced_neighbor_rep(t)?;
        let b = exact.get_reduced_neighbor_rep(t)?;
        assert_eq!(a.form.to_big(), b.form, "t = {t}");
        assert_eq!(a.isometry.to_big(), b.isometry);
        assert_eq!(a.form.discriminant(), 3002);
        assert!(a.isometry.is_isometry(&form, &a.form, &(scale * scale)));
    }
    Ok(())
}
