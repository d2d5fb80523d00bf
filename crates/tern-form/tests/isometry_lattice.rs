use tern_core::TernError;
use tern_form::{lattice_basis, matrix, Isometry, QuadForm};

#[test]
fn inverse_undoes_unit_scale_maps() -> Result<(), TernError> {
    let q = QuadForm::new(3i64, 4, 6, 1, 2, 3)?;
    let mut iso = Isometry::identity();
    let canonical = q.reduce(&mut iso)?;
    let back = iso.inverse(&1);
    assert!(back.is_isometry(&canonical, &q, &1));
    assert_eq!(&iso * &back, Isometry::identity());
    Ok(())
}

#[test]
fn inverse_of_scaled_identity() {
    let doubled = Isometry::scalar(2i64);
    assert_eq!(doubled.inverse(&2), Isometry::scalar(2));
    assert_eq!(&doubled * &doubled.inverse(&2), Isometry::scalar(4));
}

#[test]
fn composition_reads_left_to_right() -> Result<(), TernError> {
    let q = QuadForm::new(1i64, 1, 1, 0, 0, 0)?;
    let swap = Isometry::from_matrix([[0, 1, 0], [1, 0, 0], [0, 0, -1]]);
    let twist = Isometry::from_matrix([[1, 0, 0], [0, 0, -1], [0, 1, 0]]);
    let both = &swap * &twist;
    assert!(both.is_isometry(&q, &q, &1));
    assert_eq!(both.column(0), swap.column(0));
    Ok(())
}

#[test]
fn lattice_basis_spans_generators() {
    let generators = vec![[2i64, 0, 0], [0, 2, 0], [0, 0, 2], [1, 1, 1]];
    let basis = lattice_basis(&generators).expect("full rank");
    assert_eq!(matrix::det(&basis).abs(), 4);
    assert!(basis[0][1] == 0 && basis[0][2] == 0 && basis[1][2] == 0);

    let adj = matrix::adjugate(&basis);
    let det = matrix::det(&basis);
    for generator in &generators {
        let coords = matrix::mul_vec(&adj, generator);
        assert!(coords.iter().all(|x| x % det == 0));
    }
}

#[test]
fn lattice_basis_rejects_rank_deficiency() {
    let generators = vec![[1i64, 2, 3], [2, 4, 6], [0, 0, 0]];
    assert!(lattice_basis(&generators).is_none());
}
