mod fixtures;

use num_bigint::BigInt;
use tern_core::TernError;
use tern_genus::mass::class_weight;

#[test]
fn disc11_genus_has_two_classes() -> Result<(), TernError> {
    let genus = fixtures::disc11_genus()?;
    assert_eq!(genus.size(), 2);
    assert_eq!(genus.mass_x24(), &BigInt::from(10));
    assert_eq!(genus.prime_divisors(), &[11]);

    let total = genus
        .representatives()
        .iter()
        .map(|rep| class_weight(&rep.form))
        .sum::<Result<BigInt, TernError>>()?;
    assert_eq!(&total, genus.mass_x24());

    let forms = [
        fixtures::disc11()?.canonical()?,
        fixtures::disc11_other()?.canonical()?,
    ];
    for form in &forms {
        assert!(genus.representatives().contains(form));
    }
    assert_eq!(genus.dimension_map()[&1], 2);
    Ok(())
}

#[test]
fn brandt_matrices_match_the_level_eleven_curve() -> Result<(), TernError> {
    let genus = fixtures::disc11_genus()?;
    // (p, trace, determinant): eigenvalues are p + 1 and a_p of 11a.
    for (p, trace, det) in [(2u32, 1i64, -6i64), (3, 3, -4), (5, 7, 6)] {
        let matrices = genus.hecke_matrix_dense(p)?;
        let m = &matrices[&1];
        assert_eq!(m.dim, 2);
        assert_eq!(m.trace(), trace, "trace at {p}");
        assert_eq!(m.get(0, 0) * m.get(1, 1) - m.get(0, 1) * m.get(1, 0), det, "det at {p}");
    }
    Ok(())
}

#[test]
fn rows_count_every_neighbor() -> Result<(), TernError> {
    let genus = fixtures::disc11_genus()?;
    let orders: Vec<i64> = genus
        .representatives()
        .iter()
        .map(|rep| rep.form.num_automorphisms().map(|n| n as i64))
        .collect::<Result<_, _>>()?;
    for p in [2u32, 3, 5, 7] {
        let matrices = genus.hecke_matrix_dense(p)?;
        let m = &matrices[&1];
        for row in 0..m.dim {
            assert_eq!(m.row_sum(row), i64::from(p) + 1);
        }
        assert_eq!(m.get(0, 1) * orders[1], m.get(1, 0) * orders[0]);
    }
    Ok(())
}

#[test]
fn hecke_operators_commute() -> Result<(), TernError> {
    let genus = fixtures::disc11_genus()?;
    let batch = genus.hecke_matrices_dense(&[2, 3])?;
    let t2 = &batch[&2][&1].data;
    let t3 = &batch[&3][&1].data;
    assert_eq!(fixtures::mul2(t2, t3), fixtures::mul2(t3, t2));
    Ok(())
}

#[test]
fn dense_and_sparse_agree() -> Result<(), TernError> {
    let genus = fixtures::disc11_genus()?;
    for p in [2u32, 3, 5, 13] {
        let dense = genus.hecke_matrix_dense(p)?;
        let sparse = genus.hecke_matrix_sparse(p)?;
        assert_eq!(dense.len(), sparse.len());
        for (conductor, matrix) in &dense {
            let expanded = sparse[conductor].to_dense();
            assert_eq!(&expanded, matrix, "conductor {conductor} at {p}");
            assert!(sparse[conductor].data.iter().all(|&x| x != 0));
        }
    }
    let batch = genus.hecke_matrices_sparse(&[2, 3])?;
    assert_eq!(batch[&3], genus.hecke_matrix_sparse(3)?);
    Ok(())
}

#[test]
fn prime_eleven_is_rejected() -> Result<(), TernError> {
    let genus = fixtures::disc11_genus()?;
    let err = genus.hecke_matrix_dense(11).unwrap_err();
    assert_eq!(err.code(), "prime-divides-discriminant");
    assert_eq!(err.info().context.get("p").map(String::as_str), Some("11"));
    Ok(())
}
