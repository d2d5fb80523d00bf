mod fixtures;

use std::collections::BTreeSet;

use num_bigint::BigInt;
use tern_core::TernError;
use tern_form::Isometry;
use tern_genus::mass::class_weight;

#[test]
fn three_ramified_primes_give_eight_subspaces() -> Result<(), TernError> {
    let genus = fixtures::disc3002_genus()?;
    let primes: Vec<BigInt> = [2, 19, 79].map(BigInt::from).to_vec();
    assert_eq!(genus.prime_divisors(), primes.as_slice());
    assert_eq!(genus.conductors().len(), 8);
    assert_eq!(genus.conductors()[7], BigInt::from(3002));

    let total = genus
        .representatives()
        .iter()
        .map(|rep| class_weight(&rep.form))
        .sum::<Result<BigInt, TernError>>()?;
    assert_eq!(&total, genus.mass_x24());

    // Classes whose only rotation is the identity sit in every subspace.
    assert_eq!(genus.dimensions()[0], genus.size());
    assert!(genus.dimensions().iter().all(|&d| d > 0));
    for (k, &dim) in genus.dimensions().iter().enumerate() {
        let lut = genus.lookup(k).expect("conductor index in range");
        let positions: Vec<usize> = lut.iter().flatten().copied().collect();
        let distinct: BTreeSet<usize> = positions.iter().copied().collect();
        assert_eq!(positions.len(), dim);
        assert_eq!(distinct, (0..dim).collect::<BTreeSet<_>>());
    }
    Ok(())
}

#[test]
fn long_discovery_paths_round_trip() -> Result<(), TernError> {
    let genus = fixtures::disc3002_genus()?;
    let mother = genus.mother();
    let reps = genus.representatives();
    let mut longest = 0u32;
    for rep in reps {
        let scale = rep.exponents.pow();
        let scalar = &scale * &scale;
        assert_eq!(&rep.to_mother * &rep.from_mother, Isometry::scalar(scalar.clone()));
        assert_eq!(&rep.from_mother * &rep.to_mother, Isometry::scalar(scalar.clone()));
        assert!(rep.to_mother.is_isometry(mother, &rep.form, &scalar));
        assert!(rep.from_mother.is_isometry(&rep.form, mother, &scalar));
        longest = longest.max(rep.exponents.iter().map(|(_, e)| *e).sum());
    }
    assert!(longest >= 2, "expected a path through an intermediate class");
    Ok(())
}

#[test]
fn operators_commute_on_every_subspace() -> Result<(), TernError> {
    let genus = fixtures::disc3002_genus()?;
    let batch = genus.hecke_matrices_dense(&[3, 5])?;
    let (t3, t5) = (&batch[&3], &batch[&5]);
    assert_eq!(t3.len(), 8);
    for (conductor, a) in t3 {
        let b = &t5[conductor];
        assert_eq!(a.dim, b.dim);
        assert_eq!(
            fixtures::mul_dense(a, b),
            fixtures::mul_dense(b, a),
            "T3 and T5 at conductor {conductor}"
        );
    }

    let trivial = &t3[&BigInt::from(1)];
    let orders: Vec<i64> = genus
        .representatives()
        .iter()
        .map(|rep| rep.form.num_automorphisms().map(|n| n as i64))
        .collect::<Result<_, _>>()?;
    for i in 0..trivial.dim {
        assert_eq!(trivial.row_sum(i), 4);
        for j in 0..trivial.dim {
            assert_eq!(trivial.get(i, j) * orders[j], trivial.get(j, i) * orders[i]);
        }
    }

    let sparse = genus.hecke_matrix_sparse(3)?;
    for (conductor, matrix) in t3 {
        assert_eq!(&sparse[conductor].to_dense(), matrix, "conductor {conductor}");
    }
    Ok(())
}
