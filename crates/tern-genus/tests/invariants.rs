mod fixtures;

use std::collections::BTreeSet;

use num_bigint::BigInt;
use tern_core::TernError;
use tern_form::Isometry;
use tern_genus::{Genus, PrimeSymbol};

#[test]
fn isometry_chains_round_trip() -> Result<(), TernError> {
    let genus = fixtures::disc11_genus()?;
    let mother = genus.mother();
    let reps = genus.representatives();
    for (n, rep) in reps.iter().enumerate() {
        let scale = rep.exponents.pow();
        let scalar = scale * scale;
        assert_eq!(&rep.to_mother * &rep.from_mother, Isometry::scalar(scalar));
        assert!(rep.to_mother.is_isometry(mother, &rep.form, &scalar));
        assert!(rep.from_mother.is_isometry(&rep.form, mother, &scalar));
        assert!(rep.to_mother.determinant() > 0);

        match rep.parent {
            None => {
                assert_eq!(n, 0);
                assert_eq!(rep.prime, 1);
                assert!(rep.exponents.is_empty());
            }
            Some(parent) => {
                assert!(parent < n);
                let mut expected = reps[parent].exponents.clone();
                expected.increment(&rep.prime);
                assert_eq!(rep.exponents, expected);
                assert!(genus.spinor_primes().contains(&(rep.prime as u32)));
            }
        }
    }
    Ok(())
}

#[test]
fn positions_fill_each_subspace() -> Result<(), TernError> {
    let genus = fixtures::disc11_genus()?;
    for (k, &dim) in genus.dimensions().iter().enumerate() {
        let lut = genus.lookup(k).expect("conductor index in range");
        assert_eq!(lut.len(), genus.size());
        let positions: Vec<usize> = lut.iter().flatten().copied().collect();
        let distinct: BTreeSet<usize> = positions.iter().copied().collect();
        assert_eq!(positions.len(), dim);
        assert_eq!(distinct, (0..dim).collect::<BTreeSet<_>>());
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
    assert!(genus.lookup(genus.conductors().len()).is_none());
    Ok(())
}

#[test]
fn conversion_round_trips() -> Result<(), TernError> {
    let genus = fixtures::disc11_genus()?;
    let wide = genus.convert::<BigInt>()?;
    let back = wide.convert::<i64>()?;

    assert_eq!(wide.size(), genus.size());
    assert_eq!(wide.seed(), genus.seed());
    assert_eq!(back.dimensions(), genus.dimensions());
    assert_eq!(back.mass_x24(), genus.mass_x24());
    assert_eq!(back.conductors(), genus.conductors());
    for k in 0..genus.conductors().len() {
        assert_eq!(back.lookup(k), genus.lookup(k));
    }
    for (a, b) in genus.representatives().iter().zip(back.representatives()) {
        assert_eq!(a, b);
    }

    let narrow = genus.hecke_matrix_dense(3)?;
    let big = wide.hecke_matrix_dense(3)?;
    assert_eq!(big[&BigInt::from(1)], narrow[&1]);
    Ok(())
}

#[test]
fn symbol_limits_are_checked_first() -> Result<(), TernError> {
    let symbols: Vec<PrimeSymbol<i64>> = (0..64).map(|_| PrimeSymbol::new(2, 1, false)).collect();
    let err = Genus::new(&fixtures::a3()?, &symbols, Some(1)).unwrap_err();
    assert_eq!(err.code(), "too-many-primes");

    let dup = [PrimeSymbol::new(2, 1, true), PrimeSymbol::new(2, 1, true)];
    let err = Genus::new(&fixtures::a3()?, &dup, Some(1)).unwrap_err();
    assert_eq!(err.code(), "duplicate-prime-symbol");

    let wrong = [PrimeSymbol::new(3, 1, false)];
    let err = Genus::new(&fixtures::a3()?, &wrong, Some(1)).unwrap_err();
    assert_eq!(err.code(), "mass-not-integral");
    Ok(())
}

#[test]
fn symbols_follow_the_discriminant() -> Result<(), TernError> {
    assert_eq!(
        PrimeSymbol::for_form(&fixtures::a3()?),
        vec![PrimeSymbol::new(2, 1, true)]
    );
    assert_eq!(
        PrimeSymbol::for_form(&fixtures::disc11()?),
        vec![PrimeSymbol::new(11, 1, true)]
    );
    Ok(())
}

#[test]
fn missing_seed_is_recorded() -> Result<(), TernError> {
    let genus = Genus::from_form(&fixtures::a3()?, None)?;
    assert_ne!(genus.seed(), 0);
    Ok(())
}
