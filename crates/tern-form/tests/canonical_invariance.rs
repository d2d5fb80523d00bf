use proptest::prelude::*;
use tern_core::TernError;
use tern_form::{matrix, Isometry, Mat3, QuadForm};

fn elementary(i: usize, j: usize, k: i64) -> Mat3<i64> {
    let mut m = matrix::identity::<i64>();
    if i != j {
        m[i][j] = k;
    }
    m
}

fn unimodular(steps: &[(usize, usize, i64)], flip: bool) -> Mat3<i64> {
    let mut u = matrix::identity::<i64>();
    for &(i, j, k) in steps {
        u = matrix::mul(&u, &elementary(i, j, k));
    }
    if flip {
        u = matrix::mul(&u, &[[0, 1, 0], [1, 0, 0], [0, 0, -1]]);
    }
    u
}

#[test]
fn reduce_reports_its_change_of_basis() -> Result<(), TernError> {
    let q = QuadForm::new(7i64, 3, 5, -2, 4, 1)?;
    let mut iso = Isometry::identity();
    let canonical = q.reduce(&mut iso)?;
    assert!(iso.is_isometry(&q, &canonical, &1));
    assert_eq!(iso.determinant(), 1);
    assert_eq!(canonical.discriminant(), q.discriminant());
    assert_eq!(canonical.canonical()?, canonical);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn canonical_form_is_a_class_invariant(
        a in 1i64..6,
        b in 1i64..6,
        c in 1i64..6,
        f in -4i64..=4,
        g in -4i64..=4,
        h in -4i64..=4,
        steps in proptest::collection::vec((0usize..3, 0usize..3, -3i64..=3), 0..5),
        flip in any::<bool>(),
    ) {
        let q = QuadForm::new(a, b, c, f, g, h);
        prop_assume!(q.is_ok());
        let q = q.unwrap();

        let u = unimodular(&steps, flip);
        let moved = QuadForm::from_gram(&matrix::congruence(&q.gram(), &u)).unwrap();

        let mut iso = Isometry::identity();
        let canonical = q.reduce(&mut iso).unwrap();
        prop_assert!(iso.is_isometry(&q, &canonical, &1));
        prop_assert_eq!(canonical.clone(), moved.canonical().unwrap());
        prop_assert_eq!(
            q.num_automorphisms().unwrap(),
            canonical.num_automorphisms().unwrap()
        );
    }
}
