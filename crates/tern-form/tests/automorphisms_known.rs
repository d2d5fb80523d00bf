use tern_core::TernError;
use tern_form::QuadForm;

fn form(coefficients: [i64; 6]) -> Result<QuadForm<i64>, TernError> {
    QuadForm::from_coefficients(coefficients)
}

#[test]
fn a3_lattice_has_order_48() -> Result<(), TernError> {
    let a3 = form([1, 1, 1, 1, 1, 1])?;
    assert_eq!(a3.discriminant(), 2);
    assert_eq!(a3.num_automorphisms()?, 48);
    assert_eq!(a3.proper_automorphisms()?.len(), 24);
    Ok(())
}

#[test]
fn sum_of_squares_has_signed_permutations() -> Result<(), TernError> {
    let cube = form([1, 1, 1, 0, 0, 0])?;
    assert_eq!(cube.discriminant(), 4);
    assert_eq!(cube.num_automorphisms()?, 48);
    Ok(())
}

#[test]
fn discriminant_eleven_classes() -> Result<(), TernError> {
    let first = form([1, 1, 4, 1, 1, 1])?;
    let second = form([1, 1, 3, 1, 0, 0])?;
    assert_eq!(first.discriminant(), 11);
    assert_eq!(second.discriminant(), 11);
    assert_eq!(first.num_automorphisms()?, 12);
    assert_eq!(second.num_automorphisms()?, 8);
    assert_ne!(first.canonical()?, second.canonical()?);
    Ok(())
}

#[test]
fn automorphisms_preserve_the_form() -> Result<(), TernError> {
    let q = form([2, 3, 5, 1, 1, 2])?;
    let auts = q.automorphisms()?;
    assert!(!auts.is_empty());
    for aut in &auts {
        assert!(aut.is_isometry(&q, &q, &1));
        assert_eq!(aut.determinant().abs(), 1);
    }
    Ok(())
}

#[test]
fn rejects_indefinite_and_odd_diagonal_input() {
    let err = form([1, 1, -1, 0, 0, 0]).unwrap_err();
    assert_eq!(err.code(), "not-positive-definite");

    let err = QuadForm::<i64>::from_gram(&[[1, 0, 0], [0, 2, 0], [0, 0, 2]]).unwrap_err();
    assert_eq!(err.code(), "odd-diagonal");
}
