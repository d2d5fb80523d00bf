#![allow(dead_code)]

use num_bigint::BigInt;
use tern_core::TernError;
use tern_form::QuadForm;
use tern_genus::{DenseMatrix, Genus};

pub fn a3() -> Result<QuadForm<i64>, TernError> {
    QuadForm::new(1, 1, 1, 1, 1, 1)
}

pub fn disc11() -> Result<QuadForm<i64>, TernError> {
    QuadForm::new(1, 1, 4, 1, 1, 1)
}

pub fn disc11_other() -> Result<QuadForm<i64>, TernError> {
    QuadForm::new(1, 1, 3, 1, 0, 0)
}

pub fn disc11_genus() -> Result<Genus<i64>, TernError> {
    Genus::from_form(&disc11()?, Some(0x11))
}

/// Discriminant 3002 = 2·19·79: three ramified primes, eight conductors.
pub fn disc3002() -> Result<QuadForm<i64>, TernError> {
    QuadForm::new(1, 1, 1001, 1, 1, 1)
}

pub fn disc3002_genus() -> Result<Genus<BigInt>, TernError> {
    let form = disc3002()?.convert::<BigInt>().expect("fits");
    Genus::from_form(&form, Some(0x3002))
}

/// Discriminant 3446 = 2·1723.
pub fn disc3446() -> Result<QuadForm<i64>, TernError> {
    QuadForm::new(2, 3, 150, 1, 1, 1)
}

pub fn mul_dense(a: &DenseMatrix, b: &DenseMatrix) -> Vec<i64> {
    let n = a.dim;
    let mut out = vec![0; n * n];
    for i in 0..n {
        for k in 0..n {
            let lhs = a.get(i, k);
            if lhs == 0 {
                continue;
            }
            for j in 0..n {
                out[i * n + j] += lhs * b.get(k, j);
            }
        }
    }
    out
}

pub fn mul2(a: &[i64], b: &[i64]) -> Vec<i64> {
    vec![
        a[0] * b[0] + a[1] * b[2],
        a[0] * b[1] + a[1] * b[3],
        a[2] * b[0] + a[3] * b[2],
        a[2] * b[1] + a[3] * b[3],
    ]
}
