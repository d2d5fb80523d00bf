use criterion::{criterion_group, criterion_main, Criterion};

#[path = "../tests/fixtures.rs"]
mod fixtures;

fn bench_hecke(c: &mut Criterion) {
    let genus = fixtures::disc11_genus().expect("genus");
    let mut group = c.benchmark_group("hecke_disc11");
    group.bench_function("dense_p7", |b| {
        b.iter(|| {
            let _ = genus.hecke_matrix_dense(7).unwrap();
        })
    });
    group.bench_function("sparse_p7", |b| {
        b.iter(|| {
            let _ = genus.hecke_matrix_sparse(7).unwrap();
        })
    });
    group.bench_function("dense_batch", |b| {
        b.iter(|| {
            let _ = genus.hecke_matrices_dense(&[2, 3, 5, 7]).unwrap();
        })
    });
    group.finish();
}

fn bench_enumeration(c: &mut Criterion) {
    let form = fixtures::disc11().expect("form");
    c.bench_function("enumerate_disc11", |b| {
        b.iter(|| {
            let _ = tern_genus::Genus::from_form(&form, Some(1)).unwrap();
        })
    });
}

criterion_group!(benches, bench_hecke, bench_enumeration);
criterion_main!(benches);
