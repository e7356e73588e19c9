extern crate criterion;
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use paulialg::DensePauli;
use rand::prelude::*;
use stabalg::{MixedDestabilizer, Project, Stabilizer};

pub fn project_benchmark(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("MixedDestabilizer::project");
    for size in [64usize, 256usize, 1024usize] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bencher, size| {
            bencher.iter_batched(
                || (MixedDestabilizer::zero_state(*size, *size), random_pauli(*size)),
                |(mut state, pauli)| state.project(&pauli).unwrap(),
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

pub fn canonicalize_benchmark(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("Stabilizer::canonicalize");
    for size in [64usize, 256usize, 1024usize] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bencher, size| {
            bencher.iter_batched(
                || random_z_basis(*size),
                |mut state| state.canonicalize(true),
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, project_benchmark, canonicalize_benchmark);
criterion_main!(benches);

fn random_pauli(qubits: usize) -> DensePauli {
    DensePauli::random_hermitian(qubits, &mut thread_rng())
}

fn random_z_basis(qubits: usize) -> Stabilizer {
    let mut state = Stabilizer::from_rows(
        &(0..qubits)
            .map(|qubit| DensePauli::z(qubit, qubits))
            .collect::<Vec<_>>(),
    );
    let mut rng = thread_rng();
    for _ in 0..qubits / 4 {
        state.project(&DensePauli::random_hermitian(qubits, &mut rng)).unwrap();
    }
    state
}
