use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lpopt_core::{ProductParameters, ProductionProblem, SolverConfig};
use lpopt_solver::{CornerPointSolver, GeneralLpSolver};

fn furniture() -> ProductionProblem {
    ProductionProblem::two_products(
        ProductParameters::new(120_000.0, 3.0, 30.0),
        ProductParameters::new(80_000.0, 2.0, 40.0),
        120.0,
    )
}

fn bench_solvers(c: &mut Criterion) {
    let problem = furniture();

    let sequential = CornerPointSolver::default();
    c.bench_function("corner_points_sequential", |b| {
        b.iter(|| sequential.solve(black_box(&problem)))
    });

    let parallel = CornerPointSolver::new(SolverConfig::new().with_parallel_evaluation(true));
    c.bench_function("corner_points_parallel", |b| {
        b.iter(|| parallel.solve(black_box(&problem)))
    });

    let general = GeneralLpSolver::new(SolverConfig::default());
    c.bench_function("general_microlp", |b| {
        b.iter(|| general.solve_products(black_box(&problem)))
    });
}

criterion_group!(benches, bench_solvers);
criterion_main!(benches);
