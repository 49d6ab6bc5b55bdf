//! Criterion benchmarks for roster fitness evaluation and full GA runs.
//!
//! Inputs are synthetic: 7 days × 3 shifts with random requirements and
//! preferences, scaled by employee count.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use u_roster::ga::{GaConfig, GaProblem, Selection};
use u_roster::random::create_rng;
use u_roster::roster::{
    fitness, EmployeePreferences, RequiredWorkers, RosterProblem, Schedule, ShiftChromosome,
};

const SLOTS: usize = 21;

fn synthetic_problem(employees: usize, seed: u64) -> RosterProblem {
    let mut rng = create_rng(seed);
    let low = (employees / 2).max(1) as u32;
    let high = (employees as u32 - 1).max(low);
    let required: Vec<u32> = (0..SLOTS).map(|_| rng.random_range(low..=high)).collect();
    let prefs: Vec<Vec<i32>> = (0..employees)
        .map(|_| (0..SLOTS).map(|_| rng.random_range(0..=1)).collect())
        .collect();
    RosterProblem::new(
        RequiredWorkers::new(required).expect("non-empty requirements"),
        EmployeePreferences::from_rows(prefs).expect("rectangular preferences"),
    )
    .expect("valid problem")
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_fitness(c: &mut Criterion) {
    let mut group = c.benchmark_group("roster_fitness");

    for employees in [10usize, 50, 200] {
        let problem = synthetic_problem(employees, 42);
        let mut rng = create_rng(7);
        let schedule = Schedule::random(employees, SLOTS, &mut rng);
        group.bench_with_input(
            BenchmarkId::from_parameter(employees),
            &(problem, schedule),
            |b, (p, s)| {
                b.iter(|| {
                    black_box(fitness::evaluate(
                        black_box(s),
                        p.target(),
                        p.preferences(),
                        p.weights(),
                    ))
                })
            },
        );
    }
    group.finish();
}

fn bench_evaluate_chromosome(c: &mut Criterion) {
    let problem = synthetic_problem(50, 3);
    let mut rng = create_rng(9);
    let ind: ShiftChromosome = problem.create_individual(&mut rng);
    c.bench_function("roster_evaluate_e50", |b| {
        b.iter(|| black_box(problem.evaluate(black_box(&ind))))
    });
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("roster_solve");
    group.sample_size(10);

    for (employees, pop, gen) in [(10usize, 100usize, 50usize), (50, 200, 30)] {
        let problem = synthetic_problem(employees, 42);
        for selection in [Selection::Truncation, Selection::Tournament(5)] {
            let config = GaConfig {
                population_size: pop,
                generations: gen,
                selection,
                seed: Some(42),
                ..GaConfig::default()
            };
            group.bench_with_input(
                BenchmarkId::new(format!("e{employees}_p{pop}_g{gen}"), format!("{selection:?}")),
                &(problem.clone(), config),
                |b, (p, c)| b.iter(|| black_box(p.solve(black_box(c)))),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_fitness, bench_evaluate_chromosome, bench_solve);
criterion_main!(benches);
