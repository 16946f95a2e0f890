//! Criterion benchmark comparing the constructive generators on random
//! sparse set-cover instances of varying size.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use set_cover::generators::{ElementDegreeSolutionGenerator, GreedySolutionGenerator, SolutionGenerator};
use set_cover::invariant::{ConsistencyLevel, SetCoverInvariant};
use set_cover::model::Model;
use set_cover::views::Focus;
use set_cover::base_types::ElementIdx;

/// Generates a random instance with `num_subsets` subsets over
/// `num_elements` elements, each subset covering roughly `density` of the
/// universe. A universal subset guarantees feasibility.
fn random_instance(seed: u64, num_subsets: usize, num_elements: usize, density: f64) -> Model {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut model = Model::new();
    model.resize_num_elements(num_elements);
    for _ in 0..num_subsets {
        let subset = model.add_empty_subset(rng.gen_range(1.0..20.0));
        for e in 0..num_elements as u32 {
            if rng.gen_bool(density) {
                model.add_element_to_subset(ElementIdx(e), subset);
            }
        }
    }
    let universal = model.add_empty_subset(1e9);
    for e in 0..num_elements as u32 {
        model.add_element_to_subset(ElementIdx(e), universal);
    }
    model.sort_elements_in_subsets().unwrap();
    model.create_sparse_row_view().unwrap();
    model
}

fn bench_constructive_generators(c: &mut Criterion) {
    let mut group = c.benchmark_group("constructive_generators");

    for &n in &[200usize, 1_000, 5_000] {
        let model = random_instance(42, n, n / 4, 0.02);
        let label = format!("n={n}");

        group.bench_with_input(BenchmarkId::new("Greedy", &label), &model, |b, m| {
            b.iter(|| {
                let mut invariant = SetCoverInvariant::new(m);
                invariant.recompute(ConsistencyLevel::FreeAndUncovered);
                GreedySolutionGenerator.next_solution(&mut invariant, &Focus::all(m.num_subsets()));
                black_box(invariant.cost())
            });
        });

        group.bench_with_input(BenchmarkId::new("ElementDegree", &label), &model, |b, m| {
            b.iter(|| {
                let mut invariant = SetCoverInvariant::new(m);
                invariant.recompute(ConsistencyLevel::FreeAndUncovered);
                ElementDegreeSolutionGenerator.next_solution(&mut invariant, &Focus::all(m.num_subsets()));
                black_box(invariant.cost())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_constructive_generators);
criterion_main!(benches);
