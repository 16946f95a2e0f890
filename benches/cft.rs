//! Criterion benchmark for the three-phase CFT engine against the plain
//! Lagrangian lower bound, on random sparse instances.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use set_cover::base_types::ElementIdx;
use set_cover::cft::{CftConfig, CftEngine};
use set_cover::generators::{GreedySolutionGenerator, SolutionGenerator};
use set_cover::invariant::{ConsistencyLevel, SetCoverInvariant};
use set_cover::lagrangian::{LagrangianConfig, LagrangianEngine};
use set_cover::model::Model;
use set_cover::views::Focus;

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

fn bench_cft_vs_lagrangian(c: &mut Criterion) {
    let mut group = c.benchmark_group("cft_vs_lagrangian");

    for &n in &[100usize, 400] {
        let model = random_instance(7, n, n / 4, 0.03);
        let label = format!("n={n}");

        group.bench_with_input(BenchmarkId::new("LagrangianLowerBound", &label), &model, |b, m| {
            let mut invariant = SetCoverInvariant::new(m);
            invariant.recompute(ConsistencyLevel::FreeAndUncovered);
            GreedySolutionGenerator.next_solution(&mut invariant, &Focus::all(m.num_subsets()));
            let upper_bound = invariant.cost();
            let engine = LagrangianEngine::new(m, LagrangianConfig::default());
            b.iter(|| black_box(engine.compute_lower_bound(upper_bound).lower_bound));
        });

        group.bench_with_input(BenchmarkId::new("CftEngine", &label), &model, |b, m| {
            let config = CftConfig { max_rounds: 10, ..CftConfig::default() };
            b.iter(|| black_box(CftEngine::solve(m, &config).map(|s| s.cost())));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_cft_vs_lagrangian);
criterion_main!(benches);
