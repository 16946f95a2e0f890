//! End-to-end coverage for the 3x3 unit-cost knight-cover scenarios of
//! `spec.md` §8 (Scenarios D and E): every subset `S_{(r,c)}` covers cell
//! `(r,c)` plus every cell a knight standing on `(r,c)` could move to, all
//! costs 1.

use set_cover::prelude::*;
use set_cover::generators::{ElementDegreeSolutionGenerator, GreedySolutionGenerator, SteepestSearch};
use set_cover::lagrangian::{LagrangianConfig, LagrangianEngine};

const BOARD: usize = 3;
const KNIGHT_MOVES: [(i32, i32); 8] =
    [(1, 2), (2, 1), (-1, 2), (-2, 1), (1, -2), (2, -1), (-1, -2), (-2, -1)];

fn cell(r: usize, c: usize) -> usize {
    r * BOARD + c
}

fn knight_cover_model() -> Model {
    let mut model = Model::new();
    for r in 0..BOARD {
        for c in 0..BOARD {
            let subset = model.add_empty_subset(1.0);
            model.add_element_to_subset(ElementIdx(cell(r, c) as u32), subset);
            for (dr, dc) in KNIGHT_MOVES {
                let nr = r as i32 + dr;
                let nc = c as i32 + dc;
                if (0..BOARD as i32).contains(&nr) && (0..BOARD as i32).contains(&nc) {
                    model.add_element_to_subset(ElementIdx(cell(nr as usize, nc as usize) as u32), subset);
                }
            }
        }
    }
    model.sort_elements_in_subsets().unwrap();
    model.create_sparse_row_view().unwrap();
    model
}

#[test]
fn scenario_d_greedy_and_steepest_cover_the_board_at_cost_at_most_two() {
    let model = knight_cover_model();
    assert!(model.compute_feasibility().is_feasible());

    let mut invariant = SetCoverInvariant::new(&model);
    invariant.recompute(ConsistencyLevel::FreeAndUncovered);
    GreedySolutionGenerator.next_solution(&mut invariant, &Focus::all(model.num_subsets()));
    assert_eq!(invariant.num_uncovered(), 0);

    invariant.recompute(ConsistencyLevel::Redundancy);
    SteepestSearch.next_solution(&mut invariant, &Focus::all(model.num_subsets()));
    invariant.check_consistency(ConsistencyLevel::Redundancy);

    assert_eq!(invariant.num_uncovered(), 0);
    assert!(invariant.cost() <= 2.0 + 1e-9, "expected cost <= 2, got {}", invariant.cost());
}

#[test]
fn scenario_d_element_degree_also_covers_the_board() {
    let model = knight_cover_model();
    let mut invariant = SetCoverInvariant::new(&model);
    invariant.recompute(ConsistencyLevel::FreeAndUncovered);
    ElementDegreeSolutionGenerator.next_solution(&mut invariant, &Focus::all(model.num_subsets()));
    assert_eq!(invariant.num_uncovered(), 0);
}

#[test]
fn scenario_e_lower_bound_never_exceeds_the_known_optimum() {
    let model = knight_cover_model();
    let engine = LagrangianEngine::new(&model, LagrangianConfig::default());
    let initial = engine.compute_lower_bound(2.0);
    assert!(initial.lower_bound <= 2.0 + 1e-6);

    let config = CftConfig::default();
    let state = CftEngine::solve(&model, &config).expect("knight cover is feasible");
    assert!(state.cost() <= 2.0 + 1e-6);
    assert!(state.lower_bound() >= initial.lower_bound - 1e-6);
    assert!(state.lower_bound() <= state.cost() + 1e-6);
}
