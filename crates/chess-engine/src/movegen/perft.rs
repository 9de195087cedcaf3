//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.

use super::generate_legal;
use crate::GameState;

/// Counts the number of leaf nodes at the given depth.
pub fn perft(state: &GameState, depth: u32) -> u64 {
    let mut scratch = state.clone();
    perft_inner(&mut scratch, depth)
}

fn perft_inner(state: &mut GameState, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generate_legal(state);
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for m in &moves {
        state.make_move(*m);
        nodes += perft_inner(state, depth - 1);
        state.unmake_move();
    }
    nodes
}

/// Perft with divide: the node count below each root move, sorted by
/// move notation (promotions carry their piece letter).
pub fn perft_divide(state: &GameState, depth: u32) -> Vec<(String, u64)> {
    let mut scratch = state.clone();
    let moves = generate_legal(&scratch);
    let mut results = Vec::with_capacity(moves.len());

    for m in &moves {
        scratch.make_move(*m);
        let nodes = perft_inner(&mut scratch, depth.saturating_sub(1));
        scratch.unmake_move();

        results.push((m.long_notation(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
