//! "Perft" performance test: count the number of play lines at a given
//! depth. Useful for tuning the packed fast path and for holding every
//! dynamics strategy to the same counts.
//! See: http://www.aartbik.com/MISC/reversi.html

use crate::engine::Engine;
use crate::game::{GameState, Player};

/// Count the leaves of the game tree `depth` plies below the opening.
pub fn run_perft(engine: &Engine, depth: u64) -> u64 {
    leaves_below(engine, &engine.initialize(), Player::Black, depth)
}

fn leaves_below(engine: &Engine, state: &GameState, to_move: Player, depth: u64) -> u64 {
    // Leaf node for this depth
    if depth == 0 {
        return 1;
    }

    // Neither player can move: game is over
    if state.done() {
        return 1;
    }

    // A jump consumes a ply, like an explicit pass move would.
    if state.need_jump(to_move) {
        return leaves_below(engine, state, !to_move, depth - 1);
    }

    state
        .legal_moves(to_move)
        .locations()
        .map(|action| {
            let next = engine.step(state, to_move.id(), action).unwrap();
            leaves_below(engine, &next, !to_move, depth - 1)
        })
        .sum()
}

#[test]
fn perft_01() {
    assert_eq!(run_perft(&Engine::new(), 1), 4);
}

#[test]
fn perft_02() {
    assert_eq!(run_perft(&Engine::new(), 2), 12);
}

#[test]
fn perft_03() {
    assert_eq!(run_perft(&Engine::new(), 3), 56);
}

#[test]
fn perft_04() {
    assert_eq!(run_perft(&Engine::new(), 4), 244);
}

#[test]
fn perft_05() {
    assert_eq!(run_perft(&Engine::new(), 5), 1396);
}

#[test]
fn perft_06() {
    assert_eq!(run_perft(&Engine::new(), 6), 8200);
}

#[test]
fn perft_07() {
    assert_eq!(run_perft(&Engine::new(), 7), 55092);
}

#[test]
fn perft_08() {
    assert_eq!(run_perft(&Engine::new(), 8), 390216);
}
