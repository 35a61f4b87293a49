//! Full-game playouts, for differential tests between rule variants.

use crate::engine::Engine;
use crate::game::{Action, GameState, Player};

/// One finished game: every action in order, plus the final state.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Playout {
    pub actions: Vec<(Player, Action)>,
    pub final_state: GameState,
}

/// Play a full game, `choose` picking an index into the acting player's
/// legal actions on each turn. A deterministic chooser reproduces the same
/// game on every run, which lets two engines be compared move for move.
///
/// `choose` must return an index below the length of the slice it is given.
pub fn playout<F>(engine: &Engine, mut choose: F) -> Playout
where
    F: FnMut(&[Action]) -> usize,
{
    let mut state = engine.initialize();
    let mut to_move = Player::default();
    let mut actions = Vec::new();

    while !state.done() {
        if state.need_jump(to_move) {
            to_move = !to_move;
            continue;
        }

        let options: Vec<Action> = state.legal_moves(to_move).locations().collect();
        let action = options[choose(&options)];

        state = engine.step(&state, to_move.id(), action).unwrap();
        actions.push((to_move, action));
        to_move = !to_move;
    }

    Playout {
        actions,
        final_state: state,
    }
}
