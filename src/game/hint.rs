//! Hint lookup
//!
//! Walks the undiscovered targets in target order and greedily claims free
//! tiles letter by letter. The first word that can be fully claimed wins.
//! Finding nothing is a normal answer, not an error.

use super::state::GameState;
use super::TileId;

/// A formable target word and the exact tiles that spell it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hint {
    pub word: String,
    pub tile_ids: Vec<TileId>,
}

pub fn find_hint(state: &GameState) -> Option<Hint> {
    let free: Vec<(TileId, char)> = state
        .unused_tiles()
        .map(|t| (t.id, t.letter.to_ascii_lowercase()))
        .collect();

    let undiscovered = state.target_words().iter().filter(|target| {
        !state
            .discovered_words()
            .iter()
            .any(|d| d.eq_ignore_ascii_case(target))
    });

    for target in undiscovered {
        if let Some(tile_ids) = claim_tiles(target, &free) {
            tracing::debug!(word = %target, "hint found");
            return Some(Hint {
                word: target.clone(),
                tile_ids,
            });
        }
    }

    tracing::debug!("no hint available");
    None
}

/// Claim one free tile per letter of `word`, left to right.
fn claim_tiles(word: &str, free: &[(TileId, char)]) -> Option<Vec<TileId>> {
    let mut claimed = vec![false; free.len()];
    let mut ids = Vec::with_capacity(word.len());

    for letter in word.chars().map(|c| c.to_ascii_lowercase()) {
        let idx = free
            .iter()
            .enumerate()
            .position(|(i, (_, c))| !claimed[i] && *c == letter)?;
        claimed[idx] = true;
        ids.push(free[idx].0);
    }

    Some(ids)
}
