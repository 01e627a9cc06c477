//! Two-tap pairing protocol for the match round.
//!
//! A tap selects a tile on its side, replacing any earlier pick on that side. When
//! both sides hold a pick the controller locks, evaluates the pair against the
//! ledger and unlocks again, unless the ledger reports the session failed.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::ledger::{LedgerVerdict, ScoreLedger};
use crate::puzzle::MatchPuzzle;
use crate::types::{MatchTile, Pair, PairId, Side};

/// Result of a single tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// Locked, out of range, or the tile belongs to a solved pair.
    Ignored,
    Selected {
        side: Side,
        index: usize,
    },
    Matched {
        pair_id: PairId,
        left_index: usize,
        right_index: usize,
        verdict: LedgerVerdict,
        round_complete: bool,
    },
    Mismatched {
        left_index: usize,
        right_index: usize,
        verdict: LedgerVerdict,
    },
}

/// A tile as the grid currently shows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileView {
    #[serde(flatten)]
    pub tile: MatchTile,
    pub disabled: bool,
    pub selected: bool,
}

/// Snapshot of the match grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchGridView {
    pub left: Vec<TileView>,
    pub right: Vec<TileView>,
    pub solved: usize,
    pub total_pairs: usize,
    pub locked: bool,
}

#[derive(Debug, Clone)]
pub struct MatchController {
    pairs: Vec<Pair>,
    left_tiles: Vec<MatchTile>,
    right_tiles: Vec<MatchTile>,
    solved: HashSet<PairId>,
    selected_left: Option<usize>,
    selected_right: Option<usize>,
    locked: bool,
}

impl MatchController {
    pub fn new(puzzle: MatchPuzzle) -> Self {
        Self {
            pairs: puzzle.pairs,
            left_tiles: puzzle.left_tiles,
            right_tiles: puzzle.right_tiles,
            solved: HashSet::new(),
            selected_left: None,
            selected_right: None,
            locked: false,
        }
    }

    pub fn tap(&mut self, side: Side, index: usize, ledger: &mut ScoreLedger) -> TapOutcome {
        if self.locked || self.is_tile_disabled(side, index) {
            return TapOutcome::Ignored;
        }

        match side {
            Side::Left => self.selected_left = Some(index),
            Side::Right => self.selected_right = Some(index),
        }

        let (Some(left_index), Some(right_index)) = (self.selected_left, self.selected_right)
        else {
            return TapOutcome::Selected { side, index };
        };

        self.locked = true;
        let pair_id = self.left_tiles[left_index].pair_id;
        let is_match = pair_id == self.right_tiles[right_index].pair_id;

        self.selected_left = None;
        self.selected_right = None;

        if is_match {
            self.solved.insert(pair_id);
            let verdict = ledger.register_correct();
            self.locked = false;
            return TapOutcome::Matched {
                pair_id,
                left_index,
                right_index,
                verdict,
                round_complete: self.is_complete(),
            };
        }

        let verdict = ledger.register_wrong();
        if verdict != LedgerVerdict::SessionFailed {
            self.locked = false;
        }
        TapOutcome::Mismatched {
            left_index,
            right_index,
            verdict,
        }
    }

    /// Whether a tap on this tile would be ignored regardless of lock state.
    pub fn is_tile_disabled(&self, side: Side, index: usize) -> bool {
        match self.tiles(side).get(index) {
            Some(tile) => self.solved.contains(&tile.pair_id),
            None => true,
        }
    }

    pub fn tiles(&self, side: Side) -> &[MatchTile] {
        match side {
            Side::Left => &self.left_tiles,
            Side::Right => &self.right_tiles,
        }
    }

    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    pub fn solved_count(&self) -> usize {
        self.solved.len()
    }

    pub fn is_solved(&self, pair_id: PairId) -> bool {
        self.solved.contains(&pair_id)
    }

    pub fn is_complete(&self) -> bool {
        self.solved.len() >= self.pairs.len()
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn selection(&self) -> (Option<usize>, Option<usize>) {
        (self.selected_left, self.selected_right)
    }

    pub fn view(&self) -> MatchGridView {
        let side_view = |side: Side, selected: Option<usize>| -> Vec<TileView> {
            self.tiles(side)
                .iter()
                .enumerate()
                .map(|(i, tile)| TileView {
                    tile: tile.clone(),
                    disabled: self.solved.contains(&tile.pair_id),
                    selected: selected == Some(i),
                })
                .collect()
        };

        MatchGridView {
            left: side_view(Side::Left, self.selected_left),
            right: side_view(Side::Right, self.selected_right),
            solved: self.solved.len(),
            total_pairs: self.pairs.len(),
            locked: self.locked,
        }
    }
}
