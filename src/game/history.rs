//! Rolling histories behind the behavioral reward terms.
//!
//! [`TurnHistory`] watches the recent action symbols for turn patterns and
//! [`PathHistory`] watches recent head cells for loops and first visits.
//! Both are episode-scoped and cleared on reset.

use std::collections::{HashSet, VecDeque};

use super::action::Action;
use super::state::Cell;

/// Longest action pattern we match against
const TURN_WINDOW: usize = 4;
/// How many recent head cells are retained
const PATH_WINDOW: usize = 50;
/// Span of the loop check, in cells
const LOOP_SPAN: usize = 25;
/// Fewer distinct cells than this across the span counts as a loop
const LOOP_DISTINCT_MIN: usize = 15;

/// A recognized pattern in the recent actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPattern {
    /// Three turns the same way in a row
    TripleTurn,
    /// A turn, two straights, then the opposite turn
    LaneChange,
}

/// Bounded window of the most recent actions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TurnHistory {
    window: VecDeque<Action>,
}

impl TurnHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an action and report any pattern it completes.
    ///
    /// A match consumes the window, so overlapping occurrences never fire
    /// twice off the same actions.
    pub fn record(&mut self, action: Action) -> Option<TurnPattern> {
        self.window.push_back(action);
        if self.window.len() > TURN_WINDOW {
            self.window.pop_front();
        }

        if self.ends_with(&[Action::TurnRight; 3]) || self.ends_with(&[Action::TurnLeft; 3]) {
            self.clear();
            return Some(TurnPattern::TripleTurn);
        }

        let left_first = [
            Action::TurnLeft,
            Action::Straight,
            Action::Straight,
            Action::TurnRight,
        ];
        let right_first = [
            Action::TurnRight,
            Action::Straight,
            Action::Straight,
            Action::TurnLeft,
        ];
        if self.ends_with(&left_first) || self.ends_with(&right_first) {
            self.clear();
            return Some(TurnPattern::LaneChange);
        }

        None
    }

    pub fn clear(&mut self) {
        self.window.clear();
    }

    fn ends_with(&self, pattern: &[Action]) -> bool {
        self.window.len() >= pattern.len()
            && self
                .window
                .iter()
                .rev()
                .zip(pattern.iter().rev())
                .all(|(a, b)| a == b)
    }
}

/// Recent head cells plus the set of cells visited this episode
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathHistory {
    recent: VecDeque<Cell>,
    explored: HashSet<Cell>,
}

impl PathHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a head cell to the trail
    pub fn push(&mut self, cell: Cell) {
        self.recent.push_back(cell);
        if self.recent.len() > PATH_WINDOW {
            self.recent.pop_front();
        }
    }

    /// True once the last [`LOOP_SPAN`] cells cover too few distinct cells.
    /// Short trails never loop.
    pub fn is_looping(&self) -> bool {
        if self.recent.len() < LOOP_SPAN {
            return false;
        }
        let distinct: HashSet<&Cell> = self.recent.iter().rev().take(LOOP_SPAN).collect();
        distinct.len() < LOOP_DISTINCT_MIN
    }

    /// Mark a cell visited; true only on its first visit this episode
    pub fn mark_explored(&mut self, cell: Cell) -> bool {
        self.explored.insert(cell)
    }
}
