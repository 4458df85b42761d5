//! Relaxed selection produced by variation operators.
//!
//! Bitwise moves (ABC neighbor blending, TLBO teacher and learner moves)
//! work on an item-marking matrix in which a class may end up with zero or
//! several marked items. A [`Draft`] holds such a matrix; choice repair
//! turns it back into a [`Solution`](super::Solution) with exactly one item
//! per class.

use super::{DataSet, Solution};

/// Per-class item marks. Any subset of a class may be marked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    marks: Vec<Vec<bool>>,
}

impl Draft {
    /// A draft with no item marked in any class.
    pub fn empty(data: &DataSet) -> Self {
        Self {
            marks: (0..data.class_count())
                .map(|c| vec![false; data.items_in(c)])
                .collect(),
        }
    }

    /// The one-hot draft of a solution.
    pub fn from_solution(data: &DataSet, sol: &Solution) -> Self {
        let mut draft = Self::empty(data);
        for (c, &i) in sol.selection().iter().enumerate() {
            draft.marks[c][i] = true;
        }
        draft
    }

    /// Number of classes.
    pub fn class_count(&self) -> usize {
        self.marks.len()
    }

    /// Number of items in class `c`.
    pub fn items_in(&self, c: usize) -> usize {
        self.marks[c].len()
    }

    /// Whether item `i` of class `c` is marked.
    pub fn is_marked(&self, c: usize, i: usize) -> bool {
        self.marks[c][i]
    }

    /// Marks or unmarks item `i` of class `c`.
    pub fn set(&mut self, c: usize, i: usize, marked: bool) {
        self.marks[c][i] = marked;
    }

    /// Marked item indices of class `c`, ascending.
    pub fn marked(&self, c: usize) -> impl Iterator<Item = usize> + '_ {
        self.marks[c]
            .iter()
            .enumerate()
            .filter(|(_, &m)| m)
            .map(|(i, _)| i)
    }

    /// Number of marked items in class `c`.
    pub fn marked_count(&self, c: usize) -> usize {
        self.marks[c].iter().filter(|&&m| m).count()
    }

    /// Whether every class has exactly one marked item.
    pub fn is_one_hot(&self) -> bool {
        (0..self.marks.len()).all(|c| self.marked_count(c) == 1)
    }
}
