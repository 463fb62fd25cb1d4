use indexmap::IndexSet;

/// A logical statement about the board: exactly `count` of `cells` are mines.
///
/// Cells are `(row, col)` pairs. The set is insertion-ordered so that
/// iteration is deterministic, but equality is set-semantic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    cells: IndexSet<(usize, usize)>,
    count: usize,
}

impl Sentence {
    pub fn new(cells: IndexSet<(usize, usize)>, count: usize) -> Self {
        debug_assert!(count <= cells.len(), "sentence claims more mines than cells");
        Self { cells, count }
    }

    pub fn cells(&self) -> &IndexSet<(usize, usize)> {
        &self.cells
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// All cells have been extracted as known facts; nothing left to say.
    pub fn is_resolved(&self) -> bool {
        self.cells.is_empty()
    }

    /// Every remaining cell must be a mine, if the count has caught up with
    /// the cell set. An empty sentence yields no conclusion.
    pub fn known_mines(&self) -> Option<&IndexSet<(usize, usize)>> {
        if !self.cells.is_empty() && self.cells.len() == self.count {
            Some(&self.cells)
        } else {
            None
        }
    }

    /// Every remaining cell must be safe, if no mines are left to account for.
    pub fn known_safes(&self) -> Option<&IndexSet<(usize, usize)>> {
        if !self.cells.is_empty() && self.count == 0 {
            Some(&self.cells)
        } else {
            None
        }
    }

    /// Incorporate the fact that `cell` is a mine. One fewer unknown, one
    /// fewer mine to find. No-op for cells outside the sentence.
    pub fn mark_mine(&mut self, cell: (usize, usize)) {
        if self.cells.shift_remove(&cell) {
            self.count -= 1;
        }
        debug_assert!(self.count <= self.cells.len(), "sentence claims more mines than cells");
    }

    /// Incorporate the fact that `cell` is safe. The mine count is untouched.
    pub fn mark_safe(&mut self, cell: (usize, usize)) {
        self.cells.shift_remove(&cell);
        debug_assert!(self.count <= self.cells.len(), "sentence claims more mines than cells");
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use indexmap::indexset;

    #[test]
    fn saturated_sentence_knows_its_mines() {
        let s = Sentence::new(indexset! {(0, 0), (0, 1), (1, 1)}, 3);
        assert_eq!(s.known_mines(), Some(&indexset! {(0, 0), (0, 1), (1, 1)}));
        assert_eq!(s.known_safes(), None);
    }

    #[test]
    fn exhausted_sentence_knows_its_safes() {
        let s = Sentence::new(indexset! {(0, 0), (0, 1)}, 0);
        assert_eq!(s.known_safes(), Some(&indexset! {(0, 0), (0, 1)}));
        assert_eq!(s.known_mines(), None);
    }

    #[test]
    fn partial_sentence_knows_nothing() {
        let s = Sentence::new(indexset! {(0, 0), (0, 1), (1, 1)}, 1);
        assert_eq!(s.known_mines(), None);
        assert_eq!(s.known_safes(), None);
    }

    #[test]
    fn resolved_sentence_yields_no_conclusions() {
        let s = Sentence::new(IndexSet::new(), 0);
        assert!(s.is_resolved());
        assert_eq!(s.known_mines(), None);
        assert_eq!(s.known_safes(), None);
    }

    #[test]
    fn mark_mine_removes_cell_and_decrements() {
        let mut s = Sentence::new(indexset! {(0, 0), (0, 1), (1, 1)}, 2);
        s.mark_mine((0, 1));
        assert_eq!(s.cells(), &indexset! {(0, 0), (1, 1)});
        assert_eq!(s.count(), 1);
    }

    #[test]
    fn mark_mine_ignores_foreign_cells() {
        let mut s = Sentence::new(indexset! {(0, 0), (0, 1)}, 1);
        s.mark_mine((5, 5));
        assert_eq!(s.cells(), &indexset! {(0, 0), (0, 1)});
        assert_eq!(s.count(), 1);
    }

    #[test]
    fn mark_safe_removes_cell_and_keeps_count() {
        let mut s = Sentence::new(indexset! {(0, 0), (0, 1), (1, 1)}, 1);
        s.mark_safe((1, 1));
        assert_eq!(s.cells(), &indexset! {(0, 0), (0, 1)});
        assert_eq!(s.count(), 1);
        s.mark_safe((9, 9));
        assert_eq!(s.count(), 1);
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let a = Sentence::new(indexset! {(0, 0), (0, 1)}, 1);
        let b = Sentence::new(indexset! {(0, 1), (0, 0)}, 1);
        let c = Sentence::new(indexset! {(0, 1), (0, 0)}, 2);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
