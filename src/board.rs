use indexmap::IndexSet;
use rand::{RngCore, SeedableRng, distributions::{Distribution, Uniform}, rngs::OsRng};
use rand_xoshiro::Xoshiro256PlusPlus as BaseRng;

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Error {
    OOB,
    Dead,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Dim {
    Square(usize),
    Rect(usize, usize),
}

impl Dim {
    fn w(&self) -> usize {
        match self {
            Dim::Square(n) => *n,
            Dim::Rect(n, _) => *n,
        }
    }
    fn h(&self) -> usize {
        match self {
            Dim::Square(n) => *n,
            Dim::Rect(_, n) => *n,
        }
    }
}

/// The ground truth the player probes against: the true mine layout plus the
/// mines flagged so far. Cells are `(row, col)`.
pub struct Board {
    mines: IndexSet<(usize, usize)>,
    mines_found: IndexSet<(usize, usize)>,
    dims: (usize, usize), // (h, w)
}

// Helpers
impl Board {
    pub fn is_loc(&self, (row, col): (usize, usize)) -> bool {
        (0..self.dims.0).contains(&row) && (0..self.dims.1).contains(&col)
    }

    pub fn surroundings_of(&self, loc: (usize, usize)) -> impl Iterator<Item = (usize, usize)> {
        let (h, w) = self.dims;
        (0..9)
            .map(|i| (i / 3, i % 3))
            // Remove out of bounds and loc itself.
            .filter(move |&offset| {
                if offset == (1, 1) {
                    return false;
                }
                if offset.0 == 0 && loc.0 == 0 {
                    return false;
                }
                if offset.0 == 2 && loc.0 == h - 1 {
                    return false;
                }
                if offset.1 == 0 && loc.1 == 0 {
                    return false;
                }
                if offset.1 == 2 && loc.1 == w - 1 {
                    return false;
                }
                true
            })
            // Offsets of 0 decrement, 2 increment, 1 stay put.
            .map(move |offset| {
                let row = match offset.0 {
                    0 => loc.0 - 1,
                    2 => loc.0 + 1,
                    _ => loc.0,
                };
                let col = match offset.1 {
                    0 => loc.1 - 1,
                    2 => loc.1 + 1,
                    _ => loc.1,
                };
                (row, col)
            })
    }

    pub fn w(&self) -> usize {
        self.dims.1
    }

    pub fn h(&self) -> usize {
        self.dims.0
    }
}

// Constructors
impl Board {
    pub fn new(dim: Dim, num_mines: u64) -> Result<Self, ()> {
        let mut seed = [0; 32];
        OsRng.fill_bytes(&mut seed);
        Self::new_seeded(dim, num_mines, seed)
    }

    pub fn new_seeded(
        dim: Dim,
        num_mines: u64,
        seed: <BaseRng as SeedableRng>::Seed,
    ) -> Result<Self, ()> {
        if dim.w() == 0 || dim.h() == 0 || num_mines >= (dim.w() * dim.h()) as u64 {
            return Err(());
        }
        let mut randos = BaseRng::from_seed(seed);

        let row_range = Uniform::from(0..dim.h());
        let col_range = Uniform::from(0..dim.w());

        let mut locs = IndexSet::new();
        while (locs.len() as u64) < num_mines {
            locs.insert((row_range.sample(&mut randos), col_range.sample(&mut randos)));
        }

        Self::new_fixed(dim, locs)
    }

    pub fn new_fixed<I>(dim: Dim, locs: I) -> Result<Self, ()>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let board = Self {
            mines: locs.into_iter().collect(),
            mines_found: IndexSet::new(),
            dims: (dim.h(), dim.w()),
        };
        for &loc in &board.mines {
            if !board.is_loc(loc) {
                return Err(());
            }
        }
        Ok(board)
    }
}

// Probing and flagging.
impl Board {
    pub fn is_mine(&self, loc: (usize, usize)) -> bool {
        self.mines.contains(&loc)
    }

    pub fn nearby_mines(&self, loc: (usize, usize)) -> u8 {
        self.surroundings_of(loc)
            .filter(|s| self.mines.contains(s))
            .count() as u8
    }

    /// Reveal the clue at `loc`. Probing a mine ends the game.
    pub fn probe(&self, loc: (usize, usize)) -> Result<u8, Error> {
        if !self.is_loc(loc) {
            return Err(Error::OOB);
        }
        if self.is_mine(loc) {
            return Err(Error::Dead);
        }
        Ok(self.nearby_mines(loc))
    }

    pub fn flag(&mut self, loc: (usize, usize)) {
        if self.is_loc(loc) {
            self.mines_found.insert(loc);
        }
    }

    /// Every mine has been flagged, and nothing else.
    pub fn won(&self) -> bool {
        self.mines_found == self.mines
    }

    /// Every cell that is not a mine has been probed.
    pub fn is_swept(&self, probed: &IndexSet<(usize, usize)>) -> bool {
        let (h, w) = self.dims;
        for row in 0..h {
            for col in 0..w {
                if !self.mines.contains(&(row, col)) && !probed.contains(&(row, col)) {
                    return false;
                }
            }
        }
        true
    }
}

impl Board {
    pub fn display(
        &self,
        probed: &IndexSet<(usize, usize)>,
        flagged: &IndexSet<(usize, usize)>,
    ) -> Box<[Box<[char]>]> {
        let (h, w) = self.dims;
        let mut snippet = vec![vec!['\u{25A1}'; w]; h]
            .into_iter()
            .map(|row| row.into_boxed_slice())
            .collect::<Vec<_>>()
            .into_boxed_slice();
        for row in 0..h {
            for col in 0..w {
                snippet[row][col] = if flagged.contains(&(row, col)) {
                    'F'
                } else if probed.contains(&(row, col)) {
                    (b'0' + self.nearby_mines((row, col))) as char
                } else {
                    '\u{25A1}'
                };
            }
        }
        snippet
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use indexmap::indexset;

    #[test]
    fn surroundings_respect_edges() {
        let board = Board::new_fixed(Dim::Square(3), vec![]).unwrap();
        assert_eq!(board.surroundings_of((0, 0)).count(), 3);
        assert_eq!(board.surroundings_of((0, 1)).count(), 5);
        assert_eq!(board.surroundings_of((1, 1)).count(), 8);
        assert_eq!(board.surroundings_of((2, 2)).count(), 3);
    }

    #[test]
    fn probe_reports_adjacent_mines() {
        let board = Board::new_fixed(Dim::Square(3), vec![(0, 0), (2, 2)]).unwrap();
        assert_eq!(board.probe((1, 1)), Ok(2));
        assert_eq!(board.probe((0, 2)), Ok(0));
        assert_eq!(board.probe((2, 1)), Ok(1));
    }

    #[test]
    fn probe_rejects_mines_and_oob() {
        let board = Board::new_fixed(Dim::Square(3), vec![(0, 0)]).unwrap();
        assert_eq!(board.probe((0, 0)), Err(Error::Dead));
        assert_eq!(board.probe((3, 0)), Err(Error::OOB));
    }

    #[test]
    fn seeded_boards_replay() {
        let seed = [7; 32];
        let a = Board::new_seeded(Dim::Rect(5, 4), 6, seed).unwrap();
        let b = Board::new_seeded(Dim::Rect(5, 4), 6, seed).unwrap();
        assert_eq!(a.mines, b.mines);
        assert_eq!(a.mines.len(), 6);
        for &loc in &a.mines {
            assert!(a.is_loc(loc));
        }
    }

    #[test]
    fn overfull_board_is_rejected() {
        assert!(Board::new_seeded(Dim::Square(2), 4, [0; 32]).is_err());
        assert!(Board::new_seeded(Dim::Rect(0, 3), 0, [0; 32]).is_err());
    }

    #[test]
    fn won_once_all_mines_flagged() {
        let mut board = Board::new_fixed(Dim::Square(3), vec![(0, 0), (1, 2)]).unwrap();
        assert!(!board.won());
        board.flag((0, 0));
        assert!(!board.won());
        board.flag((1, 2));
        assert!(board.won());
    }

    #[test]
    fn swept_once_all_safe_cells_probed() {
        let board = Board::new_fixed(Dim::Rect(2, 2), vec![(0, 0)]).unwrap();
        let mut probed = indexset! {(0, 1), (1, 0)};
        assert!(!board.is_swept(&probed));
        probed.insert((1, 1));
        assert!(board.is_swept(&probed));
    }
}
