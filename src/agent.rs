use indexmap::IndexSet;
use itertools::Itertools;
use rand::{Rng, seq::SliceRandom};

mod sentence;
pub use sentence::Sentence;

/// The player's accumulated knowledge about one game: which cells have been
/// probed, which are proven safe or proven mines, and the sentences still
/// open. Sentences are owned exclusively by the agent and only mutated
/// through its marking methods.
pub struct Agent {
    height: usize,
    width: usize,
    moves_made: IndexSet<(usize, usize)>,
    mines: IndexSet<(usize, usize)>,
    safes: IndexSet<(usize, usize)>,
    knowledge: Vec<Sentence>,
}

// Construction and read access.
impl Agent {
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            moves_made: IndexSet::new(),
            mines: IndexSet::new(),
            safes: IndexSet::new(),
            knowledge: Vec::new(),
        }
    }

    pub fn mines(&self) -> &IndexSet<(usize, usize)> {
        &self.mines
    }

    pub fn safes(&self) -> &IndexSet<(usize, usize)> {
        &self.safes
    }

    pub fn moves_made(&self) -> &IndexSet<(usize, usize)> {
        &self.moves_made
    }
}

// Global fact propagation.
impl Agent {
    /// Record that `cell` is a mine and push the fact into every sentence.
    pub fn mark_mine(&mut self, cell: (usize, usize)) {
        debug_assert!(!self.safes.contains(&cell), "cell proven both mine and safe");
        self.mines.insert(cell);
        for sentence in &mut self.knowledge {
            sentence.mark_mine(cell);
        }
    }

    /// Record that `cell` is safe and push the fact into every sentence.
    pub fn mark_safe(&mut self, cell: (usize, usize)) {
        debug_assert!(!self.mines.contains(&cell), "cell proven both mine and safe");
        self.safes.insert(cell);
        for sentence in &mut self.knowledge {
            sentence.mark_safe(cell);
        }
    }
}

// Clue ingestion and inference.
impl Agent {
    /// The neighbors of `cell` whose state is still undetermined, along with
    /// the clue adjusted for neighbors already proven to be mines. The clue
    /// counts every adjacent mine, so known ones must be subtracted before
    /// the remainder can be stated as a sentence.
    fn undetermined_neighbors(
        &self,
        (row, col): (usize, usize),
        clue: usize,
    ) -> (IndexSet<(usize, usize)>, usize) {
        let mut neighbors = IndexSet::new();
        let mut count = clue;
        for r in row.saturating_sub(1)..=(row + 1).min(self.height - 1) {
            for c in col.saturating_sub(1)..=(col + 1).min(self.width - 1) {
                if (r, c) == (row, col) {
                    continue;
                }
                if self.mines.contains(&(r, c)) {
                    count -= 1;
                } else if !self.safes.contains(&(r, c)) {
                    neighbors.insert((r, c));
                }
            }
        }
        (neighbors, count)
    }

    /// Ingest the clue revealed for a freshly probed safe cell, then derive
    /// everything a single round of inference can reach.
    ///
    /// The pairwise step compares the new sentence against the sentences held
    /// when the step starts and is not rerun within this call, so full
    /// saturation may take several successive clues. Facts learned mid-pass
    /// are still propagated into every sentence immediately, which is why
    /// later comparisons see sentences in their current, shrunken form.
    pub fn add_knowledge(&mut self, cell: (usize, usize), clue: u8) {
        self.moves_made.insert(cell);
        self.mark_safe(cell);

        let (new_cells, new_count) = self.undetermined_neighbors(cell, clue as usize);

        self.knowledge.push(Sentence::new(new_cells.clone(), new_count));
        let new_idx = self.knowledge.len() - 1;

        // Trivial resolution of the fresh sentence.
        if new_count == 0 {
            for &loc in &new_cells {
                self.mark_safe(loc);
            }
        }
        if new_count == new_cells.len() {
            for &loc in &new_cells {
                self.mark_mine(loc);
            }
        }

        // Pairwise subset inference against the snapshot of the new sentence.
        // A sentence wholly contained in another pins down their difference.
        let mut inferences = Vec::new();
        for i in 0..self.knowledge.len() {
            if self.knowledge[i] == self.knowledge[new_idx] {
                continue;
            }

            if self.knowledge[i].cells().is_subset(&new_cells) {
                let diff: IndexSet<_> = new_cells
                    .difference(self.knowledge[i].cells())
                    .copied()
                    .collect();
                let diff_count = new_count - self.knowledge[i].count();
                if diff.len() == diff_count {
                    for loc in diff {
                        self.mark_mine(loc);
                    }
                } else if diff_count == 0 {
                    for loc in diff {
                        self.mark_safe(loc);
                    }
                } else {
                    inferences.push(Sentence::new(diff, diff_count));
                }
            }

            if self.knowledge[i].cells().is_superset(&new_cells) {
                let diff: IndexSet<_> = self.knowledge[i]
                    .cells()
                    .difference(&new_cells)
                    .copied()
                    .collect();
                let diff_count = self.knowledge[i].count() - new_count;
                if diff.len() == diff_count {
                    for loc in diff {
                        self.mark_mine(loc);
                    }
                } else if diff_count == 0 {
                    for loc in diff {
                        self.mark_safe(loc);
                    }
                } else {
                    inferences.push(Sentence::new(diff, diff_count));
                }
            }
        }
        self.knowledge.extend(inferences);

        // Deduplicate by value, keeping first occurrences in order.
        let mut unique: Vec<Sentence> = Vec::with_capacity(self.knowledge.len());
        for sentence in std::mem::take(&mut self.knowledge) {
            if !unique.contains(&sentence) {
                unique.push(sentence);
            }
        }
        self.knowledge = unique;

        // Resolution sweep: extract conclusions, retire spent sentences.
        let mut i = 0;
        while i < self.knowledge.len() {
            let found_mines: Vec<_> = self.knowledge[i]
                .known_mines()
                .map(|cells| cells.iter().copied().collect())
                .unwrap_or_default();
            let found_safes: Vec<_> = self.knowledge[i]
                .known_safes()
                .map(|cells| cells.iter().copied().collect())
                .unwrap_or_default();

            if found_mines.is_empty() && found_safes.is_empty() && !self.knowledge[i].is_resolved() {
                i += 1;
                continue;
            }
            for loc in found_mines {
                self.mark_mine(loc);
            }
            for loc in found_safes {
                self.mark_safe(loc);
            }
            self.knowledge.remove(i);
        }
    }
}

// Move selection.
impl Agent {
    /// A cell proven safe that has not been probed yet, if any. Reads the
    /// knowledge without mutating it; picks in proof order.
    pub fn make_safe_move(&self) -> Option<(usize, usize)> {
        self.safes.difference(&self.moves_made).next().copied()
    }

    /// A uniformly random cell among those not probed and not proven to be
    /// mines. Proven-safe cells that were never probed stay eligible. `None`
    /// once only mines remain.
    pub fn make_random_move<R: Rng>(&self, rng: &mut R) -> Option<(usize, usize)> {
        let candidates = (0..self.height)
            .cartesian_product(0..self.width)
            .filter(|loc| !self.mines.contains(loc) && !self.moves_made.contains(loc))
            .collect::<Vec<_>>();
        candidates.choose(rng).copied()
    }
}
