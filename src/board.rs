use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Cell value marking a bomb; non-bomb cells hold their neighbor count (0-8).
pub const BOMB: i8 = -1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    Continue,
    Lost,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Cell {
    value: i8,
    revealed: bool,
}

impl Cell {
    pub fn value(&self) -> i8 { self.value }
    pub fn revealed(&self) -> bool { self.revealed }
    pub fn is_bomb(&self) -> bool { self.value == BOMB }
}

/// Square minesweeper grid: bomb layout, neighbor counts, reveal state.
pub struct Board {
    size: usize,
    bomb_count: usize,
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(size: usize, bomb_count: usize) -> Result<Self, String> {
        Self::with_rng(size, bomb_count, &mut rand::thread_rng())
    }

    /// Builds a board using the given random source, so tests can pass a
    /// seeded `StdRng` and get a reproducible layout.
    pub fn with_rng<R: Rng + ?Sized>(size: usize, bomb_count: usize, rng: &mut R) -> Result<Self, String> {
        let mut board = Self::empty(size, bomb_count)?;
        // Shuffle-based placement: always terminates, unlike drawing random
        // coordinates until an unused one comes up.
        let mut positions: Vec<usize> = (0..size * size).collect();
        positions.shuffle(rng);
        board.place_bombs(&positions[..bomb_count]);
        Ok(board)
    }

    pub fn with_seed(size: usize, bomb_count: usize, seed: u64) -> Result<Self, String> {
        Self::with_rng(size, bomb_count, &mut StdRng::seed_from_u64(seed))
    }

    /// Test seam: deterministic placement at explicit coordinates.
    pub fn with_bombs_at(size: usize, bombs: &[(usize, usize)]) -> Result<Self, String> {
        let mut board = Self::empty(size, bombs.len())?;
        let mut indices = Vec::with_capacity(bombs.len());
        for &(x, y) in bombs {
            if x >= size || y >= size {
                return Err(format!("Bomb position ({}, {}) outside {}x{} grid", x, y, size, size));
            }
            let i = board.idx(x, y);
            if indices.contains(&i) {
                return Err(format!("Duplicate bomb position ({}, {})", x, y));
            }
            indices.push(i);
        }
        board.place_bombs(&indices);
        Ok(board)
    }

    fn empty(size: usize, bomb_count: usize) -> Result<Self, String> {
        if size == 0 {
            return Err("Board size must be positive".into());
        }
        if bomb_count >= size * size {
            return Err(format!(
                "Bomb count {} must be less than the {} cells of a {}x{} grid",
                bomb_count,
                size * size,
                size,
                size
            ));
        }
        Ok(Self { size, bomb_count, cells: vec![Cell::default(); size * size] })
    }

    fn place_bombs(&mut self, indices: &[usize]) {
        for &i in indices {
            self.cells[i].value = BOMB;
        }
        // Bump every in-bounds non-bomb neighbor of each bomb. Increments
        // commute, so the final counts do not depend on placement order.
        for &i in indices {
            let (x, y) = (i % self.size, i / self.size);
            for (nx, ny) in neighbors(self.size, x, y) {
                let n = self.idx(nx, ny);
                if self.cells[n].value != BOMB {
                    self.cells[n].value += 1;
                }
            }
        }
    }

    /// Reveals (x, y); out-of-bounds and already-revealed requests are
    /// no-ops. A zero-valued cell opens its whole zero component plus the
    /// numbered border, via an explicit work-list rather than recursion.
    ///
    /// No bomb check here: callers branch on the bomb case first (see
    /// `handle_click`), and the flood itself cannot reach a bomb since a
    /// zero cell has no bomb neighbors.
    pub fn reveal_cell(&mut self, x: usize, y: usize) {
        let mut stack = vec![(x, y)];
        while let Some((cx, cy)) = stack.pop() {
            if cx >= self.size || cy >= self.size {
                continue;
            }
            let i = self.idx(cx, cy);
            if self.cells[i].revealed {
                continue;
            }
            self.cells[i].revealed = true;
            if self.cells[i].value == 0 {
                for (nx, ny) in neighbors(self.size, cx, cy) {
                    if !self.cells[self.idx(nx, ny)].revealed {
                        stack.push((nx, ny));
                    }
                }
            }
        }
    }

    /// Resolves a click on a cell. A bomb reports `Lost` and leaves the
    /// reveal state untouched; anything else reveals and continues.
    pub fn handle_click(&mut self, x: usize, y: usize) -> ClickOutcome {
        if x >= self.size || y >= self.size {
            return ClickOutcome::Continue;
        }
        if self.cells[self.idx(x, y)].value == BOMB {
            ClickOutcome::Lost
        } else {
            self.reveal_cell(x, y);
            ClickOutcome::Continue
        }
    }

    pub fn size(&self) -> usize { self.size }
    pub fn bomb_count(&self) -> usize { self.bomb_count }

    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        if x < self.size && y < self.size {
            Some(&self.cells[self.idx(x, y)])
        } else {
            None
        }
    }

    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.size + x
    }
}

/// In-bounds Moore neighborhood of (x, y), self excluded.
pub fn neighbors(size: usize, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> {
    let (x, y, s) = (x as isize, y as isize, size as isize);
    let mut out = Vec::with_capacity(8);
    for dy in -1..=1 {
        for dx in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let (nx, ny) = (x + dx, y + dy);
            if nx >= 0 && ny >= 0 && nx < s && ny < s {
                out.push((nx as usize, ny as usize));
            }
        }
    }
    out.into_iter()
}
