use crate::board::{Board, ClickOutcome};

/// Terminal cells spanned by one board cell. Input mapping and drawing
/// both divide by these; keep them in sync with `tui::draw_board`.
pub const CELL_COLS: u16 = 2;
pub const CELL_ROWS: u16 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Menu,
    Playing,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Difficulty {
    Low,
    Medium,
    High,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Low, Difficulty::Medium, Difficulty::High];

    /// (grid size, bomb count) for this preset.
    pub fn params(self) -> (usize, usize) {
        match self {
            Difficulty::Low => (10, 10),
            Difficulty::Medium => (20, 40),
            Difficulty::High => (30, 90),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Low => "Low (10x10)",
            Difficulty::Medium => "Medium (20x20)",
            Difficulty::High => "High (30x30)",
        }
    }
}

/// Maps a board-local screen position to a grid cell. Valid only inside
/// the drawn grid; anything past it (padding, chrome) maps to `None`.
pub fn cell_at(col: u16, row: u16, size: usize) -> Option<(usize, usize)> {
    let x = (col / CELL_COLS) as usize;
    let y = (row / CELL_ROWS) as usize;
    if x < size && y < size {
        Some((x, y))
    } else {
        None
    }
}

/// Owns the current phase, the active difficulty, and the board, and turns
/// input events into board operations and phase transitions.
pub struct GameController {
    phase: Phase,
    difficulty: Difficulty,
    board: Option<Board>,
    seed: u64,
}

impl GameController {
    pub fn new() -> Self {
        Self::with_seed(0)
    }

    /// Seed 0 means a fresh random layout per start; any other value
    /// reproduces the same layout on every start and restart.
    pub fn with_seed(seed: u64) -> Self {
        Self { phase: Phase::Menu, difficulty: Difficulty::Low, board: None, seed }
    }

    pub fn phase(&self) -> Phase { self.phase }
    pub fn difficulty(&self) -> Difficulty { self.difficulty }

    /// `Some` whenever phase is Playing or GameOver.
    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    /// Menu (or anywhere): begin a game at the given difficulty.
    pub fn start(&mut self, difficulty: Difficulty) -> Result<(), String> {
        let (size, bombs) = difficulty.params();
        let board = if self.seed != 0 {
            Board::with_seed(size, bombs, self.seed)?
        } else {
            Board::new(size, bombs)?
        };
        self.board = Some(board);
        self.difficulty = difficulty;
        self.phase = Phase::Playing;
        Ok(())
    }

    /// GameOver: replace the board at the same difficulty and resume play.
    pub fn restart(&mut self) -> Result<(), String> {
        if self.phase != Phase::GameOver {
            return Ok(());
        }
        self.start(self.difficulty)
    }

    /// Playing: a click at board-local screen position (col, row). Clicks
    /// outside the grid, or in any other phase, are ignored.
    pub fn click(&mut self, col: u16, row: u16) {
        if self.phase != Phase::Playing {
            return;
        }
        let Some(board) = self.board.as_mut() else { return };
        let Some((x, y)) = cell_at(col, row, board.size()) else { return };
        if board.handle_click(x, y) == ClickOutcome::Lost {
            self.phase = Phase::GameOver;
        }
    }

    /// Playing: a reveal already resolved to grid coordinates (keyboard
    /// cursor path, which bypasses the screen-position mapping).
    pub fn reveal(&mut self, x: usize, y: usize) {
        if self.phase != Phase::Playing {
            return;
        }
        let Some(board) = self.board.as_mut() else { return };
        if board.handle_click(x, y) == ClickOutcome::Lost {
            self.phase = Phase::GameOver;
        }
    }
}

impl Default for GameController {
    fn default() -> Self {
        Self::new()
    }
}
