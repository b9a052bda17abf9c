//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are plain data with no behavior beyond small helpers, making them
//! usable in any context (engine logic, terminal rendering, snapshot export).
//!
//! # Board Dimensions
//!
//! - **Size**: 8x8 square grid
//! - **Rows**: indexed 0-7 from top to bottom
//! - **Columns**: indexed 0-7 from left to right
//!
//! # Gameplay Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MIN_RUN` | 3 | Shortest run of equal colors that matches |
//! | `POINTS_PER_TILE` | 20 | Base points per matched cell |
//! | `INITIAL_MOVES` | 20 | Move budget at level 1 |
//! | `MOVES_PER_LEVEL` | 2 | Extra moves for every level above 1 |
//! | `TARGET_SCORE_PER_LEVEL` | 1500 | Target score is `level * 1500` |
//! | `MAX_RESOLVE_PASSES` | 100 | Safety cap on cascades per swap |
//!
//! # Pacing Constants
//!
//! Interactive builds pause between engine steps so the player can follow the
//! cascade. Values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frontend fixed timestep (~60 FPS) |
//! | `SETTLE_PAUSE_MS` | 300 | Pause between resolution steps |
//! | `SWAP_PAUSE_MS` | 300 | Pause showing a swap before commit or revert |
//!
//! # Examples
//!
//! ```
//! use tui_match3_types::{Coord, TileColor, GameAction, GRID_SIZE};
//!
//! let color = TileColor::from_str("Purple").unwrap();
//! assert_eq!(color, TileColor::Purple);
//!
//! let a = Coord::new(2, 3);
//! assert!(a.is_adjacent(Coord::new(2, 4)));
//! assert!(!a.is_adjacent(Coord::new(3, 4)));
//!
//! assert_eq!(GameAction::from_str("select"), Some(GameAction::Select));
//! assert_eq!(GRID_SIZE, 8);
//! ```

use serde::Serialize;

/// Board side length (8 rows, 8 columns)
pub const GRID_SIZE: usize = 8;

/// Total number of cells on the board
pub const GRID_CELLS: usize = GRID_SIZE * GRID_SIZE;

/// Shortest run of identical colors that counts as a match
pub const MIN_RUN: usize = 3;

/// Minimum palette size for which run-free generation always has a choice
pub const MIN_PALETTE_LEN: usize = 3;

/// Base points per matched cell (multiplied by `combo_index + 1`)
pub const POINTS_PER_TILE: u32 = 20;

/// Move budget at level 1
pub const INITIAL_MOVES: u32 = 20;

/// Extra moves granted for every level above 1
pub const MOVES_PER_LEVEL: u32 = 2;

/// Target score per level (target = level * 1500)
pub const TARGET_SCORE_PER_LEVEL: u32 = 1500;

/// Upper bound on detect passes within one resolution cycle
pub const MAX_RESOLVE_PASSES: u32 = 100;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Pause between resolution state transitions (interactive pacing)
pub const SETTLE_PAUSE_MS: u32 = 300;

/// Pause showing a speculative swap before it is committed or reverted
pub const SWAP_PAUSE_MS: u32 = 300;


/// The six tile colors
///
/// Declaration order defines the default palette order and the 1-based cell
/// codes used by snapshots (`0` means an empty cell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TileColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
}

impl TileColor {
    /// Every color, in palette order
    pub const ALL: [TileColor; 6] = [
        TileColor::Red,
        TileColor::Blue,
        TileColor::Green,
        TileColor::Yellow,
        TileColor::Purple,
        TileColor::Orange,
    ];

    /// Parse color from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_match3_types::TileColor;
    ///
    /// assert_eq!(TileColor::from_str("red"), Some(TileColor::Red));
    /// assert_eq!(TileColor::from_str("ORANGE"), Some(TileColor::Orange));
    /// assert_eq!(TileColor::from_str("teal"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(TileColor::Red),
            "blue" => Some(TileColor::Blue),
            "green" => Some(TileColor::Green),
            "yellow" => Some(TileColor::Yellow),
            "purple" => Some(TileColor::Purple),
            "orange" => Some(TileColor::Orange),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            TileColor::Red => "red",
            TileColor::Blue => "blue",
            TileColor::Green => "green",
            TileColor::Yellow => "yellow",
            TileColor::Purple => "purple",
            TileColor::Orange => "orange",
        }
    }

    /// Snapshot cell code (1..=6)
    pub fn code(&self) -> u8 {
        match self {
            TileColor::Red => 1,
            TileColor::Blue => 2,
            TileColor::Green => 3,
            TileColor::Yellow => 4,
            TileColor::Purple => 5,
            TileColor::Orange => 6,
        }
    }

    /// Single uppercase letter used by ASCII board layouts
    pub fn letter(&self) -> char {
        match self {
            TileColor::Red => 'R',
            TileColor::Blue => 'B',
            TileColor::Green => 'G',
            TileColor::Yellow => 'Y',
            TileColor::Purple => 'P',
            TileColor::Orange => 'O',
        }
    }

    /// Inverse of [`TileColor::letter`] (case-insensitive)
    pub fn from_letter(ch: char) -> Option<Self> {
        match ch.to_ascii_uppercase() {
            'R' => Some(TileColor::Red),
            'B' => Some(TileColor::Blue),
            'G' => Some(TileColor::Green),
            'Y' => Some(TileColor::Yellow),
            'P' => Some(TileColor::Purple),
            'O' => Some(TileColor::Orange),
            _ => None,
        }
    }

    /// Inverse of [`TileColor::code`]; `0` and unknown codes map to `None`
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(TileColor::Red),
            2 => Some(TileColor::Blue),
            3 => Some(TileColor::Green),
            4 => Some(TileColor::Yellow),
            5 => Some(TileColor::Purple),
            6 => Some(TileColor::Orange),
            _ => None,
        }
    }
}

/// Special effect tag carried by a tile
///
/// Reserved for future gameplay: the engine only ever assigns `None`, and no
/// code path triggers the other variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SpecialKind {
    #[default]
    None,
    /// Clears its row
    Horizontal,
    /// Clears its column
    Vertical,
    /// Clears a 3x3 area
    Bomb,
    /// Clears every tile of one color
    ColorBomb,
}

/// Opaque tile identifier, unique within one grid's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TileId(pub u64);

/// A cell position on the board (row 0 is the top)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub struct Coord {
    pub row: u8,
    pub col: u8,
}

impl Coord {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Manhattan distance between two cells
    pub fn manhattan(&self, other: Coord) -> u32 {
        (self.row.abs_diff(other.row) as u32) + (self.col.abs_diff(other.col) as u32)
    }

    /// Orthogonally adjacent (Manhattan distance exactly 1)
    pub fn is_adjacent(&self, other: Coord) -> bool {
        self.manhattan(other) == 1
    }

    /// Neighbour in the given direction, or `None` if it would leave the board
    pub fn offset(&self, d_row: i8, d_col: i8) -> Option<Coord> {
        let row = self.row as i16 + d_row as i16;
        let col = self.col as i16 + d_col as i16;
        if row < 0 || col < 0 || row >= GRID_SIZE as i16 || col >= GRID_SIZE as i16 {
            return None;
        }
        Some(Coord::new(row as u8, col as u8))
    }
}

/// A colored tile on the board
///
/// `row`/`col` always equal the tile's position in the grid that holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Tile {
    pub id: TileId,
    #[serde(rename = "type")]
    pub color: TileColor,
    pub special: SpecialKind,
    pub row: u8,
    pub col: u8,
}

impl Tile {
    /// Current position of the tile
    pub fn coord(&self) -> Coord {
        Coord::new(self.row, self.col)
    }

    /// Same tile moved to `at` (identity, color and special travel with it)
    pub fn moved_to(self, at: Coord) -> Self {
        Self {
            row: at.row,
            col: at.col,
            ..self
        }
    }
}

/// A cell on the board
///
/// - `None`: a hole (only exists mid-resolution)
/// - `Some(Tile)`: an occupied cell
pub type Cell = Option<Tile>;

/// Player actions understood by the game
///
/// Both the terminal key map and scripted drivers produce these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move the cursor one cell up
    CursorUp,
    /// Move the cursor one cell down
    CursorDown,
    /// Move the cursor one cell left
    CursorLeft,
    /// Move the cursor one cell right
    CursorRight,
    /// Select the tile under the cursor (or swap with the selection)
    Select,
    /// Toggle pause state
    Pause,
    /// Toggle the match sound
    ToggleSound,
    /// Start the game, or advance after a completed level
    Continue,
    /// Restart from level 1
    Restart,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_match3_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("cursorLeft"), Some(GameAction::CursorLeft));
    /// assert_eq!(GameAction::from_str("pause"), Some(GameAction::Pause));
    /// assert_eq!(GameAction::from_str("jump"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cursorup" => Some(GameAction::CursorUp),
            "cursordown" => Some(GameAction::CursorDown),
            "cursorleft" => Some(GameAction::CursorLeft),
            "cursorright" => Some(GameAction::CursorRight),
            "select" => Some(GameAction::Select),
            "pause" => Some(GameAction::Pause),
            "togglesound" => Some(GameAction::ToggleSound),
            "continue" => Some(GameAction::Continue),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::CursorUp => "cursorUp",
            GameAction::CursorDown => "cursorDown",
            GameAction::CursorLeft => "cursorLeft",
            GameAction::CursorRight => "cursorRight",
            GameAction::Select => "select",
            GameAction::Pause => "pause",
            GameAction::ToggleSound => "toggleSound",
            GameAction::Continue => "continue",
            GameAction::Restart => "restart",
        }
    }
}
