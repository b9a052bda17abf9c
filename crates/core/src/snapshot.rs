use serde::Serialize;
use tui_match3_types::{Coord, GRID_SIZE};

use crate::game_state::{Activity, Phase};

/// Plain copy of everything a frontend needs to draw one frame.
///
/// `board` holds color codes (`0` = hole, see `TileColor::code`). `matched`
/// marks cells scored in the current pass that have not been cleared yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GameSnapshot {
    pub board: [[u8; GRID_SIZE]; GRID_SIZE],
    pub matched: [[bool; GRID_SIZE]; GRID_SIZE],
    pub cursor: Coord,
    pub selected: Option<Coord>,
    pub score: u32,
    pub moves: u32,
    pub level: u32,
    pub target: u32,
    /// Percent of target reached, capped at 100
    pub progress: u8,
    pub combo_index: u32,
    pub last_score_delta: u32,
    pub phase: Phase,
    pub activity: Activity,
    pub paused: bool,
    pub processing: bool,
    pub sound: bool,
}

impl GameSnapshot {
    /// True if a select would be accepted (ignoring the move count)
    pub fn playable(&self) -> bool {
        self.phase == Phase::Playing && !self.paused && !self.processing
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; GRID_SIZE]; GRID_SIZE],
            matched: [[false; GRID_SIZE]; GRID_SIZE],
            cursor: Coord::default(),
            selected: None,
            score: 0,
            moves: 0,
            level: 1,
            target: 0,
            progress: 0,
            combo_index: 0,
            last_score_delta: 0,
            phase: Phase::Ready,
            activity: Activity::Idle,
            paused: false,
            processing: false,
            sound: true,
        }
    }
}
