//! Configuration errors.
//!
//! Invalid player input is never an error (it becomes a no-op or a selection
//! change); only a broken setup is rejected, and it is rejected up front.

use thiserror::Error;
use tui_match3_types::{TileColor, MIN_PALETTE_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Run-free generation needs at least three colors to always have a choice.
    #[error("palette has {len} colors, need at least {}", MIN_PALETTE_LEN)]
    PaletteTooSmall { len: usize },

    #[error("palette lists {} more than once", .0.as_str())]
    DuplicateColor(TileColor),

    #[error("level must be at least 1 (got {0})")]
    InvalidLevel(u32),
}

impl ConfigError {
    /// Stable machine-readable code.
    pub fn code(self) -> &'static str {
        match self {
            ConfigError::PaletteTooSmall { .. } | ConfigError::DuplicateColor(_) => {
                "invalid_palette"
            }
            ConfigError::InvalidLevel(_) => "invalid_level",
        }
    }
}
