//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. Rather than a
//! widget toolkit it renders into a simple framebuffer that is diffed and
//! flushed to the terminal.
//!
//! Goals:
//! - Render only from `core::GameSnapshot`, never from live engine state
//! - Keep the view pure so layout and overlays can be unit-tested
//! - Control the aspect ratio of tiles (4 columns by 2 rows per cell)

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_match3_core as core;
pub use tui_match3_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
