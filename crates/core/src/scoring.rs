//! Scoring module - cascade points and per-level targets
//!
//! Every pass of a resolution cycle pays `cells * POINTS_PER_TILE`, multiplied
//! by `combo_index + 1`. The first pass after a swap has combo index 0, so a
//! plain match of three is worth 60 and the same three cells on the next
//! cascade are worth 120.
//!
//! Levels get a larger target and a couple more moves each.

use tui_match3_types::{INITIAL_MOVES, MOVES_PER_LEVEL, POINTS_PER_TILE, TARGET_SCORE_PER_LEVEL};

/// Points for one resolution pass
/// cells: number of matched cells cleared in this pass
/// combo_index: 0 for the pass triggered by the swap, +1 per cascade
pub fn cascade_points(cells: usize, combo_index: u32) -> u32 {
    (cells as u32)
        .saturating_mul(POINTS_PER_TILE)
        .saturating_mul(combo_index.saturating_add(1))
}

/// Score needed to complete `level` (1-based)
pub fn target_score(level: u32) -> u32 {
    level.saturating_mul(TARGET_SCORE_PER_LEVEL)
}

/// Move budget for `level` (1-based)
pub fn moves_for_level(level: u32) -> u32 {
    INITIAL_MOVES.saturating_add(level.saturating_sub(1).saturating_mul(MOVES_PER_LEVEL))
}

/// Progress toward the target, 0..=100
pub fn progress_percent(score: u32, target: u32) -> u8 {
    if target == 0 {
        return 100;
    }
    let pct = (score as u64 * 100) / target as u64;
    pct.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cascade_points() {
        assert_eq!(cascade_points(3, 0), 60);
        assert_eq!(cascade_points(3, 1), 120);
        assert_eq!(cascade_points(5, 2), 300);
        assert_eq!(cascade_points(0, 4), 0);
    }

    #[test]
    fn test_level_targets() {
        assert_eq!(target_score(1), 1500);
        assert_eq!(target_score(2), 3000);
        assert_eq!(target_score(7), 10500);
    }

    #[test]
    fn test_moves_for_level() {
        assert_eq!(moves_for_level(1), 20);
        assert_eq!(moves_for_level(2), 22);
        assert_eq!(moves_for_level(5), 28);
        // Level 0 is invalid, but must not underflow.
        assert_eq!(moves_for_level(0), 20);
    }

    #[test]
    fn test_progress_is_clamped() {
        assert_eq!(progress_percent(0, 1500), 0);
        assert_eq!(progress_percent(750, 1500), 50);
        assert_eq!(progress_percent(1499, 1500), 99);
        assert_eq!(progress_percent(4000, 1500), 100);
        assert_eq!(progress_percent(10, 0), 100);
    }
}
