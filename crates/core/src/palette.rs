//! Palette of colors new tiles are drawn from.

use arrayvec::ArrayVec;
use tui_match3_types::{TileColor, MIN_PALETTE_LEN};

use crate::error::ConfigError;

/// Validated, ordered set of distinct tile colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: ArrayVec<TileColor, 6>,
}

impl Palette {
    /// Build a palette, failing fast on a degenerate color set.
    pub fn new(colors: &[TileColor]) -> Result<Self, ConfigError> {
        let mut out: ArrayVec<TileColor, 6> = ArrayVec::new();
        for &c in colors {
            if out.contains(&c) {
                return Err(ConfigError::DuplicateColor(c));
            }
            out.push(c);
        }
        if out.len() < MIN_PALETTE_LEN {
            return Err(ConfigError::PaletteTooSmall { len: out.len() });
        }
        Ok(Self { colors: out })
    }

    /// All six colors.
    pub fn standard() -> Self {
        Self {
            colors: ArrayVec::from(TileColor::ALL),
        }
    }

    pub fn colors(&self) -> &[TileColor] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn contains(&self, color: TileColor) -> bool {
        self.colors.contains(&color)
    }

    /// Palette colors minus up to two banned ones, on the stack.
    pub(crate) fn allowed(&self, banned: [Option<TileColor>; 2]) -> ArrayVec<TileColor, 6> {
        self.colors
            .iter()
            .copied()
            .filter(|c| !banned.contains(&Some(*c)))
            .collect()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_palette_has_all_colors() {
        let p = Palette::standard();
        assert_eq!(p.len(), 6);
        for c in TileColor::ALL {
            assert!(p.contains(c));
        }
    }

    #[test]
    fn too_small_palette_is_rejected() {
        let err = Palette::new(&[TileColor::Red, TileColor::Blue]).unwrap_err();
        assert_eq!(err, ConfigError::PaletteTooSmall { len: 2 });
        assert_eq!(err.code(), "invalid_palette");
        assert!(Palette::new(&[]).is_err());
    }

    #[test]
    fn duplicate_color_is_rejected() {
        let err = Palette::new(&[TileColor::Red, TileColor::Blue, TileColor::Red]).unwrap_err();
        assert_eq!(err, ConfigError::DuplicateColor(TileColor::Red));
        assert_eq!(err.to_string(), "palette lists red more than once");
    }

    #[test]
    fn three_colors_is_enough() {
        let p = Palette::new(&[TileColor::Red, TileColor::Blue, TileColor::Green]).unwrap();
        assert_eq!(p.colors(), &[TileColor::Red, TileColor::Blue, TileColor::Green]);
    }

    #[test]
    fn allowed_removes_banned_colors() {
        let p = Palette::new(&[TileColor::Red, TileColor::Blue, TileColor::Green]).unwrap();
        let allowed = p.allowed([Some(TileColor::Red), Some(TileColor::Green)]);
        assert_eq!(allowed.as_slice(), &[TileColor::Blue]);
        let allowed = p.allowed([None, None]);
        assert_eq!(allowed.len(), 3);
    }
}
