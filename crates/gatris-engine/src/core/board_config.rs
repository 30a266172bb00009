use serde::{Deserialize, Serialize};

use crate::BoardConfigError;

pub const MIN_BOARD_WIDTH: usize = 8;
/// A row must fit in a `u32` bitmask with room for the full-row mask.
pub const MAX_BOARD_WIDTH: usize = 30;
pub const MIN_BOARD_HEIGHT: usize = 8;
pub const MAX_BOARD_HEIGHT: usize = 32;

/// Dimensions of the playing grid.
///
/// Construction is validated, so every `BoardConfig` in circulation (including
/// deserialized ones) describes a grid the engine can simulate.
///
/// # Example
///
/// ```
/// use gatris_engine::BoardConfig;
///
/// let config = BoardConfig::default();
/// assert_eq!((config.width(), config.height()), (10, 20));
/// assert!(BoardConfig::new(4, 20).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBoardConfig")]
pub struct BoardConfig {
    width: usize,
    height: usize,
}

#[derive(Deserialize)]
struct RawBoardConfig {
    width: usize,
    height: usize,
}

impl TryFrom<RawBoardConfig> for BoardConfig {
    type Error = BoardConfigError;

    fn try_from(raw: RawBoardConfig) -> Result<Self, Self::Error> {
        Self::new(raw.width, raw.height)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl BoardConfig {
    /// The classic 10 × 20 field.
    pub const STANDARD: Self = Self {
        width: 10,
        height: 20,
    };

    pub fn new(width: usize, height: usize) -> Result<Self, BoardConfigError> {
        if !(MIN_BOARD_WIDTH..=MAX_BOARD_WIDTH).contains(&width) {
            return Err(BoardConfigError::Width { width });
        }
        if !(MIN_BOARD_HEIGHT..=MAX_BOARD_HEIGHT).contains(&height) {
            return Err(BoardConfigError::Height { height });
        }
        Ok(Self { width, height })
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(BoardConfig::new(MIN_BOARD_WIDTH, MIN_BOARD_HEIGHT).is_ok());
        assert!(BoardConfig::new(MAX_BOARD_WIDTH, MAX_BOARD_HEIGHT).is_ok());
        assert_eq!(
            BoardConfig::new(MAX_BOARD_WIDTH + 1, 20),
            Err(BoardConfigError::Width {
                width: MAX_BOARD_WIDTH + 1
            })
        );
        assert_eq!(
            BoardConfig::new(10, MIN_BOARD_HEIGHT - 1),
            Err(BoardConfigError::Height {
                height: MIN_BOARD_HEIGHT - 1
            })
        );
    }

    #[test]
    fn test_deserialize_is_validated() {
        let config: BoardConfig = serde_json::from_str(r#"{"width":12,"height":24}"#).unwrap();
        assert_eq!((config.width(), config.height()), (12, 24));

        let err = serde_json::from_str::<BoardConfig>(r#"{"width":64,"height":20}"#).unwrap_err();
        assert!(err.to_string().contains("board width 64"));
    }

    #[test]
    fn test_serialize_roundtrip_format() {
        let json = serde_json::to_string(&BoardConfig::default()).unwrap();
        assert_eq!(json, r#"{"width":10,"height":20}"#);
    }
}
