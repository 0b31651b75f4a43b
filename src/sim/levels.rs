//! Level definitions and brick wall construction
//!
//! Levels are static configuration: an ordered list of grids where `X` marks a
//! brick. They are built in or loaded once from JSON at startup.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::entities::Brick;
use crate::consts::*;
use crate::error::ConfigError;
use crate::BRICK_COLORS;

/// Marker for a brick cell in a layout row
pub const BRICK_CELL: char = 'X';

/// One level's grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDef {
    pub rows: usize,
    pub cols: usize,
    /// Presence markers, one string per row. Without a layout every cell is a brick.
    #[serde(default)]
    pub layout: Option<Vec<String>>,
}

impl LevelDef {
    /// Whether the cell at (row, col) holds a brick
    ///
    /// Rows shorter than `cols` (or missing rows) simply have no brick there.
    pub fn has_brick(&self, row: usize, col: usize) -> bool {
        match &self.layout {
            None => row < self.rows && col < self.cols,
            Some(layout) => layout
                .get(row)
                .and_then(|line| line.chars().nth(col))
                .is_some_and(|c| c == BRICK_CELL),
        }
    }

    /// Build this level's wall
    pub fn build_wall(&self) -> Vec<Brick> {
        let mut bricks = Vec::new();
        for row in 0..self.rows {
            for col in 0..self.cols {
                if !self.has_brick(row, col) {
                    continue;
                }
                let x = col as f32 * (BRICK_WIDTH + BRICK_PADDING) + BRICK_PADDING;
                let y = row as f32 * (BRICK_HEIGHT + BRICK_PADDING) + WALL_START_Y;
                let color = BRICK_COLORS[row % BRICK_COLORS.len()];
                bricks.push(Brick::new(Rect::new(x, y, BRICK_WIDTH, BRICK_HEIGHT), color));
            }
        }
        bricks
    }

    fn grid(rows: &[&str]) -> Self {
        Self {
            rows: rows.len(),
            cols: rows.iter().map(|r| r.len()).max().unwrap_or(0),
            layout: Some(rows.iter().map(|r| r.to_string()).collect()),
        }
    }
}

/// Ordered list of levels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelSet {
    levels: Vec<LevelDef>,
}

impl Default for LevelSet {
    fn default() -> Self {
        Self {
            levels: vec![
                LevelDef::grid(&[
                    "XXXXXXXXXX",
                    "XXXXXXXXXX",
                    "XXXXXXXXXX",
                    "XXXXXXXXXX",
                ]),
                LevelDef::grid(&[
                    "X.X.X.X.X.",
                    ".X.X.X.X.X",
                    "X.X.X.X.X.",
                    ".X.X.X.X.X",
                    "X.X.X.X.X.",
                ]),
                LevelDef::grid(&[
                    "XXXXXXXXXX",
                    "X........X",
                    "X.X....X.X",
                    "X..X..X..X",
                    "X...XX...X",
                    "XXXXXXXXXX",
                ]),
            ],
        }
    }
}

impl LevelSet {
    /// Build from definitions, rejecting empty or zero-sized levels
    pub fn new(levels: Vec<LevelDef>) -> Result<Self, ConfigError> {
        if levels.is_empty() {
            return Err(ConfigError::NoLevels);
        }
        if let Some(idx) = levels.iter().position(|l| l.rows == 0 || l.cols == 0) {
            return Err(ConfigError::EmptyLevel { level: idx + 1 });
        }
        Ok(Self { levels })
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let levels: Vec<LevelDef> = serde_json::from_str(json)?;
        Self::new(levels)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load from `path`, falling back to the built-in levels on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match Self::from_file(path) {
            Ok(levels) => {
                log::info!("Loaded {} levels from {}", levels.len(), path.display());
                levels
            }
            Err(e) => {
                log::warn!("Using built-in levels: {}", e);
                Self::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Level by 1-based number
    pub fn get(&self, level: u32) -> Option<&LevelDef> {
        (level as usize)
            .checked_sub(1)
            .and_then(|idx| self.levels.get(idx))
    }

    /// Wall for a 1-based level number; past the last level the wall is empty
    pub fn build_wall(&self, level: u32) -> Vec<Brick> {
        self.get(level).map(LevelDef::build_wall).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_levels_populated() {
        let levels = LevelSet::default();
        assert_eq!(levels.len(), 3);
        assert_eq!(levels.build_wall(1).len(), 40);
        assert_eq!(levels.build_wall(2).len(), 25);
        assert_eq!(levels.build_wall(3).len(), 34);
    }

    #[test]
    fn test_out_of_range_is_empty() {
        let levels = LevelSet::default();
        assert!(levels.build_wall(0).is_empty());
        assert!(levels.build_wall(4).is_empty());
    }

    #[test]
    fn test_brick_placement_and_colors() {
        let wall = LevelSet::default().build_wall(1);
        let first = &wall[0];
        assert_eq!(first.rect, Rect::new(BRICK_PADDING, WALL_START_Y, BRICK_WIDTH, BRICK_HEIGHT));
        assert_eq!(first.color, BRICK_COLORS[0]);

        // Second row uses the next color and sits one brick+padding lower
        let second_row = &wall[10];
        assert_eq!(second_row.rect.y, WALL_START_Y + BRICK_HEIGHT + BRICK_PADDING);
        assert_eq!(second_row.color, BRICK_COLORS[1]);
    }

    #[test]
    fn test_short_rows_have_no_bricks() {
        let level = LevelDef {
            rows: 3,
            cols: 4,
            layout: Some(vec!["XXXX".into(), "XX".into()]),
        };
        assert!(level.has_brick(1, 1));
        assert!(!level.has_brick(1, 2));
        assert!(!level.has_brick(2, 0));
        assert_eq!(level.build_wall().len(), 6);
    }

    #[test]
    fn test_layout_wider_than_cols_is_cut() {
        let level = LevelDef {
            rows: 1,
            cols: 2,
            layout: Some(vec!["XXXX".into()]),
        };
        assert_eq!(level.build_wall().len(), 2);
    }

    #[test]
    fn test_missing_layout_is_full_grid() {
        let levels = LevelSet::from_json(r#"[{"rows": 2, "cols": 3}]"#).unwrap();
        assert_eq!(levels.build_wall(1).len(), 6);
    }

    #[test]
    fn test_json_round_trip_of_defaults() {
        let json = serde_json::to_string(&LevelSet::default()).unwrap();
        assert_eq!(LevelSet::from_json(&json).unwrap(), LevelSet::default());
    }

    #[test]
    fn test_rejects_bad_definitions() {
        assert!(matches!(LevelSet::from_json("[]"), Err(ConfigError::NoLevels)));
        assert!(matches!(
            LevelSet::from_json(r#"[{"rows": 1, "cols": 1}, {"rows": 0, "cols": 5}]"#),
            Err(ConfigError::EmptyLevel { level: 2 })
        ));
        assert!(matches!(LevelSet::from_json("{"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let levels = LevelSet::load_or_default(Some(Path::new("/nonexistent/levels.json")));
        assert_eq!(levels, LevelSet::default());
    }
}
