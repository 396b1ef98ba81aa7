//! Grid construction parameters.

use std::fmt;

use glam::Vec2;

/// Largest accepted cell count. Keeps every path cost and heuristic estimate
/// (at most 14 units per step) well inside `i32`.
pub const MAX_CELLS: u64 = 1 << 26;

/// Parameters fixed at grid construction.
///
/// Only per-cell walkability can change afterwards (via
/// [`NavGrid::set_blockage`](crate::NavGrid::set_blockage)).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Number of cells along X.
    pub width: i32,
    /// Number of cells along Y.
    pub height: i32,
    /// World units per cell edge.
    pub cell_size: f32,
    /// World position of the lower corner of cell (0, 0).
    pub origin: Vec2,
    /// Initial walkability: `true` starts every cell blocked.
    pub blocked: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            cell_size: 1.0,
            origin: Vec2::ZERO,
            blocked: false,
        }
    }
}

impl GridConfig {
    /// Config for an open `width × height` grid with unit cells at the origin.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Set the cell size (builder).
    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Set the world origin (builder).
    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    /// Set the initial blockage of every cell (builder).
    pub fn with_blocked(mut self, blocked: bool) -> Self {
        self.blocked = blocked;
        self
    }

    /// Check that the parameters describe a usable grid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        if self.width as u64 * self.height as u64 > MAX_CELLS {
            return Err(ConfigError::TooLarge {
                width: self.width,
                height: self.height,
            });
        }
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(ConfigError::InvalidCellSize(self.cell_size));
        }
        if !self.origin.is_finite() {
            return Err(ConfigError::InvalidOrigin(self.origin));
        }
        Ok(())
    }

    /// Number of cells described.
    #[inline]
    pub fn len(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Rejected [`GridConfig`] values.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Width or height is zero or negative.
    InvalidSize { width: i32, height: i32 },
    /// More than [`MAX_CELLS`] cells.
    TooLarge { width: i32, height: i32 },
    /// Cell size is zero, negative, or not finite.
    InvalidCellSize(f32),
    /// Origin has a NaN or infinite component.
    InvalidOrigin(Vec2),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { width, height } => {
                write!(f, "grid size must be positive, got {width}x{height}")
            }
            Self::TooLarge { width, height } => {
                write!(f, "grid {width}x{height} exceeds {MAX_CELLS} cells")
            }
            Self::InvalidCellSize(s) => write!(f, "cell size must be positive and finite, got {s}"),
            Self::InvalidOrigin(o) => write!(f, "grid origin must be finite, got {o}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GridConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_size() {
        let err = GridConfig::new(0, 5).validate().unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidSize {
                width: 0,
                height: 5
            }
        );
        assert!(GridConfig::new(5, -1).validate().is_err());
    }

    #[test]
    fn rejects_oversized_grid() {
        assert_eq!(
            GridConfig::new(10_000, 10_000).validate(),
            Err(ConfigError::TooLarge {
                width: 10_000,
                height: 10_000
            })
        );
        assert!(GridConfig::new(i32::MAX, i32::MAX).validate().is_err());
        assert_eq!(GridConfig::new(8192, 8192).validate(), Ok(()));
        assert_eq!(GridConfig::new(1, 1 << 26).validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_cell_size() {
        for s in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let cfg = GridConfig::new(3, 3).with_cell_size(s);
            assert!(matches!(cfg.validate(), Err(ConfigError::InvalidCellSize(_))));
        }
    }

    #[test]
    fn rejects_non_finite_origin() {
        let cfg = GridConfig::new(3, 3).with_origin(Vec2::new(f32::NAN, 0.0));
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidOrigin(_))));
    }

    #[test]
    fn error_messages() {
        let err = ConfigError::InvalidSize {
            width: 0,
            height: 2,
        };
        assert_eq!(err.to_string(), "grid size must be positive, got 0x2");
    }
}
