//! Shared serializable types used across the fleet.

use serde::{Deserialize, Serialize};

/// Identifier of a car within the fleet (`0..num_cars`).
pub type CarId = usize;

/// Identifier assigned to each accepted pickup.
pub type RequestId = u64;

/// Floor number. Signed so that basements can be configured.
pub type Floor = i32;

/// Travel direction of a car.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Towards higher floors.
    #[default]
    Up,
    /// Towards lower floors.
    Down,
}

impl Direction {
    /// Direction needed to travel from `from` to `to`, `None` when already there.
    #[must_use]
    pub fn between(from: Floor, to: Floor) -> Option<Self> {
        match to.cmp(&from) {
            std::cmp::Ordering::Greater => Some(Self::Up),
            std::cmp::Ordering::Less => Some(Self::Down),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Signed single-floor step in this direction.
    #[must_use]
    pub const fn step(self) -> Floor {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }
}

/// Inclusive range of serviceable floors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorBounds {
    /// Lowest floor (ground unless basements are configured).
    pub min: Floor,
    /// Highest floor.
    pub max: Floor,
}

impl FloorBounds {
    /// Create bounds covering `min..=max`.
    #[must_use]
    pub const fn new(min: Floor, max: Floor) -> Self {
        Self { min, max }
    }

    /// Whether `floor` lies within the bounds.
    #[must_use]
    pub const fn contains(&self, floor: Floor) -> bool {
        floor >= self.min && floor <= self.max
    }

    /// Number of floors covered, saturating at `u32::MAX`.
    #[must_use]
    pub const fn span(&self) -> u32 {
        self.max.abs_diff(self.min).saturating_add(1)
    }
}

impl Default for FloorBounds {
    fn default() -> Self {
        Self::new(1, 20)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_between() {
        assert_eq!(Direction::between(1, 5), Some(Direction::Up));
        assert_eq!(Direction::between(5, 1), Some(Direction::Down));
        assert_eq!(Direction::between(3, 3), None);
    }

    #[test]
    fn test_bounds_contains() {
        let bounds = FloorBounds::new(-2, 10);
        assert!(bounds.contains(-2));
        assert!(bounds.contains(10));
        assert!(!bounds.contains(11));
        assert!(!bounds.contains(-3));
        assert_eq!(bounds.span(), 13);
    }

    #[test]
    fn test_span_saturates_at_extreme_bounds() {
        assert_eq!(FloorBounds::new(i32::MIN, i32::MAX).span(), u32::MAX);
        assert_eq!(FloorBounds::new(0, 0).span(), 1);
    }
}
