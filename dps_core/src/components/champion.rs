//! Identity, placement and trait membership components

use serde::{Deserialize, Serialize};

/// Static identity of a champion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChampionInfo {
    pub api_name: String,
    pub display_name: String,
    pub cost: u32,
    pub star_level: u8,
}

impl ChampionInfo {
    pub fn new(api_name: impl Into<String>, display_name: impl Into<String>, cost: u32, star_level: u8) -> Self {
        ChampionInfo {
            api_name: api_name.into(),
            display_name: display_name.into(),
            cost,
            star_level,
        }
    }

    /// Zero-based index into star-indexed ability variables
    pub fn star_index(&self) -> usize {
        usize::from(self.star_level.max(1)) - 1
    }
}

/// Board position (2-D, stationary)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }

    pub fn distance_squared(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    pub fn distance(&self, other: &Position) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

/// Team membership (0 = player side, 1 = opponent)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Team {
    pub id: u8,
}

impl Team {
    pub fn new(id: u8) -> Self {
        Team { id }
    }
}

/// Ordered trait api names of a champion
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Traits {
    names: Vec<String>,
}

impl Traits {
    pub fn new(names: Vec<String>) -> Self {
        Traits { names }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn has_trait(&self, api_name: &str) -> bool {
        self.names.iter().any(|n| n == api_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_star_index() {
        assert_eq!(ChampionInfo::new("TFT14_Jinx", "Jinx", 5, 1).star_index(), 0);
        assert_eq!(ChampionInfo::new("TFT14_Jinx", "Jinx", 5, 3).star_index(), 2);
        assert_eq!(ChampionInfo::new("TFT14_Jinx", "Jinx", 5, 0).star_index(), 0);
    }
}
