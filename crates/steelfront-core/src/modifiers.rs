//! Research-driven stat multipliers applied to the player vehicle.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    /// Scales player shell damage.
    pub damage: f64,
    /// Divides damage the player takes.
    pub health: f64,
    /// Scales the player's speed limits.
    pub speed: f64,
    /// Divides the player's reload time.
    pub reload: f64,
}

impl Default for Modifiers {
    fn default() -> Self {
        Self {
            damage: 1.0,
            health: 1.0,
            speed: 1.0,
            reload: 1.0,
        }
    }
}

impl Modifiers {
    /// Fold completed research ids into multipliers. Unknown ids are ignored.
    pub fn from_research<S: AsRef<str>>(ids: &[S]) -> Self {
        let mut m = Self::default();
        for id in ids {
            match id.as_ref() {
                "damage1" => m.damage *= 1.15,
                "armor1" => m.health *= 1.25,
                "speed1" => m.speed *= 1.20,
                "damage2" => m.damage *= 1.30,
                "health2" => m.health *= 1.50,
                _ => {}
            }
        }
        m
    }
}
