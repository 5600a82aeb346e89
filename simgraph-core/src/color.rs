use serde::{Deserialize, Serialize};

/// Display colors for genre membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub rock: String,
    pub metal: String,
    pub both: String,
    pub default: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            rock: "blue".to_string(),
            metal: "red".to_string(),
            both: "purple".to_string(),
            default: "grey".to_string(),
        }
    }
}

impl Palette {
    pub fn classify(&self, is_rock: bool, is_metal: bool) -> &str {
        match (is_rock, is_metal) {
            (true, true) => &self.both,
            (true, false) => &self.rock,
            (false, true) => &self.metal,
            (false, false) => &self.default,
        }
    }
}
