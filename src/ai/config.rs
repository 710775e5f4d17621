use serde::{Deserialize, Serialize};

use crate::game::Side;

/// Which side, if any, the computer plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiMode {
    /// Both sides are human.
    Disabled,
    /// The computer plays Black and therefore moves first.
    Black,
    /// The computer plays White and therefore moves last.
    #[default]
    White,
}

impl AiMode {
    pub fn computer_side(self) -> Option<Side> {
        match self {
            AiMode::Disabled => None,
            AiMode::Black => Some(Side::Black),
            AiMode::White => Some(Side::White),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pruning {
    #[default]
    On,
    Off,
}

/// Resource limit for one search call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Budget {
    /// Search exactly this many plies.
    Depth(u32),
    /// Iteratively deepen for at most this many milliseconds.
    Time(u64),
}

impl Budget {
    pub fn value(self) -> u64 {
        match self {
            Budget::Depth(d) => u64::from(d),
            Budget::Time(ms) => ms,
        }
    }
}

impl Default for Budget {
    fn default() -> Self {
        Budget::Depth(4)
    }
}

/// Immutable search settings, built once at startup and passed by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub ai: AiMode,
    pub pruning: Pruning,
    /// Keep the explored tree of the last search for export.
    pub record_tree: bool,
    pub budget: Budget,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            ai: AiMode::default(),
            pruning: Pruning::default(),
            record_tree: true,
            budget: Budget::default(),
        }
    }
}

impl SearchConfig {
    pub fn depth(depth: u32) -> Self {
        SearchConfig {
            budget: Budget::Depth(depth),
            ..Default::default()
        }
    }

    pub fn timed(millis: u64) -> Self {
        SearchConfig {
            budget: Budget::Time(millis),
            ..Default::default()
        }
    }

    pub fn with_pruning(self, pruning: Pruning) -> Self {
        SearchConfig { pruning, ..self }
    }

    pub fn with_ai(self, ai: AiMode) -> Self {
        SearchConfig { ai, ..self }
    }

    pub fn pruning_enabled(&self) -> bool {
        self.pruning == Pruning::On
    }
}
