//! Board configuration
//!
//! The widget ships in two variants that differ only in how many teams can
//! be active at once.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_TEAMS, MIN_TEAMS, TEAM_NAME_MAX_LENGTH};

/// Capacity variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// Up to 4 teams
    Compact,
    /// Up to 12 teams
    #[default]
    Full,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Compact => "Compact",
            Variant::Full => "Full",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "compact" | "4" => Some(Variant::Compact),
            "full" | "12" => Some(Variant::Full),
            _ => None,
        }
    }

    /// Maximum number of active teams
    pub fn capacity(&self) -> usize {
        match self {
            Variant::Compact => 4,
            Variant::Full => MAX_TEAMS,
        }
    }
}

/// Limits applied to the scoreboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Maximum active teams, clamped to `[MIN_TEAMS, MAX_TEAMS]`
    pub max_teams: usize,
    /// Maximum team name length in characters
    pub name_max_len: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::from_variant(Variant::default())
    }
}

impl BoardConfig {
    pub fn from_variant(variant: Variant) -> Self {
        Self {
            max_teams: variant.capacity(),
            name_max_len: TEAM_NAME_MAX_LENGTH,
        }
    }

    /// Parse a JSON config from the host page; missing fields take defaults,
    /// unparseable input yields the default config.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<BoardConfig>(json) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Invalid board config, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Effective capacity
    pub fn capacity(&self) -> usize {
        self.max_teams.clamp(MIN_TEAMS, MAX_TEAMS)
    }

    /// Effective name length limit (at least one character)
    pub fn name_limit(&self) -> usize {
        self.name_max_len.max(1)
    }
}
