//! Team identifiers and their static defaults
//!
//! A team slot is one letter of the fixed alphabet `a..=l`. Each slot has a
//! default display name and a default color used whenever persisted data is
//! missing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::HexColor;

/// Number of team slots in the alphabet
pub const TEAM_SLOTS: usize = 12;

const LETTERS: [char; TEAM_SLOTS] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l'];

const DEFAULT_COLORS: [&str; TEAM_SLOTS] = [
    "#2563eb", // a
    "#d97706", // b
    "#0d9488", // c
    "#7c3aed", // d
    "#22c55e", // e
    "#06b6d4", // f
    "#f59e0b", // g
    "#ef4444", // h
    "#8b5cf6", // i
    "#ec4899", // j
    "#14b8a6", // k
    "#f97316", // l
];

/// One letter of the team alphabet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TeamId(u8);

impl TeamId {
    /// Every identifier, in alphabet order
    pub const ALL: [TeamId; TEAM_SLOTS] = {
        let mut ids = [TeamId(0); TEAM_SLOTS];
        let mut i = 0;
        while i < TEAM_SLOTS {
            ids[i] = TeamId(i as u8);
            i += 1;
        }
        ids
    };

    pub const A: TeamId = TeamId(0);
    pub const B: TeamId = TeamId(1);

    /// Identifier at a position in the alphabet
    pub fn from_index(index: usize) -> Option<Self> {
        (index < TEAM_SLOTS).then_some(TeamId(index as u8))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn as_char(self) -> char {
        LETTERS[self.index()]
    }

    /// `Team A`, `Team B`, ...
    pub fn default_name(self) -> String {
        format!("Team {}", self.as_char().to_ascii_uppercase())
    }

    pub fn default_color(self) -> HexColor {
        HexColor::from_static(DEFAULT_COLORS[self.index()])
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for TeamId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => LETTERS
                .iter()
                .position(|&l| l == c)
                .map(|i| TeamId(i as u8))
                .ok_or_else(|| format!("unknown team id: {s}")),
            _ => Err(format!("unknown team id: {s}")),
        }
    }
}

impl TryFrom<String> for TeamId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TeamId> for String {
    fn from(id: TeamId) -> Self {
        id.to_string()
    }
}
