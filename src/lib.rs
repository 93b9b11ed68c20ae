//! Score Keeper - a browser scorekeeping widget
//!
//! Core modules:
//! - `board`: Scoreboard state and mutations
//! - `palette`: Deterministic palette and color assignment
//! - `reconcile`: Merging persisted data into a valid scoreboard
//! - `keeper`: Write-through persistence around the scoreboard
//! - `persistence`: Key-value stores (LocalStorage on web)
//! - `view`: View model for the rendering layer
//! - `platform`: Timers and browser bindings

pub mod board;
pub mod color;
pub mod config;
pub mod keeper;
pub mod palette;
pub mod persistence;
pub mod platform;
pub mod reconcile;
pub mod settings;
pub mod team;
pub mod view;

pub use board::{DropPosition, Scoreboard, Team};
pub use color::{HexColor, normalize_color_key};
pub use config::{BoardConfig, Variant};
pub use keeper::{Entry, ScoreKeeper};
pub use palette::{Palette, pick_unused_color};
pub use persistence::{KeyValueStore, MemoryStore, StorageError};
pub use settings::Preferences;
pub use team::TeamId;
pub use view::BoardView;

/// Widget configuration constants
pub mod consts {
    /// Fewest teams that can be active
    pub const MIN_TEAMS: usize = 2;
    /// Most teams that can be active (one per identifier)
    pub const MAX_TEAMS: usize = crate::team::TEAM_SLOTS;
    /// Team name length limit in characters
    pub const TEAM_NAME_MAX_LENGTH: usize = 30;

    /// Trailing-edge delay before re-fitting names after a resize
    pub const RESIZE_DEBOUNCE_MS: i32 = 150;
    /// How long the "name updated" toast stays visible
    pub const TOAST_HIDE_MS: i32 = 2500;
}
