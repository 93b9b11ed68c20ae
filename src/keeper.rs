//! Scoreboard with write-through persistence
//!
//! [`ScoreKeeper`] runs the startup load sequence and saves the affected
//! entries after each mutation. Storage is best-effort: a failed write is
//! logged and the in-memory state still reflects the mutation.

use rand::Rng;

use crate::board::{DropPosition, Scoreboard, Team};
use crate::config::BoardConfig;
use crate::palette::Palette;
use crate::persistence::{
    self, KeyValueStore, SCORES_KEY, StorageResult, TEAM_COLORS_KEY, TEAM_NAMES_KEY,
    TEAM_ORDER_KEY,
};
use crate::reconcile;
use crate::settings::Preferences;
use crate::team::TeamId;
use crate::view::BoardView;

/// One persisted piece of scoreboard state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    Order,
    Scores,
    Names,
    Colors,
}

impl Entry {
    pub const ALL: [Entry; 4] = [Entry::Order, Entry::Scores, Entry::Names, Entry::Colors];

    pub fn key(&self) -> &'static str {
        match self {
            Entry::Order => TEAM_ORDER_KEY,
            Entry::Scores => SCORES_KEY,
            Entry::Names => TEAM_NAMES_KEY,
            Entry::Colors => TEAM_COLORS_KEY,
        }
    }
}

/// Scoreboard bound to a store
pub struct ScoreKeeper<S: KeyValueStore> {
    board: Scoreboard,
    preferences: Preferences,
    palette: Palette,
    store: S,
}

impl<S: KeyValueStore> ScoreKeeper<S> {
    /// Load state from `store` using the stripe palette
    pub fn load(store: S, config: BoardConfig) -> Self {
        Self::load_with_palette(store, config, Palette::stripe().clone())
    }

    /// Load state: order first, then defaults for each active team, then
    /// scores, names and colors layered on top.
    pub fn load_with_palette(store: S, config: BoardConfig, palette: Palette) -> Self {
        let mut board = Scoreboard::new(config);

        if let Some(order) = persistence::read_or_absent(&store, TEAM_ORDER_KEY)
            .and_then(|raw| reconcile::parse_team_order(&raw, board.capacity()))
        {
            board.set_order(order);
        }
        for id in board.order().to_vec() {
            board.ensure_team_data(id);
        }

        let raw = persistence::read_or_absent(&store, SCORES_KEY);
        reconcile::merge_scores(&mut board, raw.as_deref());
        let raw = persistence::read_or_absent(&store, TEAM_NAMES_KEY);
        reconcile::merge_names(&mut board, raw.as_deref());
        let raw = persistence::read_or_absent(&store, TEAM_COLORS_KEY);
        reconcile::merge_colors(&mut board, raw.as_deref(), &palette);

        let preferences = Preferences::load(&store);
        log::info!("Loaded scoreboard with {} teams", board.len());

        Self {
            board,
            preferences,
            palette,
            store,
        }
    }

    pub fn board(&self) -> &Scoreboard {
        &self.board
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn preferences(&self) -> Preferences {
        self.preferences
    }

    pub fn teams(&self) -> Vec<Team> {
        self.board.teams()
    }

    pub fn view(&self) -> BoardView {
        BoardView::build(&self.board, &self.palette)
    }

    /// Write one entry to the store
    pub fn save(&mut self, entry: Entry) -> StorageResult<()> {
        let key = entry.key();
        match entry {
            Entry::Order => persistence::save_json(&mut self.store, key, &self.board.order),
            Entry::Scores => persistence::save_json(&mut self.store, key, &self.board.scores),
            Entry::Names => persistence::save_json(&mut self.store, key, &self.board.names),
            Entry::Colors => persistence::save_json(&mut self.store, key, &self.board.colors),
        }
    }

    fn write_through(&mut self, entries: &[Entry]) {
        for &entry in entries {
            if let Err(e) = self.save(entry) {
                log::warn!("Could not save {}: {}", entry.key(), e);
            }
        }
    }

    pub fn increment_score(&mut self, id: TeamId) -> bool {
        let changed = self.board.increment_score(id);
        if changed {
            self.write_through(&[Entry::Scores]);
        }
        changed
    }

    pub fn decrement_score(&mut self, id: TeamId) -> bool {
        let changed = self.board.decrement_score(id);
        if changed {
            self.write_through(&[Entry::Scores]);
        }
        changed
    }

    pub fn add_team(&mut self) -> Option<TeamId> {
        let added = self.board.add_team(&self.palette)?;
        log::info!("Added team {}", added);
        self.write_through(&Entry::ALL);
        Some(added)
    }

    pub fn remove_team(&mut self, id: TeamId) -> bool {
        let removed = self.board.remove_team(id);
        if removed {
            log::info!("Removed team {}", id);
            self.write_through(&[Entry::Order]);
        }
        removed
    }

    pub fn reorder_team(&mut self, id: TeamId, target: TeamId, drop: DropPosition) -> bool {
        let moved = self.board.reorder_team(id, target, drop);
        if moved {
            self.write_through(&[Entry::Order]);
        }
        moved
    }

    /// Returns `true` when the name changed, which is when the host shows
    /// its "name updated" toast
    pub fn rename_team(&mut self, id: TeamId, name: &str) -> bool {
        let changed = self.board.rename_team(id, name);
        if changed {
            self.write_through(&[Entry::Names]);
        }
        changed
    }

    pub fn recolor_team(&mut self, id: TeamId, hex: &str) -> bool {
        let changed = self.board.recolor_team(id, hex);
        if changed {
            self.write_through(&[Entry::Colors]);
        }
        changed
    }

    pub fn reset_to_new_game<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.board.reset_to_new_game(&self.palette, rng);
        log::info!("Started a new game");
        self.write_through(&Entry::ALL);
    }

    pub fn set_sidebar_open(&mut self, open: bool) {
        self.preferences.sidebar_open = open;
        if let Err(e) = self.preferences.save(&mut self.store) {
            log::warn!("Could not save preferences: {}", e);
        }
    }
}
