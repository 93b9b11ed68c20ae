//! Scoreboard model
//!
//! An explicit state object: team order plus per-team scores, names and
//! colors. Mutations validate their preconditions and refuse (returning
//! `false` or `None`) instead of erroring, leaving state unchanged.
//!
//! Data for teams removed from the order is kept, so re-adding a slot in the
//! same session brings back its score and name.

use std::collections::{BTreeMap, HashSet};

use rand::Rng;
use serde::Serialize;

use crate::color::HexColor;
use crate::config::BoardConfig;
use crate::consts::MIN_TEAMS;
use crate::palette::Palette;
use crate::team::TeamId;

/// Where a dragged team lands relative to the drop target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DropPosition {
    Before,
    After,
}

impl DropPosition {
    /// `Before` when the pointer is above the vertical midpoint of the target row
    pub fn from_pointer(pointer_y: f64, rect_top: f64, rect_height: f64) -> Self {
        if pointer_y < rect_top + rect_height / 2.0 {
            DropPosition::Before
        } else {
            DropPosition::After
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "before" => Some(DropPosition::Before),
            "after" => Some(DropPosition::After),
            _ => None,
        }
    }
}

/// Snapshot of one active team
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub color: HexColor,
    pub score: u32,
    /// Index in the team order
    pub position: usize,
}

/// In-memory scoreboard state
#[derive(Debug, Clone, PartialEq)]
pub struct Scoreboard {
    pub(crate) config: BoardConfig,
    pub(crate) order: Vec<TeamId>,
    pub(crate) scores: BTreeMap<TeamId, u32>,
    pub(crate) names: BTreeMap<TeamId, String>,
    pub(crate) colors: BTreeMap<TeamId, HexColor>,
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}

impl Scoreboard {
    /// Two-team default board
    pub fn new(config: BoardConfig) -> Self {
        let mut board = Self {
            config,
            order: Self::default_order(),
            scores: BTreeMap::new(),
            names: BTreeMap::new(),
            colors: BTreeMap::new(),
        };
        for id in Self::default_order() {
            board.ensure_team_data(id);
        }
        board
    }

    /// `[a, b]`
    pub fn default_order() -> Vec<TeamId> {
        vec![TeamId::A, TeamId::B]
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn capacity(&self) -> usize {
        self.config.capacity()
    }

    pub fn order(&self) -> &[TeamId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn is_active(&self, id: TeamId) -> bool {
        self.order.contains(&id)
    }

    pub fn position(&self, id: TeamId) -> Option<usize> {
        self.order.iter().position(|&t| t == id)
    }

    pub fn can_add(&self) -> bool {
        self.order.len() < self.capacity()
    }

    pub fn can_remove(&self) -> bool {
        self.order.len() > MIN_TEAMS
    }

    pub fn score(&self, id: TeamId) -> u32 {
        self.scores.get(&id).copied().unwrap_or(0)
    }

    pub fn name(&self, id: TeamId) -> String {
        self.names
            .get(&id)
            .cloned()
            .unwrap_or_else(|| id.default_name())
    }

    pub fn color(&self, id: TeamId) -> HexColor {
        self.colors
            .get(&id)
            .cloned()
            .unwrap_or_else(|| id.default_color())
    }

    pub fn team(&self, id: TeamId) -> Option<Team> {
        let position = self.position(id)?;
        Some(Team {
            id,
            name: self.name(id),
            color: self.color(id),
            score: self.score(id),
            position,
        })
    }

    /// Active teams in order
    pub fn teams(&self) -> Vec<Team> {
        self.order.iter().filter_map(|&id| self.team(id)).collect()
    }

    pub(crate) fn set_order(&mut self, order: Vec<TeamId>) {
        self.order = order;
    }

    /// Back-fill any missing score, name or color with the slot defaults
    pub fn ensure_team_data(&mut self, id: TeamId) {
        self.scores.entry(id).or_insert(0);
        self.names.entry(id).or_insert_with(|| id.default_name());
        self.colors.entry(id).or_insert_with(|| id.default_color());
    }

    /// Colors held by active teams other than `exclude`
    pub fn used_colors(&self, exclude: Option<TeamId>) -> HashSet<HexColor> {
        self.order
            .iter()
            .filter(|&&id| Some(id) != exclude)
            .map(|&id| self.color(id))
            .collect()
    }

    /// A color for `id` not held by any other active team, if one exists
    pub fn pick_unused_color_for(&self, id: TeamId, palette: &Palette) -> HexColor {
        palette.pick_unused(&id.default_color(), &self.used_colors(Some(id)))
    }

    pub fn increment_score(&mut self, id: TeamId) -> bool {
        if !self.is_active(id) {
            return false;
        }
        let score = self.scores.entry(id).or_insert(0);
        *score = score.saturating_add(1);
        true
    }

    /// Decrease a score, never below zero. Returns `false` when already at zero.
    pub fn decrement_score(&mut self, id: TeamId) -> bool {
        if !self.is_active(id) {
            return false;
        }
        match self.scores.get_mut(&id) {
            Some(score) if *score > 0 => {
                *score -= 1;
                true
            }
            _ => false,
        }
    }

    /// Activate the lowest unused slot with a fresh color.
    /// Returns `None` at capacity.
    pub fn add_team(&mut self, palette: &Palette) -> Option<TeamId> {
        if !self.can_add() {
            return None;
        }
        let next = TeamId::ALL.into_iter().find(|id| !self.is_active(*id))?;
        self.order.push(next);
        self.ensure_team_data(next);
        let color = self.pick_unused_color_for(next, palette);
        self.colors.insert(next, color);
        Some(next)
    }

    /// Deactivate a team. Refused at the minimum team count.
    pub fn remove_team(&mut self, id: TeamId) -> bool {
        if !self.can_remove() || !self.is_active(id) {
            return false;
        }
        self.order.retain(|&t| t != id);
        true
    }

    /// Move `id` next to `target`
    pub fn reorder_team(&mut self, id: TeamId, target: TeamId, drop: DropPosition) -> bool {
        if id == target || !self.is_active(id) || !self.is_active(target) {
            return false;
        }
        self.order.retain(|&t| t != id);
        let Some(mut index) = self.position(target) else {
            return false;
        };
        if drop == DropPosition::After {
            index += 1;
        }
        self.order.insert(index, id);
        true
    }

    /// Trim and cap a new name; blank names revert to the slot default.
    /// Returns `true` if the stored name changed.
    pub fn rename_team(&mut self, id: TeamId, name: &str) -> bool {
        if !self.is_active(id) {
            return false;
        }
        let trimmed: String = name.trim().chars().take(self.config.name_limit()).collect();
        let new_name = if trimmed.is_empty() {
            id.default_name()
        } else {
            trimmed
        };
        if self.names.get(&id) == Some(&new_name) {
            return false;
        }
        self.names.insert(id, new_name);
        true
    }

    /// Change a team's color. Refused for invalid hex or a color already used
    /// by another active team.
    pub fn recolor_team(&mut self, id: TeamId, hex: &str) -> bool {
        if !self.is_active(id) {
            return false;
        }
        let Some(color) = HexColor::parse(hex) else {
            return false;
        };
        if self.used_colors(Some(id)).contains(&color) {
            return false;
        }
        self.colors.insert(id, color);
        true
    }

    /// Back to two fresh teams with well separated colors
    pub fn reset_to_new_game<R: Rng + ?Sized>(&mut self, palette: &Palette, rng: &mut R) {
        let order = Self::default_order();
        self.scores = order.iter().map(|&id| (id, 0)).collect();
        self.names = order.iter().map(|&id| (id, id.default_name())).collect();
        self.colors = match palette.distinct_pair(rng) {
            Some((first, second)) => BTreeMap::from([(TeamId::A, first), (TeamId::B, second)]),
            None => order.iter().map(|&id| (id, id.default_color())).collect(),
        };
        self.order = order;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn id(s: &str) -> TeamId {
        s.parse().unwrap()
    }

    fn board_with(ids: &[&str]) -> Scoreboard {
        let mut board = Scoreboard::default();
        board.set_order(ids.iter().map(|s| id(s)).collect());
        for &t in board.order.clone().iter() {
            board.ensure_team_data(t);
        }
        board
    }

    fn order_str(board: &Scoreboard) -> String {
        board.order().iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_default_board() {
        let board = Scoreboard::default();
        assert_eq!(order_str(&board), "ab");
        assert_eq!(board.score(TeamId::A), 0);
        assert_eq!(board.name(TeamId::B), "Team B");
        assert_eq!(board.color(TeamId::A).as_str(), "#2563eb");
    }

    #[test]
    fn test_increment_then_decrement_restores() {
        let mut board = Scoreboard::default();
        board.scores.insert(TeamId::A, 5);
        assert!(board.increment_score(TeamId::A));
        assert_eq!(board.score(TeamId::A), 6);
        assert!(board.decrement_score(TeamId::A));
        assert_eq!(board.score(TeamId::A), 5);
    }

    #[test]
    fn test_decrement_floors_at_zero() {
        let mut board = Scoreboard::default();
        assert!(!board.decrement_score(TeamId::B));
        assert_eq!(board.score(TeamId::B), 0);
    }

    #[test]
    fn test_score_ops_ignore_inactive_teams() {
        let mut board = Scoreboard::default();
        assert!(!board.increment_score(id("c")));
        assert_eq!(board.score(id("c")), 0);
    }

    #[test]
    fn test_add_then_remove_restores_order() {
        let mut board = board_with(&["a", "c", "b"]);
        let before = board.order().to_vec();
        let added = board.add_team(Palette::stripe()).unwrap();
        assert_eq!(added, id("d"));
        assert_eq!(order_str(&board), "acbd");
        assert!(board.remove_team(added));
        assert_eq!(board.order(), before.as_slice());
    }

    #[test]
    fn test_add_picks_unused_color() {
        let mut board = Scoreboard::default();
        // Steal c's default color
        board.colors.insert(TeamId::B, id("c").default_color());
        let added = board.add_team(Palette::stripe()).unwrap();
        assert_eq!(added, id("c"));
        assert_ne!(board.color(added), board.color(TeamId::B));
        // First free stripe entry
        assert_eq!(board.color(added).as_str(), "#e11d48");
    }

    #[test]
    fn test_add_refused_at_capacity() {
        let mut board = Scoreboard::new(BoardConfig::from_variant(crate::config::Variant::Compact));
        let palette = Palette::stripe();
        assert!(board.add_team(palette).is_some());
        assert!(board.add_team(palette).is_some());
        assert_eq!(board.len(), 4);
        assert!(board.add_team(palette).is_none());
        assert_eq!(board.len(), 4);
    }

    #[test]
    fn test_add_fills_all_slots_with_distinct_colors() {
        let mut board = Scoreboard::default();
        while board.add_team(Palette::stripe()).is_some() {}
        assert_eq!(board.len(), 12);
        assert_eq!(board.used_colors(None).len(), 12);
    }

    #[test]
    fn test_remove_refused_at_minimum() {
        let mut board = Scoreboard::default();
        assert!(!board.remove_team(TeamId::A));
        assert_eq!(order_str(&board), "ab");
    }

    #[test]
    fn test_remove_keeps_team_data() {
        let mut board = board_with(&["a", "b", "c"]);
        board.scores.insert(id("c"), 9);
        assert!(board.remove_team(id("c")));
        assert!(!board.is_active(id("c")));
        assert_eq!(board.score(id("c")), 9);
        assert_eq!(board.add_team(Palette::stripe()), Some(id("c")));
        assert_eq!(board.score(id("c")), 9);
    }

    #[test]
    fn test_reorder_after() {
        let mut board = board_with(&["a", "b", "c", "d"]);
        assert!(board.reorder_team(id("a"), id("c"), DropPosition::After));
        assert_eq!(order_str(&board), "bcad");
    }

    #[test]
    fn test_reorder_before() {
        let mut board = board_with(&["a", "b", "c", "d"]);
        assert!(board.reorder_team(id("d"), id("b"), DropPosition::Before));
        assert_eq!(order_str(&board), "adbc");
    }

    #[test]
    fn test_reorder_noops() {
        let mut board = board_with(&["a", "b", "c"]);
        assert!(!board.reorder_team(id("a"), id("a"), DropPosition::After));
        assert!(!board.reorder_team(id("a"), id("k"), DropPosition::After));
        assert_eq!(order_str(&board), "abc");
    }

    #[test]
    fn test_drop_position_from_pointer() {
        assert_eq!(DropPosition::from_pointer(10.0, 0.0, 40.0), DropPosition::Before);
        assert_eq!(DropPosition::from_pointer(20.0, 0.0, 40.0), DropPosition::After);
        assert_eq!(DropPosition::from_str("AFTER"), Some(DropPosition::After));
    }

    #[test]
    fn test_rename_trims_and_caps() {
        let mut board = Scoreboard::default();
        assert!(board.rename_team(TeamId::A, "  Reds  "));
        assert_eq!(board.name(TeamId::A), "Reds");
        let long = "x".repeat(50);
        assert!(board.rename_team(TeamId::A, &long));
        assert_eq!(board.name(TeamId::A).chars().count(), 30);
        assert!(!board.rename_team(TeamId::A, &long));
    }

    #[test]
    fn test_rename_blank_reverts_to_default() {
        let mut board = Scoreboard::default();
        board.rename_team(TeamId::B, "Blues");
        assert!(board.rename_team(TeamId::B, "   "));
        assert_eq!(board.name(TeamId::B), "Team B");
        assert!(!board.rename_team(TeamId::B, ""));
    }

    #[test]
    fn test_recolor_rejects_used_color() {
        let mut board = Scoreboard::default();
        assert!(!board.recolor_team(TeamId::B, "#2563EB"));
        assert_eq!(board.color(TeamId::B).as_str(), "#d97706");
        assert!(!board.recolor_team(TeamId::B, "not a color"));
        assert!(board.recolor_team(TeamId::B, "#0F766E"));
        assert_eq!(board.color(TeamId::B).as_str(), "#0f766e");
        // Re-selecting its own color is allowed
        assert!(board.recolor_team(TeamId::B, "#0f766e"));
    }

    #[test]
    fn test_recolor_can_reuse_inactive_team_color() {
        let mut board = board_with(&["a", "b", "c"]);
        let c_color = board.color(id("c"));
        board.remove_team(id("c"));
        assert!(board.recolor_team(TeamId::A, c_color.as_str()));
    }

    #[test]
    fn test_reset_to_new_game() {
        let palette = Palette::stripe();
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..100 {
            let mut board = board_with(&["c", "a", "b", "e"]);
            board.scores.insert(TeamId::A, 12);
            board.rename_team(TeamId::A, "Champs");
            board.reset_to_new_game(palette, &mut rng);

            assert_eq!(order_str(&board), "ab");
            assert_eq!(board.score(TeamId::A), 0);
            assert_eq!(board.score(TeamId::B), 0);
            assert_eq!(board.name(TeamId::A), "Team A");
            let pos = |c: HexColor| palette.colors().iter().position(|p| *p == c).unwrap();
            let (ia, ib) = (pos(board.color(TeamId::A)), pos(board.color(TeamId::B)));
            assert!(ia.abs_diff(ib) >= 2);
        }
    }

    #[test]
    fn test_reset_with_tiny_palette_uses_neighbors() {
        let palette = Palette::new(vec![
            HexColor::parse("#111111").unwrap(),
            HexColor::parse("#222222").unwrap(),
        ]);
        let mut board = Scoreboard::default();
        board.reset_to_new_game(&palette, &mut Pcg32::seed_from_u64(3));
        assert_ne!(board.color(TeamId::A), board.color(TeamId::B));
    }
}
