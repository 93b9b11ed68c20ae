//! View model handed to the rendering layer
//!
//! The host page draws score panels and the settings sidebar from a
//! [`BoardView`]; it never reads the scoreboard directly.

use serde::Serialize;

use crate::board::Scoreboard;
use crate::color::{DARKEN_AMOUNT, HexColor};
use crate::palette::Palette;
use crate::team::{TEAM_SLOTS, TeamId};

/// One palette entry in a team's color picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Swatch {
    pub color: HexColor,
    /// Held by another active team, so not selectable
    pub taken: bool,
    /// The team's current color
    pub selected: bool,
}

/// One score panel / sidebar row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamView {
    pub id: TeamId,
    pub name: String,
    pub color: HexColor,
    pub color_dark: HexColor,
    pub score: u32,
    pub position: usize,
    pub removable: bool,
    pub swatches: Vec<Swatch>,
}

/// A CSS custom property on the document root
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CssVar {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardView {
    pub teams: Vec<TeamView>,
    pub can_add: bool,
    pub css_vars: Vec<CssVar>,
}

impl BoardView {
    pub fn build(board: &Scoreboard, palette: &Palette) -> Self {
        let removable = board.can_remove();
        let teams = board
            .teams()
            .into_iter()
            .map(|team| {
                let used = board.used_colors(Some(team.id));
                let swatches = palette
                    .colors()
                    .iter()
                    .map(|c| Swatch {
                        color: c.clone(),
                        taken: used.contains(c),
                        selected: *c == team.color,
                    })
                    .collect();
                TeamView {
                    id: team.id,
                    color_dark: team.color.darken(DARKEN_AMOUNT),
                    color: team.color,
                    name: team.name,
                    score: team.score,
                    position: team.position,
                    removable,
                    swatches,
                }
            })
            .collect();

        Self {
            teams,
            can_add: board.can_add(),
            css_vars: css_vars(board),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// `--team-{i}-color` and `--team-{i}-color-dark` for every slot. Slots past
/// the active teams use the default color of the identifier at that index.
pub fn css_vars(board: &Scoreboard) -> Vec<CssVar> {
    let mut vars = Vec::with_capacity(TEAM_SLOTS * 2);
    for (i, slot) in TeamId::ALL.iter().enumerate() {
        let color = match board.order().get(i) {
            Some(&id) => board.color(id),
            None => slot.default_color(),
        };
        vars.push(CssVar {
            name: format!("--team-{}-color", i),
            value: color.to_string(),
        });
        vars.push(CssVar {
            name: format!("--team-{}-color-dark", i),
            value: color.darken(DARKEN_AMOUNT).to_string(),
        });
    }
    vars
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_of_default_board() {
        let board = Scoreboard::default();
        let view = BoardView::build(&board, Palette::stripe());
        assert_eq!(view.teams.len(), 2);
        assert!(view.can_add);
        assert!(!view.teams[0].removable);
        assert_eq!(view.teams[0].color_dark.as_str(), "#1043b3");
        assert_eq!(view.teams[1].position, 1);
    }

    #[test]
    fn test_swatches_flag_taken_and_selected() {
        let board = Scoreboard::default();
        let view = BoardView::build(&board, Palette::stripe());
        let a = &view.teams[0];
        let own = a.swatches.iter().find(|s| s.color.as_str() == "#2563eb").unwrap();
        assert!(own.selected);
        assert!(!own.taken);

        let b = &view.teams[1];
        let a_color = b.swatches.iter().find(|s| s.color.as_str() == "#2563eb").unwrap();
        assert!(a_color.taken);
        assert!(!a_color.selected);
        assert_eq!(b.swatches.iter().filter(|s| s.taken).count(), 1);
    }

    #[test]
    fn test_css_vars_cover_all_slots() {
        let board = Scoreboard::default();
        let vars = css_vars(&board);
        assert_eq!(vars.len(), 24);
        let get = |name: &str| vars.iter().find(|v| v.name == name).unwrap().value.clone();
        assert_eq!(get("--team-0-color"), "#2563eb");
        assert_eq!(get("--team-0-color-dark"), "#1043b3");
        // Unused slot falls back to the default of that index
        assert_eq!(get("--team-11-color"), "#f97316");
    }

    #[test]
    fn test_view_serializes() {
        let board = Scoreboard::default();
        let json = BoardView::build(&board, Palette::stripe()).to_json().unwrap();
        assert!(json.contains(r#""id":"a""#));
        assert!(json.contains(r#""can_add":true"#));
    }
}
