//! Merging persisted blobs into a valid scoreboard
//!
//! Every entry may be absent, truncated, hand-edited or written by an older
//! version. Anything that does not have the expected shape is treated exactly
//! like a missing entry; nothing here can fail.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::board::Scoreboard;
use crate::color::HexColor;
use crate::consts::MIN_TEAMS;
use crate::palette::Palette;
use crate::team::TeamId;

fn parse_json(raw: &str, what: &str) -> Option<Value> {
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring malformed {}: {}", what, e);
            None
        }
    }
}

fn parse_object(raw: Option<&str>, what: &str) -> Option<Map<String, Value>> {
    match parse_json(raw?, what)? {
        Value::Object(map) => Some(map),
        _ => {
            log::warn!("Ignoring {}: not an object", what);
            None
        }
    }
}

/// Parse a stored team order.
///
/// Only arrays with a length in `[MIN_TEAMS, capacity]` are considered;
/// anything else returns `None` so the caller keeps its current order.
/// Unknown or repeated identifiers are dropped, and if fewer than
/// `MIN_TEAMS` survive the default order is returned.
pub fn parse_team_order(raw: &str, capacity: usize) -> Option<Vec<TeamId>> {
    let Value::Array(items) = parse_json(raw, "team order")? else {
        log::warn!("Ignoring team order: not an array");
        return None;
    };
    if items.len() < MIN_TEAMS || items.len() > capacity {
        log::warn!("Ignoring team order with {} entries", items.len());
        return None;
    }
    let mut order: Vec<TeamId> = Vec::with_capacity(items.len());
    for item in &items {
        if let Some(id) = item.as_str().and_then(|s| s.parse::<TeamId>().ok()) {
            if !order.contains(&id) {
                order.push(id);
            }
        }
    }
    if order.len() < MIN_TEAMS {
        return Some(Scoreboard::default_order());
    }
    Some(order)
}

/// Apply stored scores to the active teams. Only non-negative integers that
/// fit a `u32` are accepted. Returns how many entries were applied.
pub fn merge_scores(board: &mut Scoreboard, raw: Option<&str>) -> usize {
    let Some(stored) = parse_object(raw, "scores") else {
        return 0;
    };
    let mut applied = 0;
    for id in board.order.clone() {
        let score = stored
            .get(&id.to_string())
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok());
        if let Some(score) = score {
            board.scores.insert(id, score);
            applied += 1;
        }
    }
    applied
}

/// Apply stored names to the active teams, truncated to the configured limit.
/// Returns how many entries were applied.
pub fn merge_names(board: &mut Scoreboard, raw: Option<&str>) -> usize {
    let Some(stored) = parse_object(raw, "team names") else {
        return 0;
    };
    let limit = board.config.name_limit();
    let mut applied = 0;
    for id in board.order.clone() {
        if let Some(name) = stored.get(&id.to_string()).and_then(Value::as_str) {
            board.names.insert(id, name.chars().take(limit).collect());
            applied += 1;
        }
    }
    applied
}

/// Apply stored colors for every slot (active or not), then make the active
/// colors unique. Returns how many entries were applied.
pub fn merge_colors(board: &mut Scoreboard, raw: Option<&str>, palette: &Palette) -> usize {
    let mut applied = 0;
    if let Some(stored) = parse_object(raw, "team colors") {
        for id in TeamId::ALL {
            let Some(hex) = stored.get(&id.to_string()).and_then(Value::as_str) else {
                continue;
            };
            match HexColor::parse(hex) {
                Some(color) => {
                    board.colors.insert(id, color);
                    applied += 1;
                }
                // Invalid hex counts as missing; the dedupe pass picks a color
                None => {
                    board.colors.remove(&id);
                }
            }
        }
    }
    dedupe_colors(board, palette);
    applied
}

/// Walk the order and give every team whose color is missing or already
/// claimed by an earlier team a fresh unused color.
/// Returns the teams that were recolored.
pub fn dedupe_colors(board: &mut Scoreboard, palette: &Palette) -> Vec<TeamId> {
    let mut claimed: HashSet<HexColor> = HashSet::new();
    let mut recolored = Vec::new();
    for id in board.order.clone() {
        let color = match board.colors.get(&id) {
            Some(color) if !claimed.contains(color) => color.clone(),
            _ => {
                let color = board.pick_unused_color_for(id, palette);
                board.colors.insert(id, color.clone());
                recolored.push(id);
                color
            }
        };
        claimed.insert(color);
    }
    if !recolored.is_empty() {
        log::info!("Reassigned colors for {} team(s)", recolored.len());
    }
    recolored
}
