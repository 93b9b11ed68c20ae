//! JavaScript bindings for the host page
//!
//! The page owns the DOM. It calls into [`WebScoreKeeper`] on every user
//! gesture and re-renders from the JSON view model it returns.

use std::cell::RefCell;
use std::rc::Rc;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::board::DropPosition;
use crate::config::BoardConfig;
use crate::consts::{RESIZE_DEBOUNCE_MS, TOAST_HIDE_MS};
use crate::keeper::ScoreKeeper;
use crate::persistence::LocalStore;
use crate::team::TeamId;

use super::timer::Debouncer;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&JsValue::from_str("logger already initialized"));
    }
    log::info!("Score keeper starting...");
}

fn parse_id(id: &str) -> Option<TeamId> {
    match id.parse() {
        Ok(id) => Some(id),
        Err(e) => {
            log::warn!("{}", e);
            None
        }
    }
}

/// Scoreboard handle exported to JavaScript
#[wasm_bindgen]
pub struct WebScoreKeeper {
    keeper: ScoreKeeper<LocalStore>,
    rng: Pcg32,
    resize: Rc<RefCell<Debouncer<i32>>>,
    toast: Rc<RefCell<Debouncer<i32>>>,
}

#[wasm_bindgen]
impl WebScoreKeeper {
    /// Load from localStorage. `config` is optional JSON, e.g. `{"max_teams":4}`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>) -> WebScoreKeeper {
        let config = config
            .as_deref()
            .map(BoardConfig::from_json)
            .unwrap_or_default();
        let seed = js_sys::Date::now() as u64;
        WebScoreKeeper {
            keeper: ScoreKeeper::load(LocalStore::open(), config),
            rng: Pcg32::seed_from_u64(seed),
            resize: Rc::new(RefCell::new(Debouncer::new(RESIZE_DEBOUNCE_MS))),
            toast: Rc::new(RefCell::new(Debouncer::new(TOAST_HIDE_MS))),
        }
    }

    /// Current view model as JSON
    pub fn view(&self) -> Result<String, JsValue> {
        self.keeper
            .view()
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = incrementScore)]
    pub fn increment_score(&mut self, id: &str) -> bool {
        parse_id(id).is_some_and(|id| self.keeper.increment_score(id))
    }

    #[wasm_bindgen(js_name = decrementScore)]
    pub fn decrement_score(&mut self, id: &str) -> bool {
        parse_id(id).is_some_and(|id| self.keeper.decrement_score(id))
    }

    /// Returns the new team id, or `undefined` at capacity
    #[wasm_bindgen(js_name = addTeam)]
    pub fn add_team(&mut self) -> Option<String> {
        self.keeper.add_team().map(|id| id.to_string())
    }

    #[wasm_bindgen(js_name = removeTeam)]
    pub fn remove_team(&mut self, id: &str) -> bool {
        parse_id(id).is_some_and(|id| self.keeper.remove_team(id))
    }

    /// `position` is `"before"` or `"after"`
    #[wasm_bindgen(js_name = reorderTeam)]
    pub fn reorder_team(&mut self, id: &str, target: &str, position: &str) -> bool {
        let (Some(id), Some(target)) = (parse_id(id), parse_id(target)) else {
            return false;
        };
        let Some(drop) = DropPosition::from_str(position) else {
            log::warn!("Unknown drop position: {}", position);
            return false;
        };
        self.keeper.reorder_team(id, target, drop)
    }

    /// Drop position from pointer geometry, as `"before"` or `"after"`
    #[wasm_bindgen(js_name = dropPosition)]
    pub fn drop_position(pointer_y: f64, rect_top: f64, rect_height: f64) -> String {
        match DropPosition::from_pointer(pointer_y, rect_top, rect_height) {
            DropPosition::Before => "before".to_string(),
            DropPosition::After => "after".to_string(),
        }
    }

    #[wasm_bindgen(js_name = renameTeam)]
    pub fn rename_team(&mut self, id: &str, name: &str) -> bool {
        parse_id(id).is_some_and(|id| self.keeper.rename_team(id, name))
    }

    #[wasm_bindgen(js_name = recolorTeam)]
    pub fn recolor_team(&mut self, id: &str, hex: &str) -> bool {
        parse_id(id).is_some_and(|id| self.keeper.recolor_team(id, hex))
    }

    #[wasm_bindgen(js_name = resetToNewGame)]
    pub fn reset_to_new_game(&mut self) {
        self.keeper.reset_to_new_game(&mut self.rng);
    }

    #[wasm_bindgen(js_name = sidebarOpen)]
    pub fn sidebar_open(&self) -> bool {
        self.keeper.preferences().sidebar_open
    }

    #[wasm_bindgen(js_name = setSidebarOpen)]
    pub fn set_sidebar_open(&mut self, open: bool) {
        self.keeper.set_sidebar_open(open);
    }

    /// Run `callback` once resizing has been quiet for the debounce delay
    #[wasm_bindgen(js_name = scheduleResize)]
    pub fn schedule_resize(&self, callback: js_sys::Function) -> Result<(), JsValue> {
        schedule(&self.resize, callback)
    }

    /// Run `hide` after the toast delay, replacing any pending hide
    #[wasm_bindgen(js_name = showToast)]
    pub fn show_toast(&self, hide: js_sys::Function) -> Result<(), JsValue> {
        schedule(&self.toast, hide)
    }
}

fn schedule(debouncer: &Rc<RefCell<Debouncer<i32>>>, callback: js_sys::Function) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let generation = debouncer.borrow_mut().next_generation();
    let delay = debouncer.borrow().delay_ms();

    let state = debouncer.clone();
    let closure = Closure::once_into_js(move || {
        if state.borrow_mut().fire(generation) {
            if let Err(e) = callback.call0(&JsValue::NULL) {
                log::warn!("Debounced callback failed: {:?}", e);
            }
        }
    });
    let handle = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(closure.unchecked_ref(), delay)?;

    if let Some(previous) = debouncer.borrow_mut().arm(generation, handle) {
        window.clear_timeout_with_handle(previous);
    }
    Ok(())
}
