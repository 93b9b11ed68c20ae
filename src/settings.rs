//! User interface preferences
//!
//! Persisted separately from the scoreboard entries.

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, SIDEBAR_OPEN_KEY, StorageResult};

/// Preferences that survive reloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Preferences {
    /// Settings sidebar expanded
    pub sidebar_open: bool,
}

impl Preferences {
    /// Load preferences; anything but a stored `"true"` means closed
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        match store.get(SIDEBAR_OPEN_KEY) {
            Ok(value) => Self {
                sidebar_open: value.as_deref() == Some("true"),
            },
            Err(e) => {
                log::warn!("Could not load preferences: {}", e);
                Self::default()
            }
        }
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> StorageResult<()> {
        let value = if self.sidebar_open { "true" } else { "false" };
        store.set(SIDEBAR_OPEN_KEY, value)
    }

    /// Flip the sidebar state, returning the new value
    pub fn toggle_sidebar(&mut self) -> bool {
        self.sidebar_open = !self.sidebar_open;
        self.sidebar_open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(Preferences::load(&store), Preferences::default());

        let mut prefs = Preferences::default();
        assert!(prefs.toggle_sidebar());
        prefs.save(&mut store).unwrap();
        assert_eq!(store.get(SIDEBAR_OPEN_KEY).unwrap().as_deref(), Some("true"));
        assert!(Preferences::load(&store).sidebar_open);
    }

    #[test]
    fn test_unexpected_value_means_closed() {
        let mut store = MemoryStore::new();
        store.set(SIDEBAR_OPEN_KEY, "yes").unwrap();
        assert!(!Preferences::load(&store).sidebar_open);
    }

    #[test]
    fn test_unavailable_store_uses_default() {
        let mut store = MemoryStore::new();
        store.set_unavailable(true);
        assert_eq!(Preferences::load(&store), Preferences::default());
        assert!(Preferences::default().save(&mut store).is_err());
    }
}
