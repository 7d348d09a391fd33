//! Best score tracking
//!
//! Persisted across games, only ever increases.

use crate::persistence::{KeyValueStore, StorageError};

/// Highest score achieved on this device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BestScore {
    value: u64,
}

impl BestScore {
    /// Storage key
    const STORAGE_KEY: &'static str = "grid_snake_best_score";

    pub fn new(value: u64) -> Self {
        Self { value }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    /// Record a score. Returns true if it raised the best.
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.value {
            self.value = score;
            true
        } else {
            false
        }
    }

    /// Load the best score (0 if missing or unreadable)
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(text)) => match text.trim().parse::<u64>() {
                Ok(value) => {
                    log::info!("Loaded best score {}", value);
                    return Self::new(value);
                }
                Err(_) => log::info!("Ignoring corrupt best score {:?}", text),
            },
            Ok(None) => {}
            Err(e) => log::info!("Best score unavailable: {}", e),
        }

        log::info!("No best score found, starting fresh");
        Self::default()
    }

    /// Save the best score
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        store.set(Self::STORAGE_KEY, &self.value.to_string())?;
        log::info!("Best score saved ({})", self.value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_record_is_monotonic() {
        let mut best = BestScore::default();
        assert!(best.record(40));
        assert!(!best.record(20));
        assert!(!best.record(40));
        assert_eq!(best.value(), 40);
    }

    #[test]
    fn test_load_and_save() {
        let mut store = MemoryStore::new();
        assert_eq!(BestScore::load(&store).value(), 0);

        BestScore::new(123).save(&mut store).unwrap();
        assert_eq!(BestScore::load(&store).value(), 123);

        store.set(BestScore::STORAGE_KEY, "lots").unwrap();
        assert_eq!(BestScore::load(&store).value(), 0);
    }
}
