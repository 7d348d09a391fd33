//! Game settings
//!
//! Persisted separately from the best score. Settings are fixed for the
//! duration of a game; changing them starts a new one.

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, StorageError};

/// Board size presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BoardSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl BoardSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardSize::Small => "small",
            BoardSize::Medium => "medium",
            BoardSize::Large => "large",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "small" => Some(BoardSize::Small),
            "medium" | "med" => Some(BoardSize::Medium),
            "large" => Some(BoardSize::Large),
            _ => None,
        }
    }

    /// Grid dimensions (cols, rows)
    pub fn dimensions(&self) -> (i32, i32) {
        match self {
            BoardSize::Small => (15, 12),
            BoardSize::Medium => (20, 15),
            BoardSize::Large => (30, 20),
        }
    }
}

/// What happens at the board edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WallMode {
    /// Leaving the board ends the game
    #[default]
    Solid,
    /// Leaving the board re-enters on the opposite side
    Wrap,
}

impl WallMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WallMode::Solid => "solid",
            WallMode::Wrap => "wrap",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "solid" => Some(WallMode::Solid),
            "wrap" => Some(WallMode::Wrap),
            _ => None,
        }
    }
}

/// How fast the tick interval shrinks per level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyCurve {
    Gentle,
    #[default]
    Normal,
    Steep,
}

impl DifficultyCurve {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyCurve::Gentle => "gentle",
            DifficultyCurve::Normal => "normal",
            DifficultyCurve::Steep => "steep",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gentle" => Some(DifficultyCurve::Gentle),
            "normal" => Some(DifficultyCurve::Normal),
            "steep" => Some(DifficultyCurve::Steep),
            _ => None,
        }
    }

    /// Milliseconds shaved off the tick interval per level
    pub fn step_ms(&self) -> f64 {
        match self {
            DifficultyCurve::Gentle => 5.0,
            DifficultyCurve::Normal => 8.0,
            DifficultyCurve::Steep => 12.0,
        }
    }
}

/// Player settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub board_size: BoardSize,
    pub wall_mode: WallMode,
    pub difficulty_curve: DifficultyCurve,
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "grid_snake_settings";

    /// Load settings, falling back to defaults on missing or corrupt data
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::info!("Ignoring corrupt settings: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::info!("Settings unavailable: {}", e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        let json = serde_json::to_string(self)?;
        store.set(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.board_size, BoardSize::Medium);
        assert_eq!(settings.wall_mode, WallMode::Solid);
        assert_eq!(settings.difficulty_curve, DifficultyCurve::Normal);
        assert_eq!(settings.board_size.dimensions(), (20, 15));
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let settings = Settings {
            board_size: BoardSize::Large,
            wall_mode: WallMode::Wrap,
            difficulty_curve: DifficultyCurve::Steep,
        };
        settings.save(&mut store).unwrap();
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_load_missing_uses_defaults() {
        let store = MemoryStore::new();
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_load_corrupt_uses_defaults() {
        let mut store = MemoryStore::new();
        store.set(Settings::STORAGE_KEY, "{not json").unwrap();
        assert_eq!(Settings::load(&store), Settings::default());

        store
            .set(Settings::STORAGE_KEY, r#"{"boardSize":"huge"}"#)
            .unwrap();
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_load_partial_record_keeps_known_fields() {
        let mut store = MemoryStore::new();
        store
            .set(Settings::STORAGE_KEY, r#"{"wallMode":"wrap"}"#)
            .unwrap();
        let settings = Settings::load(&store);
        assert_eq!(settings.wall_mode, WallMode::Wrap);
        assert_eq!(settings.board_size, BoardSize::Medium);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(BoardSize::from_str("SMALL"), Some(BoardSize::Small));
        assert_eq!(WallMode::from_str("wrap"), Some(WallMode::Wrap));
        assert_eq!(DifficultyCurve::from_str("steep"), Some(DifficultyCurve::Steep));
        assert_eq!(DifficultyCurve::from_str("brutal"), None);
    }
}
