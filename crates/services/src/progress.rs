//! Durable progress and settings on top of the key/value store.
//!
//! Loads degrade: a missing, corrupt, or unreadable value falls back to its
//! default with a `log::warn!`, never an error. Writes report failures so
//! callers can decide whether to log-and-continue (in-game write-through)
//! or surface them (explicit resets).

use std::collections::BTreeSet;
use std::sync::Arc;

use spell_core::model::{Progress, WordId};
use storage::repository::{StateStore, StorageError};

pub const SOLVED_WORDS_KEY: &str = "solved_words";
pub const STARRED_WORDS_KEY: &str = "starred_words";
pub const BEST_STREAK_KEY: &str = "best_streak";
pub const THEME_KEY: &str = "theme";
pub const CONSENT_KEY: &str = "consent";

/// Display theme. Persisted as `"light"` / `"dark"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Reads and writes the well-known state keys.
#[derive(Clone)]
pub struct ProgressService {
    store: Arc<dyn StateStore>,
}

impl ProgressService {
    #[must_use]
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    /// Rehydrates progress from the store. Never fails; each damaged or
    /// unreadable key falls back to its default.
    pub async fn load(&self) -> Progress {
        let solved = self.load_word_set(SOLVED_WORDS_KEY).await;
        let starred = self.load_word_set(STARRED_WORDS_KEY).await;
        let best_streak = self.load_best_streak().await;
        Progress::from_persisted(solved, starred, best_streak)
    }

    async fn load_word_set(&self, key: &str) -> BTreeSet<WordId> {
        match self.store.get(key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(set) => set,
                Err(err) => {
                    log::warn!("ignoring corrupt value under {key:?}: {err}");
                    BTreeSet::new()
                }
            },
            Ok(None) => BTreeSet::new(),
            Err(err) => {
                log::warn!("could not read {key:?}: {err}");
                BTreeSet::new()
            }
        }
    }

    async fn load_best_streak(&self) -> u32 {
        match self.store.get(BEST_STREAK_KEY).await {
            Ok(Some(raw)) => match raw.parse() {
                Ok(value) => value,
                Err(err) => {
                    log::warn!("ignoring corrupt value under {BEST_STREAK_KEY:?}: {err}");
                    0
                }
            },
            Ok(None) => 0,
            Err(err) => {
                log::warn!("could not read {BEST_STREAK_KEY:?}: {err}");
                0
            }
        }
    }

    /// Write-through for the solved set.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when encoding or the write fails.
    pub async fn save_solved(&self, solved: &BTreeSet<WordId>) -> Result<(), StorageError> {
        let value = serde_json::to_string(solved)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        self.store.set(SOLVED_WORDS_KEY, &value).await
    }

    /// Write-through for the starred set.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when encoding or the write fails.
    pub async fn save_starred(&self, starred: &BTreeSet<WordId>) -> Result<(), StorageError> {
        let value = serde_json::to_string(starred)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        self.store.set(STARRED_WORDS_KEY, &value).await
    }

    /// Write-through for the best streak.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the write fails.
    pub async fn save_best_streak(&self, best_streak: u32) -> Result<(), StorageError> {
        self.store
            .set(BEST_STREAK_KEY, &best_streak.to_string())
            .await
    }

    /// Current theme; defaults to light.
    pub async fn theme(&self) -> Theme {
        match self.store.get(THEME_KEY).await {
            Ok(Some(raw)) => Theme::parse(&raw).unwrap_or_else(|| {
                log::warn!("ignoring unknown theme {raw:?}");
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(err) => {
                log::warn!("could not read {THEME_KEY:?}: {err}");
                Theme::default()
            }
        }
    }

    /// # Errors
    ///
    /// Returns `StorageError` when the write fails.
    pub async fn save_theme(&self, theme: Theme) -> Result<(), StorageError> {
        self.store.set(THEME_KEY, theme.as_str()).await
    }

    /// Whether the first-run notice has been acknowledged.
    pub async fn has_consent(&self) -> bool {
        match self.store.get(CONSENT_KEY).await {
            Ok(value) => value.as_deref() == Some("true"),
            Err(err) => {
                log::warn!("could not read {CONSENT_KEY:?}: {err}");
                false
            }
        }
    }

    /// # Errors
    ///
    /// Returns `StorageError` when the write fails.
    pub async fn record_consent(&self) -> Result<(), StorageError> {
        self.store.set(CONSENT_KEY, "true").await
    }

    /// Removes every progress key. The theme is a cosmetic preference and
    /// survives a reset.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on the first failed removal.
    pub async fn reset(&self) -> Result<(), StorageError> {
        for key in [
            SOLVED_WORDS_KEY,
            STARRED_WORDS_KEY,
            BEST_STREAK_KEY,
            CONSENT_KEY,
        ] {
            self.store.remove(key).await?;
        }
        Ok(())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
