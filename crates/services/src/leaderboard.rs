//! Read/write client for the shared score board.
//!
//! The backend is a plain JSON collection endpoint; this client only shapes
//! requests and orders results. Fetch failures are the caller's to log, and
//! the board renders empty rather than blocking anything.

use std::env;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::LeaderboardError;

/// Most entries a board will ever show.
pub const LEADERBOARD_LIMIT: usize = 500;

/// One row on the board. Field names are camelCase on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub username: String,
    pub score: u32,
    pub time_taken_secs: u32,
    pub streak: u32,
    #[serde(default)]
    pub avatar_seed: String,
    #[serde(default)]
    pub country: String,
}

/// Board order: score first, faster time breaks ties, longer streak breaks
/// the rest. Truncates to [`LEADERBOARD_LIMIT`].
pub fn rank(entries: &mut Vec<LeaderboardEntry>) {
    entries.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.time_taken_secs.cmp(&b.time_taken_secs))
            .then_with(|| b.streak.cmp(&a.streak))
    });
    entries.truncate(LEADERBOARD_LIMIT);
}

#[derive(Clone, Debug)]
pub struct LeaderboardConfig {
    pub base_url: String,
}

impl LeaderboardConfig {
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let base_url = env::var("SPELL_LEADERBOARD_URL").ok()?;
        if base_url.trim().is_empty() {
            return None;
        }
        Some(Self { base_url })
    }
}

#[derive(Clone)]
pub struct LeaderboardService {
    client: Client,
    config: Option<LeaderboardConfig>,
}

impl LeaderboardService {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(LeaderboardConfig::from_env())
    }

    #[must_use]
    pub fn new(config: Option<LeaderboardConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }

    /// Fetch the board, ranked and truncated.
    ///
    /// # Errors
    ///
    /// Returns `LeaderboardError` when the client is disabled, the request
    /// fails, or the server answers with a non-success status.
    pub async fn fetch_top(&self) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        let config = self.config.as_ref().ok_or(LeaderboardError::Disabled)?;
        let url = format!("{}/scores", config.base_url.trim_end_matches('/'));

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(LeaderboardError::HttpStatus(response.status()));
        }

        let mut entries: Vec<LeaderboardEntry> = response.json().await?;
        rank(&mut entries);
        Ok(entries)
    }

    /// Post a finished result to the board.
    ///
    /// # Errors
    ///
    /// Returns `LeaderboardError` when the client is disabled, the request
    /// fails, or the server answers with a non-success status.
    pub async fn submit(&self, entry: &LeaderboardEntry) -> Result<(), LeaderboardError> {
        let config = self.config.as_ref().ok_or(LeaderboardError::Disabled)?;
        let url = format!("{}/scores", config.base_url.trim_end_matches('/'));

        let response = self.client.post(url).json(entry).send().await?;
        if !response.status().is_success() {
            return Err(LeaderboardError::HttpStatus(response.status()));
        }
        Ok(())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn row(username: &str, score: u32, time: u32, streak: u32) -> LeaderboardEntry {
        LeaderboardEntry {
            username: username.to_owned(),
            score,
            time_taken_secs: time,
            streak,
            avatar_seed: String::new(),
            country: String::new(),
        }
    }

    #[test]
    fn ranking_orders_by_score_time_then_streak() {
        let mut entries = vec![
            row("slow-tie", 90, 400, 9),
            row("leader", 120, 300, 2),
            row("fast-tie", 90, 250, 3),
            row("streak-tie", 90, 250, 8),
        ];
        rank(&mut entries);

        let names: Vec<&str> = entries.iter().map(|e| e.username.as_str()).collect();
        assert_eq!(names, ["leader", "streak-tie", "fast-tie", "slow-tie"]);
    }

    #[test]
    fn ranking_truncates_to_the_limit() {
        let mut entries: Vec<LeaderboardEntry> = (0..600)
            .map(|i| row(&format!("user{i}"), i, 100, 0))
            .collect();
        rank(&mut entries);
        assert_eq!(entries.len(), LEADERBOARD_LIMIT);
        assert_eq!(entries[0].score, 599);
    }

    #[test]
    fn entries_decode_from_camel_case_wire_format() {
        let raw = r#"
            [{
                "username": "bee-keeper",
                "score": 42,
                "timeTakenSecs": 310,
                "streak": 7,
                "avatarSeed": "hex-1f",
                "country": "NZ"
            }]
        "#;
        let entries: Vec<LeaderboardEntry> = serde_json::from_str(raw).unwrap();
        assert_eq!(entries[0].username, "bee-keeper");
        assert_eq!(entries[0].time_taken_secs, 310);
        assert_eq!(entries[0].avatar_seed, "hex-1f");
    }

    #[test]
    fn optional_wire_fields_default_when_missing() {
        let raw = r#"[{"username": "anon", "score": 1, "timeTakenSecs": 5, "streak": 0}]"#;
        let entries: Vec<LeaderboardEntry> = serde_json::from_str(raw).unwrap();
        assert_eq!(entries[0].avatar_seed, "");
        assert_eq!(entries[0].country, "");
    }

    #[tokio::test]
    async fn disabled_client_reports_disabled() {
        let service = LeaderboardService::new(None);
        assert!(!service.enabled());
        let err = service.fetch_top().await.unwrap_err();
        assert!(matches!(err, LeaderboardError::Disabled));
    }
}
