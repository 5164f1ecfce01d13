//! # Stats API Gateway
//!
//! Fetches the current rank and per-season breakdown for a player from the primary
//! stats API and aggregates it into a [`RankSummary`]. The kill statistic is merged in
//! from a [`KillsSource`] and never fails the overall resolution.

use crate::domain::config::StatsConfig;
use crate::domain::errors::StatsError;
use crate::domain::traits::{KillsSource, RankSource};
use crate::domain::types::{RankSummary, SeasonRecord, UNRATED};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

const DEFAULT_USER_AGENT: &str = "rankbot/0.1 (+twitch chat bot)";

/// Competitive acts tracked by the API, oldest first.
pub const SEASON_SLOTS: [&str; 18] = [
    "e1a1", "e1a2", "e1a3", "e2a1", "e2a2", "e2a3", "e3a1", "e3a2", "e3a3", "e4a1", "e4a2",
    "e4a3", "e5a1", "e5a2", "e5a3", "e6a1", "e6a2", "e6a3",
];

#[derive(Debug, Deserialize)]
struct RankResponse {
    data: RankData,
}

#[derive(Debug, Deserialize)]
struct RankData {
    name: String,
    tag: String,
    #[serde(default)]
    current_data: CurrentData,
    #[serde(default)]
    by_season: HashMap<String, SeasonRecord>,
}

#[derive(Debug, Default, Deserialize)]
struct CurrentData {
    #[serde(default)]
    currenttierpatched: Option<String>,
    #[serde(default)]
    elo: Option<i32>,
    #[serde(default)]
    ranking_in_tier: Option<i32>,
    #[serde(default)]
    mmr_change_to_last_game: Option<i32>,
}

/// Totals over all season slots that carry data.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeasonTotals {
    pub wins: u32,
    pub games: u32,
}

/// Sums wins and games over the known season slots, skipping flagged or missing ones.
pub fn aggregate_seasons(by_season: &HashMap<String, SeasonRecord>) -> SeasonTotals {
    SEASON_SLOTS
        .iter()
        .filter_map(|slot| by_season.get(*slot))
        .filter(|season| season.has_data())
        .fold(SeasonTotals::default(), |acc, season| SeasonTotals {
            wins: acc.wins + season.wins,
            games: acc.games + season.games_played,
        })
}

pub fn format_win_rate(totals: SeasonTotals) -> String {
    if totals.games == 0 {
        return "0%".to_string();
    }
    let rate = f64::from(totals.wins) / f64::from(totals.games) * 100.0;
    format!("{rate:.2}%")
}

/// Maps the HTTP status of the rank endpoint onto the error taxonomy.
pub fn check_status(status: StatusCode) -> Result<(), StatsError> {
    if status == StatusCode::NOT_FOUND {
        Err(StatsError::PlayerNotFound)
    } else if !status.is_success() {
        Err(StatsError::Transient(format!("HTTP {status}")))
    } else {
        Ok(())
    }
}

fn summarize(response: RankResponse, kills: String) -> RankSummary {
    let data = response.data;
    let totals = aggregate_seasons(&data.by_season);
    let current = data.current_data;

    RankSummary {
        name: data.name,
        tag: data.tag,
        rank: current
            .currenttierpatched
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| UNRATED.to_string()),
        elo: current.elo.unwrap_or(0),
        rr: current.ranking_in_tier.unwrap_or(0),
        change: current.mmr_change_to_last_game.unwrap_or(0),
        win_rate: format_win_rate(totals),
        kills,
    }
}

/// Appends path segments to a base URL, percent-encoding each one.
pub(crate) fn join_segments(base: &Url, segments: &[&str]) -> Result<Url, String> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| format!("{base} cannot be a base URL"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

pub struct StatsGateway {
    client: Client,
    base_url: Url,
    user_agent: String,
    kills: Arc<dyn KillsSource>,
}

impl StatsGateway {
    pub fn new(client: Client, config: &StatsConfig, kills: Arc<dyn KillsSource>) -> anyhow::Result<Self> {
        Ok(Self {
            client,
            base_url: Url::parse(&config.rank_api_url)?,
            user_agent: config
                .user_agent
                .clone()
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            kills,
        })
    }

    async fn request_rank(&self, name: &str, tag: &str) -> Result<RankResponse, StatsError> {
        let url = join_segments(&self.base_url, &[name, tag]).map_err(StatsError::Transient)?;

        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await?;

        check_status(response.status())?;
        Ok(response.json::<RankResponse>().await?)
    }
}

#[async_trait]
impl RankSource for StatsGateway {
    async fn resolve_rank(&self, name: &str, tag: &str) -> Result<RankSummary, StatsError> {
        let (rank, kills) = tokio::join!(self.request_rank(name, tag), self.kills.fetch_kills(name, tag));

        match rank {
            Ok(response) => Ok(summarize(response, kills)),
            Err(e) => {
                tracing::error!(event = "request_rank", player = %format!("{name}#{tag}"), "{}", e);
                Err(e)
            }
        }
    }
}
