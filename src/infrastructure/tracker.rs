//! # Tracker Scraper
//!
//! Best-effort adapter for the secondary kill statistic. The profile page embeds its
//! state as a JSON blob assigned to `window.__INITIAL_STATE__`; the blob ends at the
//! second-to-last `</script>` tag of the page. Any failure yields [`KILLS_UNKNOWN`].

use crate::domain::config::StatsConfig;
use crate::domain::traits::KillsSource;
use crate::domain::types::KILLS_UNKNOWN;
use crate::infrastructure::stats::join_segments;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;

const STATE_MARKER: &str = "window.__INITIAL_STATE__ = ";
const KILLS_POINTER: &str = "/stats/profiles/0/segments/0/stats/kills/displayValue";
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/111.0.0.0 Safari/537.36";

const SCRIPT_CLOSE: &str = "</script>";

/// Pulls the kill count display value out of a profile page.
pub fn extract_kills(html: &str) -> Result<String, &'static str> {
    let start = html
        .find(STATE_MARKER)
        .map(|idx| idx + STATE_MARKER.len())
        .ok_or("state marker missing")?;

    let closes: Vec<usize> = html.match_indices(SCRIPT_CLOSE).map(|(idx, _)| idx).collect();
    let end = closes
        .len()
        .checked_sub(2)
        .map(|i| closes[i])
        .ok_or("fewer than two script tags")?;

    if end <= start {
        return Err("state blob is empty");
    }
    // Only the first value counts; later statements in the same script are ignored.
    let state = serde_json::Deserializer::from_str(&html[start..end])
        .into_iter::<Value>()
        .next()
        .and_then(Result::ok)
        .ok_or("state blob is not JSON")?;
    state
        .pointer(KILLS_POINTER)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or("kills not present")
}

pub struct TrackerScraper {
    client: Client,
    base_url: Url,
}

impl TrackerScraper {
    pub fn new(client: Client, config: &StatsConfig) -> anyhow::Result<Self> {
        Ok(Self {
            client,
            base_url: Url::parse(&config.tracker_url)?,
        })
    }

    async fn fetch_page(&self, name: &str, tag: &str) -> Result<Option<String>, String> {
        let player = format!("{name}#{tag}");
        let url = join_segments(&self.base_url, &[player.as_str(), "weapons"])?;

        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        response.text().await.map(Some).map_err(|e| e.to_string())
    }
}

#[async_trait]
impl KillsSource for TrackerScraper {
    async fn fetch_kills(&self, name: &str, tag: &str) -> String {
        let html = match self.fetch_page(name, tag).await {
            Ok(Some(html)) => html,
            Ok(None) => return KILLS_UNKNOWN.to_string(),
            Err(e) => {
                tracing::warn!(event = "request_kills", "{}", e);
                return KILLS_UNKNOWN.to_string();
            }
        };

        extract_kills(&html).unwrap_or_else(|reason| {
            tracing::warn!(event = "request_kills", player = %format!("{name}#{tag}"), "{}", reason);
            KILLS_UNKNOWN.to_string()
        })
    }
}
