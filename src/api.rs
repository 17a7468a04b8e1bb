//! Blocking client for the public NBA stats API
//!
//! Three endpoints back the pipeline: commonallplayers for the player
//! lookup, commonplayerinfo for the player's team, and shotchartdetail for
//! the raw shot rows. Responses arrive as named tabular result sets; this
//! module finds the right set and hands its header/row arrays to the
//! ingestion code. No retries: any failure skips everything downstream.

use std::time::Duration;

use chrono::{Datelike, Local, NaiveDate};
use log::{debug, info};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, REFERER, USER_AGENT};
use serde::Deserialize;
use serde_json::Value;

use crate::config::ChartConfig;
use crate::error::ChartError;
use crate::shots::{self, ShotRecord};

/// A game window of 0 means the full regular season.
pub const FULL_SEASON_GAMES: u32 = 82;

const LEAGUE_ID: &str = "00";
const SEASON_TYPE: &str = "Regular Season";

// stats.nba.com rejects requests without browser-looking headers.
const STATS_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/115.0";
const STATS_REFERER: &str = "https://www.nba.com/";

#[derive(Debug, Deserialize)]
struct StatsResponse {
    #[serde(rename = "resultSets")]
    result_sets: Vec<ResultSet>,
}

#[derive(Debug, Deserialize)]
struct ResultSet {
    name: String,
    headers: Vec<String>,
    #[serde(rename = "rowSet")]
    row_set: Vec<Vec<Value>>,
}

/// A player matched from the league index.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: u64,
    pub display_name: String,
}

/// Normalize the user's game-window count before it reaches any label or
/// fetch parameter: 0 means a full 82-game season.
pub fn normalize_game_window(games: u32) -> u32 {
    if games == 0 { FULL_SEASON_GAMES } else { games }
}

/// Season string for a date, e.g. "2025-26". New seasons start in October.
pub fn season_for(date: NaiveDate) -> String {
    let start_year = if date.month() >= 10 {
        date.year()
    } else {
        date.year() - 1
    };
    format!("{}-{:02}", start_year, (start_year + 1) % 100)
}

pub fn current_season() -> String {
    season_for(Local::now().date_naive())
}

pub struct StatsClient {
    http: Client,
    base_url: String,
    season: String,
}

impl StatsClient {
    pub fn new(config: &ChartConfig) -> Result<Self, ChartError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(STATS_USER_AGENT));
        headers.insert(REFERER, HeaderValue::from_static(STATS_REFERER));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert("x-nba-stats-origin", HeaderValue::from_static("stats"));
        headers.insert("x-nba-stats-token", HeaderValue::from_static("true"));

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(ChartError::ClientBuild)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            season: current_season(),
        })
    }

    /// Match "Lastname, Firstname" input against the league player index.
    /// Returns None when no player matches; the caller treats that as a
    /// normal termination path, not an error.
    pub fn find_player(
        &self,
        last_name: &str,
        first_name: &str,
    ) -> Result<Option<Player>, ChartError> {
        let endpoint = "commonallplayers";
        let response = self.get(
            endpoint,
            &[
                ("LeagueID", LEAGUE_ID.to_string()),
                ("Season", self.season.clone()),
                ("IsOnlyCurrentSeason", "0".to_string()),
            ],
        )?;
        let set = result_set(&response, "CommonAllPlayers", endpoint)?;

        let id_idx = header_index(set, "PERSON_ID", endpoint)?;
        let name_idx = header_index(set, "DISPLAY_LAST_COMMA_FIRST", endpoint)?;

        let want_last = last_name.trim().to_lowercase();
        let want_first = first_name.trim().to_lowercase();

        let mut found = None;
        for row in &set.row_set {
            let display = match row.get(name_idx).and_then(Value::as_str) {
                Some(name) => name,
                None => continue,
            };
            let Some((row_last, row_first)) = display.split_once(',') else {
                continue;
            };
            if row_last.trim().to_lowercase() == want_last
                && row_first.trim().to_lowercase() == want_first
            {
                let id = row
                    .get(id_idx)
                    .and_then(Value::as_u64)
                    .ok_or_else(|| payload_err(endpoint, "PERSON_ID is not an id"))?;
                found = Some(Player {
                    id,
                    display_name: display.to_string(),
                });
            }
        }

        if let Some(player) = &found {
            info!("matched player {} (id {})", player.display_name, player.id);
        }
        Ok(found)
    }

    /// Current team id for a player, needed by the shot chart endpoint.
    pub fn team_for_player(&self, player_id: u64) -> Result<u64, ChartError> {
        let endpoint = "commonplayerinfo";
        let response = self.get(endpoint, &[("PlayerID", player_id.to_string())])?;
        let set = result_set(&response, "CommonPlayerInfo", endpoint)?;

        let team_idx = header_index(set, "TEAM_ID", endpoint)?;
        let row = set
            .row_set
            .first()
            .ok_or_else(|| payload_err(endpoint, "no player info row"))?;
        row.get(team_idx)
            .and_then(Value::as_u64)
            .ok_or_else(|| payload_err(endpoint, "TEAM_ID is not an id"))
    }

    /// Fetch shot rows for the player over the given game window.
    pub fn fetch_shots(
        &self,
        player_id: u64,
        team_id: u64,
        last_n_games: u32,
    ) -> Result<Vec<ShotRecord>, ChartError> {
        let endpoint = "shotchartdetail";
        let response = self.get(
            endpoint,
            &[
                ("LeagueID", LEAGUE_ID.to_string()),
                ("Season", self.season.clone()),
                ("SeasonType", SEASON_TYPE.to_string()),
                ("TeamID", team_id.to_string()),
                ("PlayerID", player_id.to_string()),
                ("LastNGames", last_n_games.to_string()),
                ("ContextMeasure", "FGA".to_string()),
            ],
        )?;
        let set = result_set(&response, "Shot_Chart_Detail", endpoint)?;

        let shots = shots::from_rows(&set.headers, &set.row_set)?;
        debug!("fetched {} shot rows", shots.len());
        Ok(shots)
    }

    fn get(&self, endpoint: &'static str, params: &[(&str, String)]) -> Result<StatsResponse, ChartError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .query(params)
            .send()
            .map_err(|source| ChartError::Http { endpoint, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(payload_err(endpoint, &format!("HTTP {}", status)));
        }

        response
            .json::<StatsResponse>()
            .map_err(|e| payload_err(endpoint, &format!("not a result-set payload: {}", e)))
    }
}

fn payload_err(endpoint: &'static str, reason: &str) -> ChartError {
    ChartError::Payload {
        endpoint,
        reason: reason.to_string(),
    }
}

fn result_set<'a>(
    response: &'a StatsResponse,
    name: &str,
    endpoint: &'static str,
) -> Result<&'a ResultSet, ChartError> {
    response
        .result_sets
        .iter()
        .find(|set| set.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| payload_err(endpoint, &format!("missing result set {}", name)))
}

fn header_index(set: &ResultSet, name: &str, endpoint: &'static str) -> Result<usize, ChartError> {
    set.headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| payload_err(endpoint, &format!("missing header {}", name)))
}
