use reqwest::Client;
use serde::Deserialize;

use super::UpstreamError;

pub const NHL_API: &str = "https://api-web.nhle.com/v1";

const SERVICE: &str = "NHL";

/// Name object as the NHL feed ships it: `{"default": "Boston Bruins", ...}`
/// with optional translations we ignore.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocalizedName {
    #[serde(default)]
    pub default: String,
}

#[derive(Debug, Deserialize)]
pub struct StandingsFeed {
    #[serde(default)]
    pub standings: Vec<TeamStandingRow>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStandingRow {
    #[serde(default)]
    pub team_name: LocalizedName,
    #[serde(default)]
    pub team_common_name: LocalizedName,
    #[serde(default)]
    pub team_abbrev: LocalizedName,
    #[serde(default)]
    pub team_logo: String,
    #[serde(default)]
    pub wins: i32,
    #[serde(default)]
    pub losses: i32,
    #[serde(default)]
    pub ot_losses: i32,
    #[serde(default)]
    pub points: i32,
    #[serde(default)]
    pub point_pctg: f64,
    #[serde(default)]
    pub division_sequence: i32,
    #[serde(default)]
    pub conference_sequence: i32,
    #[serde(default)]
    pub league_sequence: i32,
}

/// Current roster: three lists of player references. Only the ids are used;
/// stat detail comes from the per-player landing endpoint.
#[derive(Debug, Deserialize)]
pub struct RosterFeed {
    #[serde(default)]
    pub forwards: Vec<RosterEntry>,
    #[serde(default)]
    pub defensemen: Vec<RosterEntry>,
    #[serde(default)]
    pub goalies: Vec<RosterEntry>,
}

impl RosterFeed {
    /// Flattens to the single ordered id sequence the aggregator fans out over.
    #[must_use]
    pub fn player_ids(&self) -> Vec<i64> {
        self.forwards
            .iter()
            .chain(&self.defensemen)
            .chain(&self.goalies)
            .map(|p| p.id)
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct RosterEntry {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerLanding {
    #[serde(default)]
    pub first_name: LocalizedName,
    #[serde(default)]
    pub last_name: LocalizedName,
    #[serde(default)]
    pub sweater_number: Option<i32>,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub headshot: Option<String>,
    #[serde(default)]
    pub featured_stats: Option<FeaturedStats>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedStats {
    #[serde(default)]
    pub regular_season: Option<RegularSeason>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegularSeason {
    #[serde(default)]
    pub sub_season: Option<SubSeasonStats>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubSeasonStats {
    #[serde(default)]
    pub games_played: i32,
    #[serde(default)]
    pub goals: i32,
    #[serde(default)]
    pub assists: i32,
    #[serde(default)]
    pub points: i32,
}

#[derive(Debug, Clone)]
pub struct NhlClient {
    client: Client,
    base_url: String,
}

impl NhlClient {
    /// Reuses the shared pooled client; `base_url` is configurable so tests
    /// can point at a local stand-in.
    #[must_use]
    pub fn with_shared_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub async fn standings_now(&self) -> Result<StandingsFeed, UpstreamError> {
        self.get_json(format!("{}/standings/now", self.base_url)).await
    }

    pub async fn current_roster(&self, team_code: &str) -> Result<RosterFeed, UpstreamError> {
        let url = format!(
            "{}/roster/{}/current",
            self.base_url,
            urlencoding::encode(team_code)
        );
        self.get_json(url).await
    }

    pub async fn player_landing(&self, player_id: i64) -> Result<PlayerLanding, UpstreamError> {
        self.get_json(format!("{}/player/{player_id}/landing", self.base_url))
            .await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: String,
    ) -> Result<T, UpstreamError> {
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| UpstreamError::Transport { service: SERVICE, source })?;

        if !response.status().is_success() {
            return Err(UpstreamError::Status {
                service: SERVICE,
                status: response.status(),
            });
        }

        response
            .json()
            .await
            .map_err(|source| UpstreamError::Decode { service: SERVICE, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_feed_flattens_in_feed_order() {
        let feed = RosterFeed {
            forwards: vec![RosterEntry { id: 1 }, RosterEntry { id: 2 }],
            defensemen: vec![RosterEntry { id: 3 }],
            goalies: vec![RosterEntry { id: 4 }],
        };
        assert_eq!(feed.player_ids(), [1, 2, 3, 4]);
    }

    #[test]
    fn player_landing_tolerates_sparse_payloads() {
        let landing: PlayerLanding = serde_json::from_str("{}").unwrap();
        assert_eq!(landing.first_name.default, "");
        assert!(landing.sweater_number.is_none());
        assert!(landing.featured_stats.is_none());
    }

    #[test]
    fn standings_row_reads_nhl_field_names() {
        let row: TeamStandingRow = serde_json::from_value(serde_json::json!({
            "teamName": { "default": "Boston Bruins" },
            "teamCommonName": { "default": "Bruins" },
            "teamAbbrev": { "default": "BOS" },
            "teamLogo": "https://assets.nhle.com/logos/BOS.svg",
            "wins": 47,
            "losses": 20,
            "otLosses": 5,
            "points": 99,
            "pointPctg": 0.6875,
            "divisionSequence": 1,
            "conferenceSequence": 2,
            "leagueSequence": 3
        }))
        .unwrap();

        assert_eq!(row.team_abbrev.default, "BOS");
        assert_eq!(row.ot_losses, 5);
        assert!((row.point_pctg - 0.6875).abs() < f64::EPSILON);
        assert_eq!(row.league_sequence, 3);
    }
}
