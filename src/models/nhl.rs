use serde::Serialize;

use crate::clients::nhl::{PlayerLanding, TeamStandingRow};

/// League standing entry in the shape the dashboard consumes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSummary {
    pub full_name: String,
    pub common_name: String,
    pub abbrev_name: String,
    pub logo: String,
    pub wins: i32,
    pub losses: i32,
    pub ot_losses: i32,
    pub points: i32,
    pub points_percentage: f64,
    pub div_rank: i32,
    pub conf_rank: i32,
    pub league_rank: i32,
}

impl From<TeamStandingRow> for TeamSummary {
    fn from(row: TeamStandingRow) -> Self {
        Self {
            full_name: row.team_name.default,
            common_name: row.team_common_name.default,
            abbrev_name: row.team_abbrev.default,
            logo: row.team_logo,
            wins: row.wins,
            losses: row.losses,
            ot_losses: row.ot_losses,
            points: row.points,
            points_percentage: row.point_pctg,
            div_rank: row.division_sequence,
            conf_rank: row.conference_sequence,
            league_rank: row.league_sequence,
        }
    }
}

/// Stat line for one rostered player, missing upstream fields defaulted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatLine {
    pub first_name: String,
    pub last_name: String,
    pub number: Option<i32>,
    pub position: String,
    pub games_played: i32,
    pub goals: i32,
    pub assists: i32,
    pub points: i32,
    pub headshot: Option<String>,
}

impl From<PlayerLanding> for PlayerStatLine {
    fn from(p: PlayerLanding) -> Self {
        let season = p
            .featured_stats
            .and_then(|f| f.regular_season)
            .and_then(|r| r.sub_season)
            .unwrap_or_default();

        Self {
            first_name: p.first_name.default,
            last_name: p.last_name.default,
            number: p.sweater_number,
            position: p.position,
            games_played: season.games_played,
            goals: season.goals,
            assists: season.assists,
            points: season.points,
            headshot: p.headshot,
        }
    }
}

/// A roster partitioned into the three position buckets. Ordering within
/// each bucket is the order the roster feed returned the players.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GroupedRoster {
    pub forwards: Vec<PlayerStatLine>,
    pub defencemen: Vec<PlayerStatLine>,
    pub goalies: Vec<PlayerStatLine>,
}

impl GroupedRoster {
    /// Partitions by position code: forwards = {C, LW, RW}, defencemen = {D},
    /// goalies = {G}. Unknown codes fall outside every bucket.
    #[must_use]
    pub fn partition(players: Vec<PlayerStatLine>) -> Self {
        let mut grouped = Self::default();
        for player in players {
            match player.position.as_str() {
                "C" | "LW" | "RW" => grouped.forwards.push(player),
                "D" => grouped.defencemen.push(player),
                "G" => grouped.goalies.push(player),
                _ => {}
            }
        }
        grouped
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.forwards.len() + self.defencemen.len() + self.goalies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(position: &str, last_name: &str) -> PlayerStatLine {
        PlayerStatLine {
            first_name: String::new(),
            last_name: last_name.to_string(),
            number: None,
            position: position.to_string(),
            games_played: 0,
            goals: 0,
            assists: 0,
            points: 0,
            headshot: None,
        }
    }

    #[test]
    fn partition_fills_disjoint_buckets() {
        let grouped = GroupedRoster::partition(vec![
            line("C", "a"),
            line("D", "b"),
            line("LW", "c"),
            line("G", "d"),
            line("RW", "e"),
            line("D", "f"),
        ]);

        let names = |bucket: &[PlayerStatLine]| {
            bucket.iter().map(|p| p.last_name.clone()).collect::<Vec<_>>()
        };
        assert_eq!(names(&grouped.forwards), ["a", "c", "e"]);
        assert_eq!(names(&grouped.defencemen), ["b", "f"]);
        assert_eq!(names(&grouped.goalies), ["d"]);
        assert_eq!(grouped.len(), 6);
    }

    #[test]
    fn partition_drops_unknown_position_codes() {
        let grouped = GroupedRoster::partition(vec![line("C", "a"), line("F", "weird")]);
        assert_eq!(grouped.len(), 1);
    }

    #[test]
    fn stat_line_serializes_camel_case() {
        let value = serde_json::to_value(line("C", "x")).unwrap();
        assert!(value.get("gamesPlayed").is_some());
        assert!(value.get("games_played").is_none());
    }
}
