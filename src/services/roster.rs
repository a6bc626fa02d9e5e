use std::sync::Arc;

use futures::StreamExt;
use futures::stream;
use tracing::warn;

use crate::clients::UpstreamError;
use crate::clients::nhl::NhlClient;
use crate::models::nhl::{GroupedRoster, PlayerStatLine};

/// Assembles a stat-enriched, position-grouped roster for a team code.
///
/// The roster fetch is fatal to the request; the per-player stat fetches are
/// not. Each failing player is logged and dropped, so a flaky upstream
/// degrades richness instead of failing the whole batch.
pub struct RosterService {
    nhl: Arc<NhlClient>,
    concurrency: usize,
}

impl RosterService {
    #[must_use]
    pub fn new(nhl: Arc<NhlClient>, concurrency: usize) -> Self {
        Self {
            nhl,
            concurrency: concurrency.max(1),
        }
    }

    pub async fn assemble(&self, team_code: &str) -> Result<GroupedRoster, UpstreamError> {
        let roster = self.nhl.current_roster(team_code).await?;
        let ids = roster.player_ids();
        let total = ids.len();

        // Bounded gather: `buffered` keeps at most `concurrency` requests in
        // flight and yields results in id order, preserving the roster feed's
        // ordering within each bucket.
        let players: Vec<PlayerStatLine> = stream::iter(ids)
            .map(|id| self.stat_line(id))
            .buffered(self.concurrency)
            .filter_map(|line| async move { line })
            .collect()
            .await;

        if players.len() < total {
            warn!(
                team_code,
                dropped = total - players.len(),
                "roster assembled with missing players"
            );
        }

        Ok(GroupedRoster::partition(players))
    }

    async fn stat_line(&self, player_id: i64) -> Option<PlayerStatLine> {
        match self.nhl.player_landing(player_id).await {
            Ok(landing) => Some(PlayerStatLine::from(landing)),
            Err(err) => {
                warn!(player_id, error = %err, "dropping player from roster");
                None
            }
        }
    }
}
