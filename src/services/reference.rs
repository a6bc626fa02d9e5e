use std::future::Future;
use std::sync::Arc;

use moka::future::Cache;

use crate::clients::UpstreamError;
use crate::models::nhl::{GroupedRoster, TeamSummary};

/// In-process cache for externally sourced reference data, owned by the
/// composition root and handed by reference to the routes that need it.
///
/// Neither cache has a TTL: presence of a key, not staleness, is the only
/// check, and entries live for the lifetime of the process. Failed fetches
/// are never cached, so the next request retries.
pub struct ReferenceCache {
    standings: Cache<(), Arc<Vec<TeamSummary>>>,
    rosters: Cache<String, Arc<GroupedRoster>>,
}

impl ReferenceCache {
    #[must_use]
    pub fn new() -> Self {
        Self {
            standings: Cache::new(1),
            // Comfortably above the league's team count.
            rosters: Cache::new(64),
        }
    }

    /// League standings, fetched at most once per process. Concurrent first
    /// callers share the in-flight fetch instead of each hitting upstream.
    pub async fn standings_or_fetch<F>(
        &self,
        fetch: F,
    ) -> Result<Arc<Vec<TeamSummary>>, Arc<UpstreamError>>
    where
        F: Future<Output = Result<Vec<TeamSummary>, UpstreamError>>,
    {
        self.standings
            .try_get_with((), async move { fetch.await.map(Arc::new) })
            .await
    }

    /// Roster for a team code. A cached code is served without any upstream
    /// call; concurrent fetches for the same code are deduplicated.
    pub async fn roster_or_fetch<F>(
        &self,
        team_code: &str,
        fetch: F,
    ) -> Result<Arc<GroupedRoster>, Arc<UpstreamError>>
    where
        F: Future<Output = Result<GroupedRoster, UpstreamError>>,
    {
        self.rosters
            .try_get_with(team_code.to_string(), async move {
                fetch.await.map(Arc::new)
            })
            .await
    }
}

impl Default for ReferenceCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn roster_of(n: usize) -> GroupedRoster {
        let players = (0..n)
            .map(|i| crate::models::nhl::PlayerStatLine {
                first_name: String::new(),
                last_name: format!("p{i}"),
                number: None,
                position: "C".to_string(),
                games_played: 0,
                goals: 0,
                assists: 0,
                points: 0,
                headshot: None,
            })
            .collect();
        GroupedRoster::partition(players)
    }

    #[tokio::test]
    async fn second_roster_request_is_served_from_cache() {
        let cache = ReferenceCache::new();
        let fetches = AtomicUsize::new(0);

        for _ in 0..3 {
            let roster = cache
                .roster_or_fetch("BOS", async {
                    fetches.fetch_add(1, Ordering::SeqCst);
                    Ok(roster_of(2))
                })
                .await
                .unwrap();
            assert_eq!(roster.len(), 2);
        }

        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn rosters_are_keyed_by_team_code() {
        let cache = ReferenceCache::new();
        let fetches = AtomicUsize::new(0);

        for team in ["BOS", "TOR", "BOS"] {
            cache
                .roster_or_fetch(team, async {
                    fetches.fetch_add(1, Ordering::SeqCst);
                    Ok(roster_of(1))
                })
                .await
                .unwrap();
        }

        assert_eq!(fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_fetches_are_not_cached() {
        let cache = ReferenceCache::new();
        let fetches = AtomicUsize::new(0);

        let err = cache
            .roster_or_fetch("BOS", async {
                fetches.fetch_add(1, Ordering::SeqCst);
                Err(UpstreamError::Status {
                    service: "NHL",
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                })
            })
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));

        cache
            .roster_or_fetch("BOS", async {
                fetches.fetch_add(1, Ordering::SeqCst);
                Ok(roster_of(1))
            })
            .await
            .unwrap();

        assert_eq!(fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn concurrent_standings_requests_share_one_fetch() {
        let cache = Arc::new(ReferenceCache::new());
        let fetches = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                let fetches = fetches.clone();
                tokio::spawn(async move {
                    cache
                        .standings_or_fetch(async move {
                            fetches.fetch_add(1, Ordering::SeqCst);
                            // Hold the in-flight slot long enough for every
                            // task to attach to it.
                            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
                            Ok(Vec::new())
                        })
                        .await
                })
            })
            .collect();

        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }
}
