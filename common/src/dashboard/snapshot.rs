use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::ranking::{ModelRanking, ScoredRating, rank_models};
use super::stats::{GlobalStats, global_stats};
use super::trend::{HourBucket, hourly_trend};
use super::DashboardConfig;
use crate::cache::{KeyValueStore, LocalCache, Staleness, keys};
use crate::error::GatewayError;
use crate::gateway::{ExhibitSource, RatingSource};
use crate::model::exhibit::Exhibit;
use crate::model::rating::Rating;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub rankings: Vec<ModelRanking>,
    pub stats: GlobalStats,
    pub trend: Vec<HourBucket>,
}

/// Where a loaded snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotOrigin {
    /// Cached and still inside the TTL.
    Cache,
    Fresh,
    /// The fetch failed; an expired cache was served instead.
    StaleFallback,
    /// The fetch failed and nothing was cached.
    Empty,
}

pub fn build_snapshot<R: ScoredRating>(exhibits: &[Exhibit], ratings: &[R], config: &DashboardConfig) -> DashboardSnapshot {
    let rankings = rank_models(exhibits, ratings);
    let stats = global_stats(ratings, &rankings);
    let trend = hourly_trend(ratings, config);
    DashboardSnapshot {
        rankings,
        stats,
        trend,
    }
}

pub struct DashboardLoader<S> {
    cache: LocalCache<S>,
    config: DashboardConfig,
}

impl<S: KeyValueStore> DashboardLoader<S> {
    pub fn new(store: S, config: DashboardConfig) -> Self {
        Self {
            cache: LocalCache::new(store),
            config,
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Serves the cached snapshot while it is younger than the TTL, otherwise
    /// fetches and rebuilds it.
    pub async fn load(
        &self,
        exhibits: &impl ExhibitSource,
        ratings: &impl RatingSource,
        now: DateTime<Utc>,
    ) -> (DashboardSnapshot, SnapshotOrigin) {
        let policy = Staleness::Within(self.config.ttl);
        if let Some(cached) = self
            .cache
            .get_fresh::<DashboardSnapshot>(keys::DASHBOARD, keys::DASHBOARD_TIME, policy, now)
        {
            return (cached, SnapshotOrigin::Cache);
        }
        self.refresh(exhibits, ratings, now).await
    }

    /// Fetches regardless of the cache age.
    pub async fn refresh(
        &self,
        exhibits: &impl ExhibitSource,
        ratings: &impl RatingSource,
        now: DateTime<Utc>,
    ) -> (DashboardSnapshot, SnapshotOrigin) {
        match Self::fetch(exhibits, ratings).await {
            Ok((models, rows)) => {
                let snapshot = build_snapshot(&models, &rows, &self.config);
                if let Err(e) = self
                    .cache
                    .set_stamped(keys::DASHBOARD, keys::DASHBOARD_TIME, &snapshot, now)
                {
                    warn!("Could not cache dashboard snapshot: {e}");
                }
                info!(
                    "Dashboard refreshed: {} ratings over {} models",
                    snapshot.stats.total_ratings,
                    snapshot.rankings.len()
                );
                (snapshot, SnapshotOrigin::Fresh)
            }
            Err(e) => {
                warn!("Dashboard fetch failed: {e}");
                match self.cache.get_json::<DashboardSnapshot>(keys::DASHBOARD) {
                    Some(stale) => (stale, SnapshotOrigin::StaleFallback),
                    None => (DashboardSnapshot::default(), SnapshotOrigin::Empty),
                }
            }
        }
    }

    async fn fetch(
        exhibits: &impl ExhibitSource,
        ratings: &impl RatingSource,
    ) -> Result<(Vec<Exhibit>, Vec<Rating>), GatewayError> {
        let models = exhibits.fetch_exhibits().await?;
        let rows = ratings.fetch_ratings().await?;
        Ok((models, rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use chrono::{Duration, TimeZone};
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct ScriptedRemote {
        ratings: RefCell<Vec<Rating>>,
        fetches: Cell<usize>,
        offline: Cell<bool>,
    }

    impl ExhibitSource for ScriptedRemote {
        async fn fetch_exhibits(&self) -> Result<Vec<Exhibit>, GatewayError> {
            if self.offline.get() {
                return Err(GatewayError::Network("offline".to_string()));
            }
            Ok(vec![Exhibit {
                id: Some(1),
                model_number: 1,
                name_en: "Model 1".to_string(),
                name_ur: String::new(),
                name_kn: String::new(),
                description_en: String::new(),
                description_ur: String::new(),
                description_kn: String::new(),
                location: "Hall A".to_string(),
                visited: 0,
                rating_submitted: false,
            }])
        }
    }

    impl RatingSource for ScriptedRemote {
        async fn fetch_ratings(&self) -> Result<Vec<Rating>, GatewayError> {
            self.fetches.set(self.fetches.get() + 1);
            Ok(self.ratings.borrow().clone())
        }
    }

    fn stars(user_id: &str, star_rating: u8) -> Rating {
        Rating {
            id: None,
            user_id: user_id.to_string(),
            model_number: 1,
            star_rating,
            comments: None,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn snapshot_is_served_from_cache_inside_the_ttl() {
        let remote = ScriptedRemote::default();
        remote.ratings.borrow_mut().push(stars("a", 5));
        let loader = DashboardLoader::new(MemoryStore::new(), DashboardConfig::default());
        let t0 = Utc.with_ymd_and_hms(2025, 11, 3, 10, 0, 0).unwrap();

        let (first, origin) = loader.load(&remote, &remote, t0).await;
        assert_eq!(origin, SnapshotOrigin::Fresh);
        assert_eq!(first.stats.total_ratings, 1);

        remote.ratings.borrow_mut().push(stars("b", 3));

        let (cached, origin) = loader.load(&remote, &remote, t0 + Duration::seconds(90)).await;
        assert_eq!(origin, SnapshotOrigin::Cache);
        assert_eq!(cached.stats.total_ratings, 1);
        assert_eq!(remote.fetches.get(), 1);

        let (fresh, origin) = loader.load(&remote, &remote, t0 + Duration::seconds(130)).await;
        assert_eq!(origin, SnapshotOrigin::Fresh);
        assert_eq!(fresh.stats.total_ratings, 2);
        assert_eq!(fresh.rankings[0].composite, 4.0);
        assert_eq!(remote.fetches.get(), 2);
    }

    #[tokio::test]
    async fn failed_fetch_falls_back_to_any_cache_then_to_defaults() {
        let remote = ScriptedRemote::default();
        remote.offline.set(true);
        let loader = DashboardLoader::new(MemoryStore::new(), DashboardConfig::default());
        let t0 = Utc.with_ymd_and_hms(2025, 11, 3, 10, 0, 0).unwrap();

        let (empty, origin) = loader.load(&remote, &remote, t0).await;
        assert_eq!(origin, SnapshotOrigin::Empty);
        assert_eq!(empty, DashboardSnapshot::default());

        remote.offline.set(false);
        remote.ratings.borrow_mut().push(stars("a", 4));
        loader.load(&remote, &remote, t0).await;

        remote.offline.set(true);
        let (stale, origin) = loader.load(&remote, &remote, t0 + Duration::hours(5)).await;
        assert_eq!(origin, SnapshotOrigin::StaleFallback);
        assert_eq!(stale.stats.total_ratings, 1);
    }
}
