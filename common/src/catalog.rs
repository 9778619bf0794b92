//! Exhibit list cached for the day, plus the visitor's visited flags.
//!
//! The list is fetched at most once per calendar day in the exhibition's
//! timezone. A refetch keeps the `visited` and `rating_submitted` flags the
//! visitor already set, matched by model number.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, Utc};
use log::warn;

use crate::cache::{KeyValueStore, LocalCache, Staleness, keys};
use crate::error::{CacheError, GatewayError};
use crate::gateway::ExhibitSource;
use crate::model::exhibit::Exhibit;

pub struct Catalog<S> {
    cache: LocalCache<S>,
    policy: Staleness,
}

impl<S: KeyValueStore> Catalog<S> {
    pub fn new(store: S, offset: FixedOffset) -> Self {
        Self {
            cache: LocalCache::new(store),
            policy: Staleness::SameDay(offset),
        }
    }

    pub fn cached(&self) -> Option<Vec<Exhibit>> {
        self.cache.get_json(keys::MODELS)
    }

    /// Today's cached list, or a fresh fetch. Falls back to a cache of any
    /// age when the fetch fails; errors only when there is nothing cached.
    pub async fn load(&self, source: &impl ExhibitSource, now: DateTime<Utc>) -> Result<Vec<Exhibit>, GatewayError> {
        if let Some(fresh) = self
            .cache
            .get_fresh::<Vec<Exhibit>>(keys::MODELS, keys::MODELS_DATE, self.policy, now)
        {
            return Ok(fresh);
        }

        match source.fetch_exhibits().await {
            Ok(fetched) => {
                let merged = self.merge_flags(fetched);
                if let Err(e) = self
                    .cache
                    .set_stamped(keys::MODELS, keys::MODELS_DATE, &merged, now)
                {
                    warn!("Could not cache exhibits: {e}");
                }
                Ok(merged)
            }
            Err(e) => {
                warn!("Fetching exhibits failed: {e}");
                self.cached().ok_or(e)
            }
        }
    }

    pub async fn find(
        &self,
        source: &impl ExhibitSource,
        model_number: u32,
        now: DateTime<Utc>,
    ) -> Result<Option<Exhibit>, GatewayError> {
        let exhibits = self.load(source, now).await?;
        Ok(exhibits.into_iter().find(|e| e.model_number == model_number))
    }

    fn merge_flags(&self, mut fetched: Vec<Exhibit>) -> Vec<Exhibit> {
        let previous: HashMap<u32, (u8, bool)> = self
            .cached()
            .unwrap_or_default()
            .into_iter()
            .map(|e| (e.model_number, (e.visited, e.rating_submitted)))
            .collect();
        for exhibit in &mut fetched {
            if let Some((visited, rated)) = previous.get(&exhibit.model_number) {
                exhibit.visited = *visited;
                exhibit.rating_submitted = *rated;
            }
        }
        fetched.sort_by_key(|e| e.model_number);
        fetched
    }

    /// Applies `change` to the cached exhibit. Returns its result, or `None`
    /// when nothing is cached or the model is unknown.
    fn update<T>(&self, model_number: u32, change: impl FnOnce(&mut Exhibit) -> T) -> Result<Option<T>, CacheError> {
        let Some(mut exhibits) = self.cached() else {
            warn!("No exhibits cached; cannot update model {model_number}");
            return Ok(None);
        };
        let Some(exhibit) = exhibits.iter_mut().find(|e| e.model_number == model_number) else {
            return Ok(None);
        };
        let result = change(exhibit);
        self.cache.set_json(keys::MODELS, &exhibits)?;
        Ok(Some(result))
    }

    pub fn set_visited(&self, model_number: u32, visited: bool) -> Result<bool, CacheError> {
        self.update(model_number, |e| e.visited = u8::from(visited))
            .map(|changed| changed.is_some())
    }

    /// Flips the visited flag and returns the new value.
    pub fn toggle_visited(&self, model_number: u32) -> Result<Option<bool>, CacheError> {
        self.update(model_number, |e| {
            e.visited = u8::from(!e.is_visited());
            e.is_visited()
        })
    }

    pub fn mark_rated(&self, model_number: u32) -> Result<bool, CacheError> {
        self.update(model_number, |e| e.rating_submitted = true)
            .map(|changed| changed.is_some())
    }

    /// Forces the next `load` to fetch, keeping the flags for the merge.
    pub fn invalidate(&self) {
        self.cache.remove(keys::MODELS_DATE);
    }
}

/// Exhibits sharing one physical location.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationGroup {
    pub location: String,
    pub exhibits: Vec<Exhibit>,
}

impl LocationGroup {
    pub fn total(&self) -> usize {
        self.exhibits.len()
    }

    pub fn visited_count(&self) -> usize {
        self.exhibits.iter().filter(|e| e.is_visited()).count()
    }

    pub fn visited_percent(&self) -> f64 {
        if self.exhibits.is_empty() {
            0.0
        } else {
            self.visited_count() as f64 / self.total() as f64 * 100.0
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.exhibits.is_empty() && self.visited_count() == self.total()
    }
}

/// Groups in the order each location first appears.
pub fn group_by_location(exhibits: &[Exhibit]) -> Vec<LocationGroup> {
    let mut groups: Vec<LocationGroup> = Vec::new();
    for exhibit in exhibits {
        match groups.iter_mut().find(|g| g.location == exhibit.location) {
            Some(group) => group.exhibits.push(exhibit.clone()),
            None => groups.push(LocationGroup {
                location: exhibit.location.clone(),
                exhibits: vec![exhibit.clone()],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use chrono::{Duration, TimeZone};
    use std::cell::{Cell, RefCell};

    struct ScriptedSource {
        exhibits: RefCell<Vec<Exhibit>>,
        calls: Cell<usize>,
        fail: Cell<bool>,
    }

    impl ScriptedSource {
        fn new(exhibits: Vec<Exhibit>) -> Self {
            Self {
                exhibits: RefCell::new(exhibits),
                calls: Cell::new(0),
                fail: Cell::new(false),
            }
        }
    }

    impl ExhibitSource for ScriptedSource {
        async fn fetch_exhibits(&self) -> Result<Vec<Exhibit>, GatewayError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail.get() {
                Err(GatewayError::Network("offline".to_string()))
            } else {
                Ok(self.exhibits.borrow().clone())
            }
        }
    }

    fn exhibit(model_number: u32, location: &str) -> Exhibit {
        Exhibit {
            id: Some(model_number as i64),
            model_number,
            name_en: format!("Model {model_number}"),
            name_ur: String::new(),
            name_kn: String::new(),
            description_en: String::new(),
            description_ur: String::new(),
            description_kn: String::new(),
            location: location.to_string(),
            visited: 0,
            rating_submitted: false,
        }
    }

    fn ist() -> FixedOffset {
        FixedOffset::east_opt(19_800).unwrap()
    }

    #[tokio::test]
    async fn list_is_fetched_once_per_day() {
        let source = ScriptedSource::new(vec![exhibit(2, "Hall A"), exhibit(1, "Hall A")]);
        let catalog = Catalog::new(MemoryStore::new(), ist());
        let morning = Utc.with_ymd_and_hms(2025, 11, 3, 4, 0, 0).unwrap();

        let first = catalog.load(&source, morning).await.unwrap();
        let again = catalog.load(&source, morning + Duration::hours(6)).await.unwrap();
        assert_eq!(source.calls.get(), 1);
        assert_eq!(first, again);
        assert_eq!(first[0].model_number, 1);

        catalog.load(&source, morning + Duration::days(1)).await.unwrap();
        assert_eq!(source.calls.get(), 2);
    }

    #[tokio::test]
    async fn refetch_keeps_visited_flags() {
        let source = ScriptedSource::new(vec![exhibit(1, "Hall A"), exhibit(2, "Hall B")]);
        let catalog = Catalog::new(MemoryStore::new(), ist());
        let day_one = Utc.with_ymd_and_hms(2025, 11, 3, 4, 0, 0).unwrap();
        catalog.load(&source, day_one).await.unwrap();

        assert!(catalog.set_visited(2, true).unwrap());
        assert!(catalog.mark_rated(2).unwrap());
        source.exhibits.borrow_mut().push(exhibit(3, "Hall B"));

        let next_day = catalog.load(&source, day_one + Duration::days(1)).await.unwrap();
        assert_eq!(next_day.len(), 3);
        assert!(next_day[1].is_visited());
        assert!(next_day[1].rating_submitted);
        assert!(!next_day[2].is_visited());
    }

    #[tokio::test]
    async fn failed_fetch_serves_an_old_cache_or_errors() {
        let source = ScriptedSource::new(vec![exhibit(1, "Hall A")]);
        let catalog = Catalog::new(MemoryStore::new(), ist());
        let day_one = Utc.with_ymd_and_hms(2025, 11, 3, 4, 0, 0).unwrap();

        source.fail.set(true);
        assert!(catalog.load(&source, day_one).await.is_err());

        source.fail.set(false);
        catalog.load(&source, day_one).await.unwrap();
        source.fail.set(true);
        let stale = catalog.load(&source, day_one + Duration::days(2)).await.unwrap();
        assert_eq!(stale.len(), 1);
    }

    #[tokio::test]
    async fn toggling_flips_and_reports_unknown_models() {
        let source = ScriptedSource::new(vec![exhibit(1, "Hall A")]);
        let catalog = Catalog::new(MemoryStore::new(), ist());
        assert_eq!(catalog.toggle_visited(1).unwrap(), None);

        catalog.load(&source, Utc::now()).await.unwrap();
        assert_eq!(catalog.toggle_visited(1).unwrap(), Some(true));
        assert_eq!(catalog.toggle_visited(1).unwrap(), Some(false));
        assert_eq!(catalog.toggle_visited(99).unwrap(), None);
    }

    #[test]
    fn groups_keep_first_seen_order_and_progress() {
        let mut exhibits = vec![
            exhibit(1, "Hall B"),
            exhibit(2, "Hall A"),
            exhibit(3, "Hall B"),
            exhibit(4, "Hall B"),
        ];
        exhibits[0].visited = 1;
        exhibits[1].visited = 1;

        let groups = group_by_location(&exhibits);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].location, "Hall B");
        assert_eq!(groups[0].total(), 3);
        assert!((groups[0].visited_percent() - 100.0 / 3.0).abs() < 1e-9);
        assert!(groups[1].is_complete());
    }
}
