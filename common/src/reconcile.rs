//! Rating reconciliation between the local cache and the remote store.
//!
//! The cache holds the list of ratings this visitor has made. It is filled
//! from the remote store the first time it is needed and trusted afterwards,
//! so checking "did I already rate this?" costs no network call once the
//! list is known. The remote store enforces one rating per visitor and model;
//! when it reports a conflict the cache is refreshed from it and the
//! submission is treated as already done.

use std::cell::RefCell;
use std::collections::HashSet;

use log::{error, info, warn};

use crate::cache::{KeyValueStore, LocalCache, keys};
use crate::error::{CacheError, GatewayError, RatingError};
use crate::gateway::RatingGateway;
use crate::identity::VisitorId;
use crate::mirror::{MirrorEntry, MirrorSink};
use crate::model::rating::{NewRating, Rating};

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Stored remotely; carries the rows the store returned.
    Inserted(Vec<Rating>),
    /// This visitor already rated the model; nothing was written.
    AlreadyRated,
    /// Another submission for the same model has not finished yet.
    InFlight,
}

pub struct RatingLedger<G, S, M> {
    gateway: G,
    cache: LocalCache<S>,
    mirror: M,
    visitor: VisitorId,
    in_flight: RefCell<HashSet<u32>>,
}

struct InFlightGuard<'a> {
    models: &'a RefCell<HashSet<u32>>,
    model_number: u32,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(models: &'a RefCell<HashSet<u32>>, model_number: u32) -> Option<Self> {
        if models.borrow_mut().insert(model_number) {
            Some(Self { models, model_number })
        } else {
            None
        }
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.models.borrow_mut().remove(&self.model_number);
    }
}

impl<G, S, M> RatingLedger<G, S, M>
where
    G: RatingGateway,
    S: KeyValueStore,
    M: MirrorSink,
{
    pub fn new(gateway: G, store: S, mirror: M, visitor: VisitorId) -> Self {
        Self {
            gateway,
            cache: LocalCache::new(store),
            mirror,
            visitor,
            in_flight: RefCell::new(HashSet::new()),
        }
    }

    pub fn visitor(&self) -> &VisitorId {
        &self.visitor
    }

    /// Cached ratings, or `None` when the list has not been loaded yet.
    pub fn cached_ratings(&self) -> Option<Vec<Rating>> {
        self.cache.get_json(keys::RATED_MODELS)
    }

    pub fn is_submitting(&self, model_number: u32) -> bool {
        self.in_flight.borrow().contains(&model_number)
    }

    async fn rated_list(&self) -> Result<Vec<Rating>, RatingError> {
        if let Some(cached) = self.cached_ratings() {
            return Ok(cached);
        }
        let fetched = self
            .gateway
            .ratings_for_visitor(self.visitor.as_str())
            .await
            .inspect_err(|e| error!("Could not load ratings for {}: {e}", self.visitor))?;
        self.cache.set_json(keys::RATED_MODELS, &fetched)?;
        Ok(fetched)
    }

    pub async fn has_rated(&self, model_number: u32) -> Result<bool, RatingError> {
        let rated = self.rated_list().await?;
        Ok(rated.iter().any(|r| r.model_number == model_number))
    }

    /// The rating this visitor left for `model_number`, if any.
    pub async fn rating_for(&self, model_number: u32) -> Result<Option<Rating>, RatingError> {
        let rated = self.rated_list().await?;
        Ok(rated.into_iter().find(|r| r.model_number == model_number))
    }

    pub async fn submit_rating(
        &self,
        model_number: u32,
        star_rating: u8,
        comments: Option<String>,
    ) -> Result<SubmitOutcome, RatingError> {
        let rating = NewRating::new(self.visitor.as_str(), model_number, star_rating, comments);
        rating.validate()?;

        let Some(_guard) = InFlightGuard::acquire(&self.in_flight, model_number) else {
            return Ok(SubmitOutcome::InFlight);
        };

        if self.has_rated(model_number).await? {
            info!("Model {model_number} already rated by {}", self.visitor);
            return Ok(SubmitOutcome::AlreadyRated);
        }

        match self.gateway.insert_rating(&rating).await {
            Ok(rows) => {
                if let Err(e) = self.remember(&rows, &rating) {
                    warn!("Rating for model {model_number} stored remotely but not cached: {e}");
                }
                self.mirror.dispatch(MirrorEntry::from(&rating));
                Ok(SubmitOutcome::Inserted(rows))
            }
            Err(GatewayError::Conflict) => {
                info!("Remote already holds a rating for model {model_number}; refreshing cache");
                self.refresh_after_conflict(&rating).await?;
                Ok(SubmitOutcome::AlreadyRated)
            }
            Err(e) => {
                error!("Submitting rating for model {model_number} failed: {e}");
                Err(e.into())
            }
        }
    }

    /// Stores the inserted rows, replacing any entry for the same model.
    fn remember(&self, rows: &[Rating], submitted: &NewRating) -> Result<(), CacheError> {
        let mut rated: Vec<Rating> = self.cached_ratings().unwrap_or_default();
        rated.retain(|r| r.model_number != submitted.model_number);
        match rows.iter().find(|r| r.model_number == submitted.model_number) {
            Some(row) => rated.push(row.clone()),
            None => rated.push(submitted.to_rating()),
        }
        self.cache.set_json(keys::RATED_MODELS, &rated)
    }

    async fn refresh_after_conflict(&self, submitted: &NewRating) -> Result<(), CacheError> {
        match self.gateway.ratings_for_visitor(self.visitor.as_str()).await {
            Ok(fetched) if fetched.iter().any(|r| r.model_number == submitted.model_number) => {
                self.cache.set_json(keys::RATED_MODELS, &fetched)
            }
            Ok(fetched) => {
                self.cache.set_json(keys::RATED_MODELS, &fetched)?;
                self.remember(&[], submitted)
            }
            Err(e) => {
                warn!("Refresh after conflict failed, recording rating locally: {e}");
                self.remember(&[], submitted)
            }
        }
    }

    /// Moves the cached ratings over to `adopted` and uses it from now on.
    pub fn rewrite_identity(&mut self, adopted: VisitorId) -> Result<(), CacheError> {
        if let Some(mut rated) = self.cached_ratings() {
            for rating in &mut rated {
                if rating.user_id == self.visitor.as_str() {
                    rating.user_id = adopted.as_str().to_string();
                }
            }
            self.cache.set_json(keys::RATED_MODELS, &rated)?;
        }
        self.visitor = adopted;
        Ok(())
    }

    /// Drops the cached list so the next check reloads it from the remote store.
    pub fn forget_identity_ratings(&self) {
        self.cache.remove(keys::RATED_MODELS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use crate::error::ValidationError;
    use std::cell::Cell;

    #[derive(Default)]
    struct ScriptedGateway {
        remote: RefCell<Vec<Rating>>,
        inserts: Cell<usize>,
        lookups: Cell<usize>,
        fail_lookups: Cell<bool>,
        conflict: Cell<bool>,
        fail_inserts: Cell<bool>,
    }

    impl RatingGateway for ScriptedGateway {
        async fn ratings_for_visitor(&self, user_id: &str) -> Result<Vec<Rating>, GatewayError> {
            self.lookups.set(self.lookups.get() + 1);
            if self.fail_lookups.get() {
                return Err(GatewayError::Network("offline".to_string()));
            }
            Ok(self
                .remote
                .borrow()
                .iter()
                .filter(|r| r.user_id == user_id)
                .cloned()
                .collect())
        }

        async fn insert_rating(&self, rating: &NewRating) -> Result<Vec<Rating>, GatewayError> {
            tokio::task::yield_now().await;
            self.inserts.set(self.inserts.get() + 1);
            if self.conflict.get() {
                return Err(GatewayError::Conflict);
            }
            if self.fail_inserts.get() {
                return Err(GatewayError::Status {
                    status: 503,
                    message: "unavailable".to_string(),
                });
            }
            let mut row = rating.to_rating();
            row.id = Some(self.remote.borrow().len() as i64 + 1);
            self.remote.borrow_mut().push(row.clone());
            Ok(vec![row])
        }
    }

    #[derive(Default)]
    struct RecordingMirror {
        sent: RefCell<Vec<MirrorEntry>>,
    }

    impl MirrorSink for RecordingMirror {
        fn dispatch(&self, entry: MirrorEntry) {
            self.sent.borrow_mut().push(entry);
        }
    }

    fn rating(user_id: &str, model_number: u32, star_rating: u8) -> Rating {
        Rating {
            id: None,
            user_id: user_id.to_string(),
            model_number,
            star_rating,
            comments: None,
            created_at: None,
        }
    }

    fn fixtures() -> (ScriptedGateway, MemoryStore, RecordingMirror) {
        Default::default()
    }

    fn ledger<'a>(
        gateway: &'a ScriptedGateway,
        store: &'a MemoryStore,
        mirror: &'a RecordingMirror,
    ) -> RatingLedger<&'a ScriptedGateway, &'a MemoryStore, &'a RecordingMirror> {
        RatingLedger::new(gateway, store, mirror, VisitorId::new("abc123"))
    }

    #[tokio::test]
    async fn second_submission_for_a_model_is_a_no_op() {
        let (gateway, store, mirror) = fixtures();
        let ledger = ledger(&gateway, &store, &mirror);

        let first = ledger.submit_rating(3, 5, Some("Beautiful".to_string())).await.unwrap();
        let second = ledger.submit_rating(3, 2, None).await.unwrap();

        assert!(matches!(first, SubmitOutcome::Inserted(ref rows) if rows.len() == 1));
        assert_eq!(second, SubmitOutcome::AlreadyRated);
        assert_eq!(gateway.inserts.get(), 1);
        assert_eq!(mirror.sent.borrow().len(), 1);
    }

    #[tokio::test]
    async fn submitted_rating_is_known_without_another_lookup() {
        let (gateway, store, mirror) = fixtures();
        let ledger = ledger(&gateway, &store, &mirror);

        let outcome = ledger.submit_rating(7, 5, None).await.unwrap();
        assert!(matches!(outcome, SubmitOutcome::Inserted(_)));
        let lookups = gateway.lookups.get();

        assert!(ledger.has_rated(7).await.unwrap());
        assert_eq!(gateway.lookups.get(), lookups);
    }

    /// Store whose writes can be switched off, like a full browser quota.
    #[derive(Default)]
    struct QuotaStore {
        inner: MemoryStore,
        full: Cell<bool>,
    }

    impl KeyValueStore for QuotaStore {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
            if self.full.get() {
                return Err(CacheError::Write {
                    key: key.to_string(),
                    reason: "quota exceeded".to_string(),
                });
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) {
            self.inner.remove(key)
        }
    }

    #[tokio::test]
    async fn remote_insert_counts_even_when_the_cache_is_full() {
        let (gateway, _, mirror) = fixtures();
        let store = QuotaStore::default();
        store.set(keys::RATED_MODELS, "[]").unwrap();
        store.full.set(true);
        let ledger = RatingLedger::new(&gateway, &store, &mirror, VisitorId::new("abc123"));

        let outcome = ledger.submit_rating(4, 3, None).await.unwrap();

        assert!(matches!(outcome, SubmitOutcome::Inserted(ref rows) if rows.len() == 1));
        assert_eq!(gateway.inserts.get(), 1);
        assert_eq!(mirror.sent.borrow().len(), 1);
    }

    #[tokio::test]
    async fn cached_rating_answers_without_a_remote_call() {
        let (gateway, store, mirror) = fixtures();
        LocalCache::new(&store)
            .set_json(keys::RATED_MODELS, &vec![rating("abc123", 7, 4)])
            .unwrap();
        let ledger = ledger(&gateway, &store, &mirror);

        assert!(ledger.has_rated(7).await.unwrap());
        assert!(!ledger.has_rated(8).await.unwrap());
        assert_eq!(gateway.lookups.get(), 0);
    }

    #[tokio::test]
    async fn empty_cached_list_counts_as_loaded() {
        let (gateway, store, mirror) = fixtures();
        store.set(keys::RATED_MODELS, "[]").unwrap();
        let ledger = ledger(&gateway, &store, &mirror);

        assert!(!ledger.has_rated(1).await.unwrap());
        assert_eq!(gateway.lookups.get(), 0);
    }

    #[tokio::test]
    async fn first_check_loads_the_visitors_ratings_once() {
        let gateway = ScriptedGateway::default();
        gateway.remote.borrow_mut().push(rating("abc123", 2, 3));
        gateway.remote.borrow_mut().push(rating("someone-else", 9, 5));
        let (_, store, mirror) = fixtures();
        let ledger = ledger(&gateway, &store, &mirror);

        assert!(ledger.has_rated(2).await.unwrap());
        assert!(!ledger.has_rated(9).await.unwrap());
        assert_eq!(gateway.lookups.get(), 1);
        assert_eq!(ledger.cached_ratings().map(|r| r.len()), Some(1));
    }

    #[tokio::test]
    async fn invalid_stars_are_rejected_before_any_io() {
        let (gateway, store, mirror) = fixtures();
        let ledger = ledger(&gateway, &store, &mirror);

        let err = ledger.submit_rating(3, 0, None).await.unwrap_err();
        assert!(matches!(err, RatingError::Invalid(ValidationError::StarRating(0))));
        assert_eq!(gateway.lookups.get(), 0);
        assert_eq!(gateway.inserts.get(), 0);
    }

    #[tokio::test]
    async fn lookup_failure_leaves_the_cache_unloaded() {
        let (gateway, store, mirror) = fixtures();
        gateway.fail_lookups.set(true);
        let ledger = ledger(&gateway, &store, &mirror);

        assert!(matches!(
            ledger.has_rated(4).await,
            Err(RatingError::Gateway(GatewayError::Network(_)))
        ));
        assert_eq!(ledger.cached_ratings(), None);

        gateway.fail_lookups.set(false);
        assert!(!ledger.has_rated(4).await.unwrap());
        assert_eq!(gateway.lookups.get(), 2);
    }

    #[tokio::test]
    async fn conflict_refreshes_from_remote_and_reports_already_rated() {
        let (gateway, store, mirror) = fixtures();
        let ledger = ledger(&gateway, &store, &mirror);
        assert!(!ledger.has_rated(5).await.unwrap());

        // Another tab stored a rating meanwhile.
        gateway.remote.borrow_mut().push(rating("abc123", 5, 1));
        gateway.conflict.set(true);

        let outcome = ledger.submit_rating(5, 4, None).await.unwrap();
        assert_eq!(outcome, SubmitOutcome::AlreadyRated);
        let cached = ledger.cached_ratings().unwrap();
        assert_eq!(cached, vec![rating("abc123", 5, 1)]);
        assert!(mirror.sent.borrow().is_empty());
    }

    #[tokio::test]
    async fn insert_failure_is_returned_and_not_cached() {
        let (gateway, store, mirror) = fixtures();
        gateway.fail_inserts.set(true);
        let ledger = ledger(&gateway, &store, &mirror);

        let err = ledger.submit_rating(6, 3, None).await.unwrap_err();
        assert!(matches!(err, RatingError::Gateway(GatewayError::Status { status: 503, .. })));
        assert!(!ledger.has_rated(6).await.unwrap());
        assert!(!ledger.is_submitting(6));
    }

    #[tokio::test]
    async fn overlapping_submissions_for_one_model_insert_once() {
        let (gateway, store, mirror) = fixtures();
        store.set(keys::RATED_MODELS, "[]").unwrap();
        let ledger = ledger(&gateway, &store, &mirror);

        let (a, b) = tokio::join!(ledger.submit_rating(8, 5, None), ledger.submit_rating(8, 5, None));

        assert!(matches!(a.unwrap(), SubmitOutcome::Inserted(_)));
        assert_eq!(b.unwrap(), SubmitOutcome::InFlight);
        assert_eq!(gateway.inserts.get(), 1);
        assert!(!ledger.is_submitting(8));
    }

    #[tokio::test]
    async fn adopted_identity_takes_over_cached_ratings() {
        let (gateway, store, mirror) = fixtures();
        LocalCache::new(&store)
            .set_json(keys::RATED_MODELS, &vec![rating("abc123", 7, 4)])
            .unwrap();
        let mut ledger = ledger(&gateway, &store, &mirror);

        ledger.rewrite_identity(VisitorId::new("f00d")).unwrap();

        assert_eq!(ledger.visitor().as_str(), "f00d");
        assert_eq!(ledger.cached_ratings().unwrap()[0].user_id, "f00d");
        assert!(ledger.has_rated(7).await.unwrap());

        ledger.forget_identity_ratings();
        assert_eq!(ledger.cached_ratings(), None);
    }
}
