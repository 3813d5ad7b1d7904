use super::repository::{Like, LikeStore, StoreError};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LikeState {
    Liked,
    Unliked,
}

impl LikeState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Liked => "liked",
            Self::Unliked => "unliked",
        }
    }
}

/// Outcome of a toggle. `Applied` means this call performed the transition;
/// `LostRace` means a concurrent toggle got there first and the store already
/// holds the reported state. Either way the state carried is authoritative as
/// of this call's storage operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleOutcome {
    Applied(LikeState),
    LostRace(LikeState),
}

impl ToggleOutcome {
    pub fn state(&self) -> LikeState {
        match self {
            Self::Applied(state) | Self::LostRace(state) => *state,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LikeError {
    #[error("user id must not be empty")]
    EmptyUserId,
    #[error("article id must not be the nil uuid")]
    NilArticleId,
    #[error("storage failure")]
    Storage(#[source] StoreError),
}

/// The like-toggle core. Correctness under concurrent toggles rests entirely
/// on the store's uniqueness constraint over (article_id, user_id); no lock
/// is held here, so the check-then-act window is real and both of its race
/// outcomes are absorbed rather than surfaced as failures.
#[derive(Clone)]
pub struct LikeService {
    store: Arc<dyn LikeStore>,
}

impl LikeService {
    pub fn new(store: Arc<dyn LikeStore>) -> Self {
        Self { store }
    }

    fn validate_pair(article_id: Uuid, user_id: &str) -> Result<(), LikeError> {
        if user_id.is_empty() {
            return Err(LikeError::EmptyUserId);
        }
        if article_id.is_nil() {
            return Err(LikeError::NilArticleId);
        }
        Ok(())
    }

    pub async fn toggle(
        &self,
        article_id: Uuid,
        user_id: &str,
    ) -> Result<ToggleOutcome, LikeError> {
        Self::validate_pair(article_id, user_id)?;

        match self
            .store
            .find(article_id, user_id)
            .await
            .map_err(LikeError::Storage)?
        {
            Some(like) => {
                let removed = self.store.delete(like.id).await.map_err(LikeError::Storage)?;
                if removed {
                    Ok(ToggleOutcome::Applied(LikeState::Unliked))
                } else {
                    tracing::warn!(
                        "Concurrent toggle already removed like for article {} by user {}",
                        article_id,
                        user_id
                    );
                    Ok(ToggleOutcome::LostRace(LikeState::Unliked))
                }
            }
            None => match self
                .store
                .insert(Like::new(article_id, user_id.to_string()))
                .await
            {
                Ok(()) => Ok(ToggleOutcome::Applied(LikeState::Liked)),
                Err(StoreError::UniqueViolation) => {
                    tracing::warn!(
                        "Concurrent toggle already inserted like for article {} by user {}",
                        article_id,
                        user_id
                    );
                    Ok(ToggleOutcome::LostRace(LikeState::Liked))
                }
                Err(err) => Err(LikeError::Storage(err)),
            },
        }
    }

    /// Removes every like on an article. Returns false when there was nothing
    /// to delete; that case issues no delete against the store.
    pub async fn delete_for_article(&self, article_id: Uuid) -> Result<bool, LikeError> {
        if article_id.is_nil() {
            return Err(LikeError::NilArticleId);
        }
        let likes = self
            .store
            .list_for_article(article_id)
            .await
            .map_err(LikeError::Storage)?;
        self.delete_all(likes).await
    }

    pub async fn delete_for_user(&self, user_id: &str) -> Result<bool, LikeError> {
        if user_id.is_empty() {
            return Err(LikeError::EmptyUserId);
        }
        let likes = self
            .store
            .list_for_user(user_id)
            .await
            .map_err(LikeError::Storage)?;
        self.delete_all(likes).await
    }

    async fn delete_all(&self, likes: Vec<Like>) -> Result<bool, LikeError> {
        if likes.is_empty() {
            return Ok(false);
        }
        let ids = likes.into_iter().map(|like| like.id).collect();
        self.store
            .delete_batch(ids)
            .await
            .map_err(LikeError::Storage)?;
        Ok(true)
    }

    pub async fn count_for_article(&self, article_id: Uuid) -> Result<i64, LikeError> {
        if article_id.is_nil() {
            return Err(LikeError::NilArticleId);
        }
        self.store
            .count_for_article(article_id)
            .await
            .map_err(LikeError::Storage)
    }

    pub async fn state_for(&self, article_id: Uuid, user_id: &str) -> Result<LikeState, LikeError> {
        Self::validate_pair(article_id, user_id)?;
        let found = self
            .store
            .find(article_id, user_id)
            .await
            .map_err(LikeError::Storage)?;
        Ok(match found {
            Some(_) => LikeState::Liked,
            None => LikeState::Unliked,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::like::repository::MemoryLikeStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Delegates to a memory store while counting every call, so tests can
    /// assert that invalid input never reaches the store.
    #[derive(Default)]
    struct RecordingStore {
        inner: MemoryLikeStore,
        calls: AtomicUsize,
    }

    impl RecordingStore {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LikeStore for RecordingStore {
        async fn find(&self, article_id: Uuid, user_id: &str) -> Result<Option<Like>, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.find(article_id, user_id).await
        }

        async fn insert(&self, like: Like) -> Result<(), StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.insert(like).await
        }

        async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.delete(id).await
        }

        async fn list_for_article(&self, article_id: Uuid) -> Result<Vec<Like>, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.list_for_article(article_id).await
        }

        async fn list_for_user(&self, user_id: &str) -> Result<Vec<Like>, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.list_for_user(user_id).await
        }

        async fn delete_batch(&self, ids: Vec<Uuid>) -> Result<u64, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.delete_batch(ids).await
        }

        async fn count_for_article(&self, article_id: Uuid) -> Result<i64, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.count_for_article(article_id).await
        }
    }

    /// Counts batched deletes separately so the bulk-deletion empty case can
    /// assert that no delete was issued at all.
    #[derive(Default)]
    struct BatchCountingStore {
        inner: MemoryLikeStore,
        batch_deletes: AtomicUsize,
    }

    #[async_trait]
    impl LikeStore for BatchCountingStore {
        async fn find(&self, article_id: Uuid, user_id: &str) -> Result<Option<Like>, StoreError> {
            self.inner.find(article_id, user_id).await
        }

        async fn insert(&self, like: Like) -> Result<(), StoreError> {
            self.inner.insert(like).await
        }

        async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
            self.inner.delete(id).await
        }

        async fn list_for_article(&self, article_id: Uuid) -> Result<Vec<Like>, StoreError> {
            self.inner.list_for_article(article_id).await
        }

        async fn list_for_user(&self, user_id: &str) -> Result<Vec<Like>, StoreError> {
            self.inner.list_for_user(user_id).await
        }

        async fn delete_batch(&self, ids: Vec<Uuid>) -> Result<u64, StoreError> {
            self.batch_deletes.fetch_add(1, Ordering::SeqCst);
            self.inner.delete_batch(ids).await
        }

        async fn count_for_article(&self, article_id: Uuid) -> Result<i64, StoreError> {
            self.inner.count_for_article(article_id).await
        }
    }

    /// Pretends the pair is absent while the backing store already holds it,
    /// reproducing a toggle that loses the insert race.
    struct StaleReadStore {
        inner: MemoryLikeStore,
    }

    #[async_trait]
    impl LikeStore for StaleReadStore {
        async fn find(&self, _: Uuid, _: &str) -> Result<Option<Like>, StoreError> {
            Ok(None)
        }

        async fn insert(&self, like: Like) -> Result<(), StoreError> {
            self.inner.insert(like).await
        }

        async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
            self.inner.delete(id).await
        }

        async fn list_for_article(&self, article_id: Uuid) -> Result<Vec<Like>, StoreError> {
            self.inner.list_for_article(article_id).await
        }

        async fn list_for_user(&self, user_id: &str) -> Result<Vec<Like>, StoreError> {
            self.inner.list_for_user(user_id).await
        }

        async fn delete_batch(&self, ids: Vec<Uuid>) -> Result<u64, StoreError> {
            self.inner.delete_batch(ids).await
        }

        async fn count_for_article(&self, article_id: Uuid) -> Result<i64, StoreError> {
            self.inner.count_for_article(article_id).await
        }
    }

    /// Reports a like that the backing store no longer holds, reproducing a
    /// toggle that loses the delete race.
    struct GhostReadStore {
        inner: MemoryLikeStore,
    }

    #[async_trait]
    impl LikeStore for GhostReadStore {
        async fn find(&self, article_id: Uuid, user_id: &str) -> Result<Option<Like>, StoreError> {
            Ok(Some(Like::new(article_id, user_id.to_string())))
        }

        async fn insert(&self, like: Like) -> Result<(), StoreError> {
            self.inner.insert(like).await
        }

        async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
            self.inner.delete(id).await
        }

        async fn list_for_article(&self, article_id: Uuid) -> Result<Vec<Like>, StoreError> {
            self.inner.list_for_article(article_id).await
        }

        async fn list_for_user(&self, user_id: &str) -> Result<Vec<Like>, StoreError> {
            self.inner.list_for_user(user_id).await
        }

        async fn delete_batch(&self, ids: Vec<Uuid>) -> Result<u64, StoreError> {
            self.inner.delete_batch(ids).await
        }

        async fn count_for_article(&self, article_id: Uuid) -> Result<i64, StoreError> {
            self.inner.count_for_article(article_id).await
        }
    }

    enum FailOn {
        Find,
        Insert,
        Delete,
    }

    struct FailingStore {
        fail_on: FailOn,
    }

    #[async_trait]
    impl LikeStore for FailingStore {
        async fn find(&self, article_id: Uuid, user_id: &str) -> Result<Option<Like>, StoreError> {
            match self.fail_on {
                FailOn::Find => Err(StoreError::Unexpected),
                // No row, so the toggle goes down the insert path.
                FailOn::Insert => Ok(None),
                // A row, so the toggle goes down the delete path.
                FailOn::Delete => Ok(Some(Like::new(article_id, user_id.to_string()))),
            }
        }

        async fn insert(&self, _: Like) -> Result<(), StoreError> {
            match self.fail_on {
                FailOn::Insert => Err(StoreError::Unexpected),
                _ => Ok(()),
            }
        }

        async fn delete(&self, _: Uuid) -> Result<bool, StoreError> {
            match self.fail_on {
                FailOn::Delete => Err(StoreError::Unexpected),
                _ => Ok(true),
            }
        }

        async fn list_for_article(&self, _: Uuid) -> Result<Vec<Like>, StoreError> {
            Err(StoreError::Unexpected)
        }

        async fn list_for_user(&self, _: &str) -> Result<Vec<Like>, StoreError> {
            Err(StoreError::Unexpected)
        }

        async fn delete_batch(&self, _: Vec<Uuid>) -> Result<u64, StoreError> {
            Err(StoreError::Unexpected)
        }

        async fn count_for_article(&self, _: Uuid) -> Result<i64, StoreError> {
            Err(StoreError::Unexpected)
        }
    }

    #[tokio::test]
    async fn rejects_empty_user_id_without_touching_the_store() {
        let store = Arc::new(RecordingStore::default());
        let service = LikeService::new(store.clone());

        let result = service.toggle(Uuid::new_v4(), "").await;

        assert!(matches!(result, Err(LikeError::EmptyUserId)));
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn rejects_nil_article_id_without_touching_the_store() {
        let store = Arc::new(RecordingStore::default());
        let service = LikeService::new(store.clone());

        let result = service.toggle(Uuid::nil(), "user-1").await;

        assert!(matches!(result, Err(LikeError::NilArticleId)));
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn rejects_invalid_ids_on_bulk_deletes_and_reads() {
        let store = Arc::new(RecordingStore::default());
        let service = LikeService::new(store.clone());

        assert!(matches!(
            service.delete_for_article(Uuid::nil()).await,
            Err(LikeError::NilArticleId)
        ));
        assert!(matches!(
            service.delete_for_user("").await,
            Err(LikeError::EmptyUserId)
        ));
        assert!(matches!(
            service.count_for_article(Uuid::nil()).await,
            Err(LikeError::NilArticleId)
        ));
        assert!(matches!(
            service.state_for(Uuid::new_v4(), "").await,
            Err(LikeError::EmptyUserId)
        ));
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn sequential_toggles_alternate_and_keep_at_most_one_row() {
        let store = Arc::new(MemoryLikeStore::new());
        let service = LikeService::new(store.clone());
        let article = Uuid::new_v4();

        let first = service.toggle(article, "user-1").await.unwrap();
        assert_eq!(first, ToggleOutcome::Applied(LikeState::Liked));
        assert_eq!(service.count_for_article(article).await.unwrap(), 1);

        let second = service.toggle(article, "user-1").await.unwrap();
        assert_eq!(second, ToggleOutcome::Applied(LikeState::Unliked));
        assert_eq!(service.count_for_article(article).await.unwrap(), 0);

        let third = service.toggle(article, "user-1").await.unwrap();
        assert_eq!(third, ToggleOutcome::Applied(LikeState::Liked));
        assert_eq!(service.count_for_article(article).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn absorbs_a_lost_insert_race() {
        let inner = MemoryLikeStore::new();
        let article = Uuid::new_v4();
        inner
            .insert(Like::new(article, "user-1".to_string()))
            .await
            .unwrap();

        let store = Arc::new(StaleReadStore { inner });
        let service = LikeService::new(store.clone());

        let outcome = service.toggle(article, "user-1").await.unwrap();

        assert_eq!(outcome, ToggleOutcome::LostRace(LikeState::Liked));
        assert_eq!(outcome.state(), LikeState::Liked);
        assert_eq!(store.count_for_article(article).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn absorbs_a_lost_delete_race() {
        let store = Arc::new(GhostReadStore {
            inner: MemoryLikeStore::new(),
        });
        let service = LikeService::new(store.clone());
        let article = Uuid::new_v4();

        let outcome = service.toggle(article, "user-1").await.unwrap();

        assert_eq!(outcome, ToggleOutcome::LostRace(LikeState::Unliked));
        assert_eq!(store.count_for_article(article).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn propagates_unexpected_store_failures() {
        for fail_on in [FailOn::Find, FailOn::Insert, FailOn::Delete] {
            let find_fails = matches!(fail_on, FailOn::Find);
            let store = Arc::new(FailingStore { fail_on });
            let service = LikeService::new(store);

            let result = service.toggle(Uuid::new_v4(), "user-1").await;
            assert!(matches!(result, Err(LikeError::Storage(_))));

            if find_fails {
                let result = service.state_for(Uuid::new_v4(), "user-1").await;
                assert!(matches!(result, Err(LikeError::Storage(_))));
            }
        }
    }

    #[tokio::test]
    async fn bulk_delete_on_empty_set_is_a_no_op() {
        let store = Arc::new(BatchCountingStore::default());
        let service = LikeService::new(store.clone());

        let deleted = service.delete_for_article(Uuid::new_v4()).await.unwrap();

        assert!(!deleted);
        assert_eq!(store.batch_deletes.load(Ordering::SeqCst), 0);

        let deleted = service.delete_for_user("user-1").await.unwrap();

        assert!(!deleted);
        assert_eq!(store.batch_deletes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn bulk_delete_removes_only_the_matching_article() {
        let store = Arc::new(MemoryLikeStore::new());
        let service = LikeService::new(store.clone());
        let article_a = Uuid::new_v4();
        let article_b = Uuid::new_v4();

        service.toggle(article_a, "user-1").await.unwrap();
        service.toggle(article_a, "user-2").await.unwrap();
        service.toggle(article_b, "user-1").await.unwrap();

        let deleted = service.delete_for_article(article_a).await.unwrap();

        assert!(deleted);
        assert_eq!(service.count_for_article(article_a).await.unwrap(), 0);
        assert_eq!(service.count_for_article(article_b).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn bulk_delete_removes_only_the_matching_user() {
        let store = Arc::new(MemoryLikeStore::new());
        let service = LikeService::new(store.clone());
        let article_a = Uuid::new_v4();
        let article_b = Uuid::new_v4();

        service.toggle(article_a, "user-1").await.unwrap();
        service.toggle(article_b, "user-1").await.unwrap();
        service.toggle(article_a, "user-2").await.unwrap();

        let deleted = service.delete_for_user("user-1").await.unwrap();

        assert!(deleted);
        assert_eq!(
            store.list_for_user("user-1").await.unwrap().len(),
            0
        );
        assert_eq!(service.count_for_article(article_a).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn state_and_count_reflect_toggles() {
        let store = Arc::new(MemoryLikeStore::new());
        let service = LikeService::new(store);
        let article = Uuid::new_v4();

        assert_eq!(
            service.state_for(article, "user-1").await.unwrap(),
            LikeState::Unliked
        );

        service.toggle(article, "user-1").await.unwrap();
        service.toggle(article, "user-2").await.unwrap();

        assert_eq!(
            service.state_for(article, "user-1").await.unwrap(),
            LikeState::Liked
        );
        assert_eq!(service.count_for_article(article).await.unwrap(), 2);
    }
}
