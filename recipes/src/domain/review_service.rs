//! Review reads, aggregation, and submission for a recipe.
//!
//! The review screen asks for stats and the caller's own review on mount,
//! and after a submission re-fetches both. Reads fail soft; the submission
//! surfaces store failures. Ratings are not validated by the store, so a
//! review document that does not decode is skipped and logged rather than
//! hiding every other review of the recipe.

use std::sync::Arc;

use mockable::Clock;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::domain::ports::{Collection, DocumentStore, DocumentStoreError, encode_document};
use crate::domain::{
    Error, RecipeId, Review, ReviewDraft, ReviewId, ReviewStats, Session, UserId, compute_stats,
    find_user_review,
};

/// Foreign-key field on review documents.
pub(crate) const RECIPE_ID_FIELD: &str = "recipeId";
const USER_ID_FIELD: &str = "userId";
const ID_FIELD: &str = "id";

/// One recipe's review documents split by whether they decode.
#[derive(Debug, Default)]
struct LoadedReviews {
    reviews: Vec<Review>,
    unreadable: Vec<Value>,
}

impl LoadedReviews {
    /// Id of `user_id`'s undecodable review, so an edit overwrites it.
    fn unreadable_review_id(&self, user_id: &UserId) -> Option<ReviewId> {
        self.unreadable
            .iter()
            .filter(|document| {
                document.get(USER_ID_FIELD).and_then(Value::as_str) == Some(user_id.as_ref())
            })
            .find_map(|document| {
                document
                    .get(ID_FIELD)
                    .and_then(Value::as_str)
                    .and_then(|id| ReviewId::new(id).ok())
            })
    }
}

/// Everything the review widget renders for one recipe.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReviewPanel {
    /// Aggregate over `reviews`.
    pub stats: ReviewStats,
    /// Reviews for the recipe, newest first.
    pub reviews: Vec<Review>,
    /// The signed-in user's review, when there is one.
    pub own_review: Option<Review>,
}

/// Service implementing review reads and the create-or-edit submission.
#[derive(Clone)]
pub struct ReviewService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> ReviewService<S> {
    /// Create a new service.
    ///
    /// # Examples
    /// ```
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// # use recipes::domain::ReviewService;
    /// # use recipes::domain::ports::FixtureDocumentStore;
    /// let service = ReviewService::new(Arc::new(FixtureDocumentStore), Arc::new(DefaultClock));
    /// # let _ = service;
    /// ```
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }
}

impl<S> ReviewService<S>
where
    S: DocumentStore,
{
    /// Reviews for `recipe_id`, newest first.
    ///
    /// Returns an empty list when the store fails.
    pub async fn reviews_for_recipe(&self, recipe_id: &RecipeId) -> Vec<Review> {
        self.load_reviews_soft(recipe_id).await
    }

    /// Count and mean rating for `recipe_id`.
    ///
    /// Returns zero stats when the store fails.
    pub async fn review_stats(&self, recipe_id: &RecipeId) -> ReviewStats {
        compute_stats(&self.load_reviews_soft(recipe_id).await)
    }

    /// `user_id`'s review of `recipe_id`, if any.
    ///
    /// Returns `None` when the store fails.
    pub async fn user_review(&self, recipe_id: &RecipeId, user_id: &UserId) -> Option<Review> {
        let reviews = self.load_reviews_soft(recipe_id).await;
        find_user_review(&reviews, user_id).cloned()
    }

    /// Stats, reviews, and the session user's review from a single read.
    pub async fn review_panel(&self, recipe_id: &RecipeId, session: Option<&Session>) -> ReviewPanel {
        let reviews = self.load_reviews_soft(recipe_id).await;
        let own_review = session
            .and_then(|session| find_user_review(&reviews, session.user_id()))
            .cloned();
        ReviewPanel {
            stats: compute_stats(&reviews),
            reviews,
            own_review,
        }
    }

    /// Create the session user's review of `recipe_id`, or replace it when
    /// one already exists, then return the refreshed panel.
    ///
    /// An existing review keeps its id and creation time. A new review gets a
    /// random id and the current clock time. When the user's stored review
    /// cannot be decoded, its id is reused so the submission replaces it.
    ///
    /// # Errors
    ///
    /// Returns [`Error`] with `StoreUnavailable` when the existing-review
    /// lookup or the write fails, or `InternalError` when the new document
    /// cannot be serialised.
    pub async fn submit_review(
        &self,
        session: &Session,
        recipe_id: &RecipeId,
        draft: ReviewDraft,
    ) -> Result<ReviewPanel, Error> {
        let existing = self
            .load_reviews(recipe_id)
            .await
            .map_err(map_store_error)?;
        let previous = find_user_review(&existing.reviews, session.user_id());
        let is_edit = previous.is_some();
        let (id, created_at) = match previous {
            Some(review) => (review.id.clone(), review.created_at),
            None => (
                existing
                    .unreadable_review_id(session.user_id())
                    .unwrap_or_else(ReviewId::random),
                self.clock.utc(),
            ),
        };

        let review = Review {
            id,
            recipe_id: recipe_id.clone(),
            user_id: session.user_id().clone(),
            rating: draft.rating(),
            comment: draft.comment().to_owned(),
            created_at,
        };
        let document = encode_document(&review).map_err(map_store_error)?;
        self.store
            .upsert_by_id(Collection::Reviews, review.id.as_ref(), document)
            .await
            .map_err(map_store_error)?;
        info!(
            recipe_id = %recipe_id,
            review_id = %review.id,
            is_edit,
            "review saved"
        );

        Ok(self.review_panel(recipe_id, Some(session)).await)
    }

    async fn load_reviews_soft(&self, recipe_id: &RecipeId) -> Vec<Review> {
        match self.load_reviews(recipe_id).await {
            Ok(loaded) => loaded.reviews,
            Err(error) => {
                warn!(recipe_id = %recipe_id, error = %error, "failed to load reviews");
                Vec::new()
            }
        }
    }

    async fn load_reviews(&self, recipe_id: &RecipeId) -> Result<LoadedReviews, DocumentStoreError> {
        let documents = self
            .store
            .list_by_equality(
                Collection::Reviews,
                RECIPE_ID_FIELD,
                &Value::String(recipe_id.to_string()),
            )
            .await?;
        let mut loaded = LoadedReviews::default();
        for document in documents {
            let value = Value::Object(document);
            match Review::deserialize(&value) {
                Ok(review) => loaded.reviews.push(review),
                Err(error) => {
                    warn!(
                        recipe_id = %recipe_id,
                        review_id = value.get(ID_FIELD).and_then(serde_json::Value::as_str).unwrap_or("?"),
                        error = %error,
                        "skipping undecodable review"
                    );
                    loaded.unreadable.push(value);
                }
            }
        }
        loaded.reviews.sort_by(|left, right| {
            right
                .created_at
                .cmp(&left.created_at)
                .then_with(|| left.id.cmp(&right.id))
        });
        Ok(loaded)
    }
}

fn map_store_error(error: DocumentStoreError) -> Error {
    match error {
        DocumentStoreError::Unavailable { message } => {
            Error::store_unavailable(format!("document store unavailable: {message}"))
        }
        DocumentStoreError::Decode { message } => {
            Error::internal(format!("review document could not be processed: {message}"))
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{Document, MockDocumentStore};
    use chrono::{DateTime, Local, TimeZone, Utc};
    use rstest::{fixture, rstest};
    use serde_json::json;

    struct FixtureClock(DateTime<Utc>);

    impl Clock for FixtureClock {
        fn local(&self) -> DateTime<Local> {
            self.0.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 4, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[fixture]
    fn session() -> Session {
        Session::new(UserId::new("u123").expect("user id"), "cook@example.com")
    }

    #[fixture]
    fn recipe_id() -> RecipeId {
        RecipeId::new("pho-bo").expect("recipe id")
    }

    fn review_document(id: &str, user: &str, rating: u8, created_at: &str) -> Document {
        encode_document(&json!({
            "id": id,
            "recipeId": "pho-bo",
            "userId": user,
            "rating": rating,
            "comment": format!("comment {id}"),
            "createdAt": created_at,
        }))
        .expect("review document")
    }

    fn service(store: MockDocumentStore) -> ReviewService<MockDocumentStore> {
        ReviewService::new(Arc::new(store), Arc::new(FixtureClock(now())))
    }

    #[rstest]
    #[tokio::test]
    async fn reviews_are_listed_newest_first(recipe_id: RecipeId) {
        let mut store = MockDocumentStore::new();
        store
            .expect_list_by_equality()
            .withf(|collection, field, value| {
                *collection == Collection::Reviews
                    && field == RECIPE_ID_FIELD
                    && *value == json!("pho-bo")
            })
            .returning(|_, _, _| {
                Ok(vec![
                    review_document("old", "u1", 3, "2026-01-01T00:00:00Z"),
                    review_document("new", "u2", 5, "2026-03-01T00:00:00Z"),
                ])
            });

        let reviews = service(store).reviews_for_recipe(&recipe_id).await;
        let ids: Vec<&str> = reviews.iter().map(|r| r.id.as_ref()).collect();
        assert_eq!(ids, vec!["new", "old"]);
    }

    #[rstest]
    #[tokio::test]
    async fn stats_fail_soft_to_zero(recipe_id: RecipeId) {
        let mut store = MockDocumentStore::new();
        store
            .expect_list_by_equality()
            .returning(|_, _, _| Err(DocumentStoreError::unavailable("offline")));

        let stats = service(store).review_stats(&recipe_id).await;
        assert_eq!(stats, ReviewStats::default());
    }

    #[rstest]
    #[tokio::test]
    async fn out_of_range_rating_is_skipped_not_fatal(recipe_id: RecipeId) {
        let mut store = MockDocumentStore::new();
        store.expect_list_by_equality().returning(|_, _, _| {
            Ok(vec![
                review_document("a", "u1", 5, "2026-01-01T00:00:00Z"),
                review_document("b", "u2", 0, "2026-01-02T00:00:00Z"),
            ])
        });

        let service = service(store);
        let stats = service.review_stats(&recipe_id).await;
        assert_eq!(stats.total_reviews, 1);
        assert!((stats.average_rating - 5.0).abs() < f64::EPSILON);
        let reviews = service.reviews_for_recipe(&recipe_id).await;
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].id.as_ref(), "a");
    }

    #[rstest]
    #[tokio::test]
    async fn unreadable_neighbour_does_not_block_new_review(recipe_id: RecipeId, session: Session) {
        let mut store = MockDocumentStore::new();
        let mut reads = 0;
        store
            .expect_list_by_equality()
            .times(2)
            .returning(move |_, _, _| {
                reads += 1;
                let mut documents = vec![
                    review_document("a", "u1", 5, "2026-01-01T00:00:00Z"),
                    review_document("b", "u2", 0, "2026-01-02T00:00:00Z"),
                ];
                if reads == 2 {
                    documents.push(review_document("c", "u123", 3, "2026-05-04T12:00:00Z"));
                }
                Ok(documents)
            });
        store
            .expect_upsert_by_id()
            .withf(|_, id, _| id != "a" && id != "b")
            .times(1)
            .returning(|_, _, _| Ok(()));

        let draft = ReviewDraft::try_new(3, "").expect("draft");
        let panel = service(store)
            .submit_review(&session, &recipe_id, draft)
            .await
            .expect("submission succeeds");
        assert_eq!(panel.stats.total_reviews, 2);
        assert!((panel.stats.average_rating - 4.0).abs() < f64::EPSILON);
        assert!(panel.own_review.is_some());
    }

    #[rstest]
    #[tokio::test]
    async fn unreadable_own_review_is_overwritten_in_place(recipe_id: RecipeId, session: Session) {
        let mut store = MockDocumentStore::new();
        store
            .expect_list_by_equality()
            .returning(|_, _, _| Ok(vec![review_document("mine", "u123", 9, "2026-01-01T00:00:00Z")]));
        store
            .expect_upsert_by_id()
            .withf(|_, id, document| id == "mine" && document.get("rating") == Some(&json!(4)))
            .times(1)
            .returning(|_, _, _| Ok(()));

        let draft = ReviewDraft::try_new(4, "Fixed").expect("draft");
        service(store)
            .submit_review(&session, &recipe_id, draft)
            .await
            .expect("submission succeeds");
    }

    #[rstest]
    #[tokio::test]
    async fn panel_includes_own_review(recipe_id: RecipeId, session: Session) {
        let mut store = MockDocumentStore::new();
        store.expect_list_by_equality().times(1).returning(|_, _, _| {
            Ok(vec![
                review_document("a", "u999", 2, "2026-01-01T00:00:00Z"),
                review_document("b", "u123", 4, "2026-01-02T00:00:00Z"),
            ])
        });

        let panel = service(store).review_panel(&recipe_id, Some(&session)).await;
        assert_eq!(panel.stats.total_reviews, 2);
        assert!((panel.stats.average_rating - 3.0).abs() < f64::EPSILON);
        assert_eq!(
            panel.own_review.map(|review| review.id.to_string()),
            Some("b".to_owned())
        );
    }

    #[rstest]
    #[tokio::test]
    async fn new_review_gets_fresh_id_and_clock_time(recipe_id: RecipeId, session: Session) {
        let mut store = MockDocumentStore::new();
        let mut reads = 0;
        store
            .expect_list_by_equality()
            .times(2)
            .returning(move |_, _, _| {
                reads += 1;
                if reads == 1 {
                    return Ok(Vec::new());
                }
                Ok(vec![review_document(
                    "fresh",
                    "u123",
                    5,
                    "2026-05-04T12:00:00Z",
                )])
            });
        store
            .expect_upsert_by_id()
            .withf(|collection, id, document| {
                *collection == Collection::Reviews
                    && !id.is_empty()
                    && document.get("id") == Some(&json!(id))
                    && document.get("userId") == Some(&json!("u123"))
                    && document.get("recipeId") == Some(&json!("pho-bo"))
                    && document.get("rating") == Some(&json!(5))
                    && document.get("comment") == Some(&json!("Rich broth"))
                    && document.get("createdAt") == Some(&json!("2026-05-04T12:00:00Z"))
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let draft = ReviewDraft::try_new(5, "  Rich broth ").expect("draft");
        let panel = service(store)
            .submit_review(&session, &recipe_id, draft)
            .await
            .expect("submit succeeds");

        assert_eq!(panel.stats.total_reviews, 1);
        assert!(panel.own_review.is_some());
    }

    #[rstest]
    #[tokio::test]
    async fn editing_reuses_existing_id_and_creation_time(recipe_id: RecipeId, session: Session) {
        let mut store = MockDocumentStore::new();
        let mut reads = 0;
        store
            .expect_list_by_equality()
            .times(2)
            .returning(move |_, _, _| {
                reads += 1;
                let rating = if reads == 1 { 2 } else { 4 };
                Ok(vec![review_document(
                    "rev-1",
                    "u123",
                    rating,
                    "2026-01-01T08:00:00Z",
                )])
            });
        store
            .expect_upsert_by_id()
            .withf(|_, id, document| {
                id == "rev-1"
                    && document.get("rating") == Some(&json!(4))
                    && document.get("createdAt") == Some(&json!("2026-01-01T08:00:00Z"))
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let draft = ReviewDraft::try_new(4, "Better second time").expect("draft");
        let panel = service(store)
            .submit_review(&session, &recipe_id, draft)
            .await
            .expect("submit succeeds");
        assert_eq!(panel.reviews.len(), 1);
        assert_eq!(panel.own_review.map(|review| review.rating.value()), Some(4));
    }

    #[rstest]
    #[tokio::test]
    async fn failed_lookup_aborts_submission(recipe_id: RecipeId, session: Session) {
        let mut store = MockDocumentStore::new();
        store
            .expect_list_by_equality()
            .returning(|_, _, _| Err(DocumentStoreError::unavailable("offline")));
        store.expect_upsert_by_id().never();

        let draft = ReviewDraft::try_new(3, "").expect("draft");
        let err = service(store)
            .submit_review(&session, &recipe_id, draft)
            .await
            .expect_err("lookup failure must abort");
        assert_eq!(err.code(), ErrorCode::StoreUnavailable);
    }

    #[rstest]
    #[tokio::test]
    async fn failed_write_surfaces_store_unavailable(recipe_id: RecipeId, session: Session) {
        let mut store = MockDocumentStore::new();
        store
            .expect_list_by_equality()
            .returning(|_, _, _| Ok(Vec::new()));
        store
            .expect_upsert_by_id()
            .returning(|_, _, _| Err(DocumentStoreError::unavailable("write timeout")));

        let draft = ReviewDraft::try_new(3, "").expect("draft");
        let err = service(store)
            .submit_review(&session, &recipe_id, draft)
            .await
            .expect_err("write failure must surface");
        assert_eq!(err.code(), ErrorCode::StoreUnavailable);
    }
}
