// SPDX-License-Identifier: MPL-2.0

//! Integration tests for the reaction toggle protocol

use photobooth::backends::camera::{CameraFeed, TestPatternFeed};
use photobooth::backends::store::{MemoryStore, PhotoStore, UserId};
use photobooth::errors::PersistenceError;
use photobooth::pipelines::publish::publish;
use photobooth::reactions::{
    ReactionAction, ReactionAggregate, ReactionKind, current_kind, submit_toggle,
};
use photobooth::session::engine::{SessionEngine, TickOutcome};
use photobooth::backends::store::PhotoId;

/// Publish one photo into a fresh store
async fn published_photo(store: &mut MemoryStore) -> PhotoId {
    let mut feed = TestPatternFeed::new(8, 8);
    let mut engine = SessionEngine::new();
    engine.start_sequence(feed.is_ready()).unwrap();
    while !engine.session().is_complete() {
        while engine.tick() != Some(TickOutcome::Capture) {}
        engine.capture_one(&mut feed).unwrap();
    }
    publish(&mut engine, store, "Sunset", UserId::new(), "ana")
        .await
        .unwrap()
}

#[tokio::test]
async fn test_toggle_lifecycle_against_store() {
    let mut store = MemoryStore::new();
    let photo = published_photo(&mut store).await;
    let viewer = UserId::new();

    // First click creates
    let action = submit_toggle(&mut store, viewer, photo, ReactionKind::Heart)
        .await
        .unwrap();
    assert!(matches!(action, ReactionAction::Create(ReactionKind::Heart)));
    assert_eq!(store.reaction_count(), 1);

    // Clicking a different kind switches the record in place
    let action = submit_toggle(&mut store, viewer, photo, ReactionKind::Sad)
        .await
        .unwrap();
    assert!(matches!(
        action,
        ReactionAction::Replace {
            kind: ReactionKind::Sad,
            ..
        }
    ));
    assert_eq!(store.reaction_count(), 1);

    let records = store.fetch_reactions(&[photo]).await.unwrap();
    assert_eq!(current_kind(viewer, photo, &records), Some(ReactionKind::Sad));

    // Clicking the current kind withdraws it
    let action = submit_toggle(&mut store, viewer, photo, ReactionKind::Sad)
        .await
        .unwrap();
    assert!(matches!(action, ReactionAction::Delete(_)));
    assert_eq!(store.reaction_count(), 0);
}

#[tokio::test]
async fn test_at_most_one_record_per_pair_after_any_action() {
    let mut store = MemoryStore::new();
    let photo = published_photo(&mut store).await;
    let viewer = UserId::new();

    for kind in [
        ReactionKind::Heart,
        ReactionKind::Cool,
        ReactionKind::Cool,
        ReactionKind::Wow,
        ReactionKind::Wow,
    ] {
        submit_toggle(&mut store, viewer, photo, kind).await.unwrap();
        let records = store.fetch_reactions(&[photo]).await.unwrap();
        let own = records
            .iter()
            .filter(|r| r.user == viewer && r.photo == photo)
            .count();
        assert!(own <= 1, "invariant broken: {} records for one pair", own);
    }
}

#[tokio::test]
async fn test_store_rejects_duplicate_create() {
    let mut store = MemoryStore::new();
    let photo = published_photo(&mut store).await;
    let viewer = UserId::new();

    store
        .create_reaction(photo, viewer, ReactionKind::Heart)
        .await
        .unwrap();

    // A second first-time create for the same pair (a concurrent-device
    // race) must be arbitrated by the store
    let result = store.create_reaction(photo, viewer, ReactionKind::Wow).await;
    assert_eq!(result.unwrap_err(), PersistenceError::Conflict);
}

#[tokio::test]
async fn test_aggregates_rederive_from_records() {
    let mut store = MemoryStore::new();
    let photo = published_photo(&mut store).await;
    let (a, b, c) = (UserId::new(), UserId::new(), UserId::new());

    submit_toggle(&mut store, a, photo, ReactionKind::Heart).await.unwrap();
    submit_toggle(&mut store, b, photo, ReactionKind::Heart).await.unwrap();
    submit_toggle(&mut store, c, photo, ReactionKind::Wow).await.unwrap();

    let records = store.fetch_reactions(&[photo]).await.unwrap();
    let aggregate = ReactionAggregate::for_photo(photo, &records);
    assert_eq!(aggregate.heart, 2);
    assert_eq!(aggregate.wow, 1);
    assert_eq!(aggregate.total(), 3);

    // One user withdraws; the next fetch tells the new truth
    submit_toggle(&mut store, a, photo, ReactionKind::Heart).await.unwrap();
    let records = store.fetch_reactions(&[photo]).await.unwrap();
    let aggregate = ReactionAggregate::for_photo(photo, &records);
    assert_eq!(aggregate.heart, 1);
    assert_eq!(aggregate.total(), 2);
}

#[tokio::test]
async fn test_deleting_photo_cascades_reactions() {
    let mut store = MemoryStore::new();
    let photo = published_photo(&mut store).await;

    submit_toggle(&mut store, UserId::new(), photo, ReactionKind::Cool)
        .await
        .unwrap();
    assert_eq!(store.reaction_count(), 1);

    store.delete_photo(photo).await.unwrap();
    assert_eq!(store.photo_count(), 0);
    assert_eq!(store.reaction_count(), 0);
}

#[tokio::test]
async fn test_reacting_to_deleted_photo_surfaces_not_found() {
    let mut store = MemoryStore::new();
    let photo = published_photo(&mut store).await;
    store.delete_photo(photo).await.unwrap();

    let result = submit_toggle(&mut store, UserId::new(), photo, ReactionKind::Heart).await;
    assert_eq!(result.unwrap_err(), PersistenceError::NotFound);
}
