// SPDX-License-Identifier: GPL-3.0-only

//! Publish flow for finalized sessions
//!
//! Publishing is the one awaited external call in the session's life. The
//! engine's busy signal goes up for the duration so re-entrant commands
//! cannot race the in-flight request; there is no cancellation for a
//! publish already underway.

use crate::backends::store::{PhotoId, PhotoStore, UserId};
use crate::errors::AppResult;
use crate::session::engine::SessionEngine;
use tracing::{info, warn};

/// Finalize and publish the session in one step
///
/// Validates and packages the session, raises the busy signal, and hands
/// the request to the persistence collaborator. On success the engine
/// resets to idle (the caller handles navigation); on failure the session
/// is left exactly as it was — still complete, shots intact — so the user
/// can retry.
pub async fn publish<S: PhotoStore>(
    engine: &mut SessionEngine,
    store: &mut S,
    title: &str,
    author: UserId,
    author_name: &str,
) -> AppResult<PhotoId> {
    let request = engine.finalize(title, author, author_name)?;
    engine.begin_publish()?;

    let shots = request.frames.len();
    match store.create_photo(request).await {
        Ok(id) => {
            info!(photo = %id, shots, "Publish succeeded");
            engine.mark_published();
            Ok(id)
        }
        Err(error) => {
            warn!(%error, "Publish failed, session kept");
            engine.abort_publish();
            Err(error.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::camera::TestPatternFeed;
    use crate::backends::store::MemoryStore;
    use crate::errors::{AppError, PersistenceError, ValidationError};
    use crate::session::state::SessionPhase;
    use crate::session::engine::TickOutcome;

    fn complete_engine() -> SessionEngine {
        let mut feed = TestPatternFeed::new(4, 4);
        let mut engine = SessionEngine::new();
        engine.start_sequence(true).unwrap();
        for _ in 0..crate::constants::SESSION_SHOTS {
            while engine.tick() != Some(TickOutcome::Capture) {}
            engine.capture_one(&mut feed).unwrap();
        }
        engine
    }

    #[tokio::test]
    async fn test_publish_resets_engine_and_stores_photo() {
        let mut engine = complete_engine();
        let mut store = MemoryStore::new();
        let author = UserId::new();

        let id = publish(&mut engine, &mut store, "Sunset", author, "ana")
            .await
            .unwrap();

        assert_eq!(engine.session().phase(), SessionPhase::Idle);
        assert_eq!(engine.session().shots_taken(), 0);
        assert!(!engine.is_busy());

        let photo = store.photo(id).unwrap();
        assert_eq!(photo.title, "Sunset");
        assert_eq!(photo.images.len(), 3);
        assert_eq!(photo.filters.len(), 3);
    }

    #[tokio::test]
    async fn test_empty_title_keeps_session_complete() {
        let mut engine = complete_engine();
        let mut store = MemoryStore::new();

        let result = publish(&mut engine, &mut store, "", UserId::new(), "ana").await;
        assert!(matches!(
            result,
            Err(AppError::Validation(ValidationError::EmptyTitle))
        ));
        assert_eq!(engine.session().phase(), SessionPhase::Complete);
        assert_eq!(store.photo_count(), 0);
    }

    /// A store that rejects every mutation
    struct DownStore;

    impl PhotoStore for DownStore {
        async fn fetch_reactions(
            &self,
            _photos: &[PhotoId],
        ) -> Result<Vec<crate::reactions::ReactionRecord>, PersistenceError> {
            Err(PersistenceError::Transport("backend down".into()))
        }
        async fn create_reaction(
            &mut self,
            _photo: PhotoId,
            _user: UserId,
            _kind: crate::reactions::ReactionKind,
        ) -> Result<crate::reactions::ReactionRecord, PersistenceError> {
            Err(PersistenceError::Transport("backend down".into()))
        }
        async fn replace_reaction_kind(
            &mut self,
            _id: crate::reactions::ReactionId,
            _kind: crate::reactions::ReactionKind,
        ) -> Result<(), PersistenceError> {
            Err(PersistenceError::Transport("backend down".into()))
        }
        async fn delete_reaction(
            &mut self,
            _id: crate::reactions::ReactionId,
        ) -> Result<(), PersistenceError> {
            Err(PersistenceError::Transport("backend down".into()))
        }
        async fn create_photo(
            &mut self,
            _request: crate::session::engine::PublishRequest,
        ) -> Result<PhotoId, PersistenceError> {
            Err(PersistenceError::Transport("backend down".into()))
        }
        async fn delete_photo(&mut self, _id: PhotoId) -> Result<(), PersistenceError> {
            Err(PersistenceError::Transport("backend down".into()))
        }
    }

    #[tokio::test]
    async fn test_failed_publish_leaves_session_intact() {
        let mut engine = complete_engine();
        let result = publish(&mut engine, &mut DownStore, "Sunset", UserId::new(), "ana").await;

        assert!(matches!(result, Err(AppError::Persistence(_))));
        // Session untouched so the user can retry
        assert_eq!(engine.session().phase(), SessionPhase::Complete);
        assert_eq!(engine.session().shots_taken(), 3);
        assert!(!engine.is_busy());
    }
}
