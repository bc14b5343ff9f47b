// SPDX-License-Identifier: GPL-3.0-only

//! Persistence collaborator
//!
//! All backend calls are request/response and fail with a
//! [`PersistenceError`] that is surfaced to the user; the caller's local
//! state is left as it was before the call. The [`MemoryStore`] stands in
//! for a real backend in the CLI demo and the tests, and enforces the
//! one-reaction-per-(photo, user) uniqueness guarantee the protocol
//! depends on.

use crate::backends::camera::RawFrame;
use crate::errors::PersistenceError;
use crate::reactions::{ReactionId, ReactionKind, ReactionRecord};
use crate::session::PublishRequest;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info};
use uuid::Uuid;

/// Identifier of one published photo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhotoId(pub Uuid);

impl PhotoId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PhotoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of one user, supplied by the auth collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The persistence collaborator the core publishes to and reads from
///
/// Implementations must enforce uniqueness of (photo, user) reaction
/// pairs: concurrent first-time creates from the same actor are a race the
/// protocol cannot arbitrate client-side, so `create_reaction` has to
/// reject the duplicate with [`PersistenceError::Conflict`].
pub trait PhotoStore {
    /// Fetch all reaction records for a set of photos in one atomic read
    async fn fetch_reactions(
        &self,
        photos: &[PhotoId],
    ) -> Result<Vec<ReactionRecord>, PersistenceError>;

    /// Create a reaction record for a (photo, user) pair
    async fn create_reaction(
        &mut self,
        photo: PhotoId,
        user: UserId,
        kind: ReactionKind,
    ) -> Result<ReactionRecord, PersistenceError>;

    /// Switch an existing record to a different kind, in place
    async fn replace_reaction_kind(
        &mut self,
        id: ReactionId,
        kind: ReactionKind,
    ) -> Result<(), PersistenceError>;

    /// Delete a reaction record
    async fn delete_reaction(&mut self, id: ReactionId) -> Result<(), PersistenceError>;

    /// Store a finalized session as a published photo
    async fn create_photo(&mut self, request: PublishRequest)
    -> Result<PhotoId, PersistenceError>;

    /// Delete a published photo and everything hanging off it
    async fn delete_photo(&mut self, id: PhotoId) -> Result<(), PersistenceError>;
}

/// A photo as the store keeps it
#[derive(Debug, Clone)]
pub struct StoredPhoto {
    pub id: PhotoId,
    pub title: String,
    pub author: UserId,
    pub author_name: String,
    /// Stable overlay key, see [`crate::overlay::OverlayId::key`]
    pub overlay: String,
    pub background: crate::constants::BackgroundStyle,
    pub border: crate::constants::BorderStyle,
    /// Flattened per-shot filter levels, display order
    pub filters: Vec<Vec<String>>,
    /// Image buffers in capture order (a real backend uploads these to
    /// image storage; the wire format is its concern)
    pub images: Vec<RawFrame>,
    pub created_at: DateTime<Utc>,
}

/// In-memory store used by the demo and tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    photos: HashMap<PhotoId, StoredPhoto>,
    reactions: Vec<ReactionRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct read access for assertions and the demo printout
    pub fn photo(&self, id: PhotoId) -> Option<&StoredPhoto> {
        self.photos.get(&id)
    }

    /// Number of stored photos
    pub fn photo_count(&self) -> usize {
        self.photos.len()
    }

    /// Number of stored reaction records
    pub fn reaction_count(&self) -> usize {
        self.reactions.len()
    }
}

impl PhotoStore for MemoryStore {
    async fn fetch_reactions(
        &self,
        photos: &[PhotoId],
    ) -> Result<Vec<ReactionRecord>, PersistenceError> {
        Ok(self
            .reactions
            .iter()
            .filter(|r| photos.contains(&r.photo))
            .cloned()
            .collect())
    }

    async fn create_reaction(
        &mut self,
        photo: PhotoId,
        user: UserId,
        kind: ReactionKind,
    ) -> Result<ReactionRecord, PersistenceError> {
        if !self.photos.contains_key(&photo) {
            return Err(PersistenceError::NotFound);
        }
        // Uniqueness guarantee: one record per (photo, user) pair
        if self
            .reactions
            .iter()
            .any(|r| r.photo == photo && r.user == user)
        {
            return Err(PersistenceError::Conflict);
        }

        let record = ReactionRecord {
            id: ReactionId::new(),
            photo,
            user,
            kind,
            created_at: Utc::now(),
        };
        debug!(id = %record.id.0, ?kind, "Reaction created");
        self.reactions.push(record.clone());
        Ok(record)
    }

    async fn replace_reaction_kind(
        &mut self,
        id: ReactionId,
        kind: ReactionKind,
    ) -> Result<(), PersistenceError> {
        let record = self
            .reactions
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(PersistenceError::NotFound)?;
        debug!(id = %id.0, from = ?record.kind, to = ?kind, "Reaction kind replaced");
        record.kind = kind;
        Ok(())
    }

    async fn delete_reaction(&mut self, id: ReactionId) -> Result<(), PersistenceError> {
        let before = self.reactions.len();
        self.reactions.retain(|r| r.id != id);
        if self.reactions.len() == before {
            return Err(PersistenceError::NotFound);
        }
        debug!(id = %id.0, "Reaction deleted");
        Ok(())
    }

    async fn create_photo(&mut self, request: PublishRequest) -> Result<PhotoId, PersistenceError> {
        let id = PhotoId::new();
        let photo = StoredPhoto {
            id,
            title: request.title,
            author: request.author,
            author_name: request.author_name,
            overlay: request.overlay.key().to_string(),
            background: request.background,
            border: request.border,
            filters: request.filters.iter().map(|f| f.display_list()).collect(),
            images: request.frames,
            created_at: Utc::now(),
        };
        info!(photo = %id, title = %photo.title, shots = photo.images.len(), "Photo published");
        self.photos.insert(id, photo);
        Ok(id)
    }

    async fn delete_photo(&mut self, id: PhotoId) -> Result<(), PersistenceError> {
        self.photos.remove(&id).ok_or(PersistenceError::NotFound)?;
        // Cascade: reactions to a deleted photo go with it
        self.reactions.retain(|r| r.photo != id);
        info!(photo = %id, "Photo deleted");
        Ok(())
    }
}
