// SPDX-License-Identifier: GPL-3.0-only

//! Reaction toggle protocol
//!
//! A user holds at most one reaction per photo. Re-picking the current
//! kind withdraws it; picking a different kind switches the record in
//! place. The decision lives in one pure function, [`toggle`], consumed by
//! every view that renders reaction controls, and is executed against the
//! persistence collaborator as a single mutation.
//!
//! Aggregate counts are derived from the authoritative record set on every
//! display; they are never adjusted optimistically. If a mutation fails,
//! the next fetch re-derives the truth.

use crate::backends::store::{PhotoId, PhotoStore, UserId};
use crate::errors::PersistenceError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

/// The four exclusive reaction kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReactionKind {
    /// Positive: love it
    Heart,
    /// Positive: that's cool
    Cool,
    /// Neutral surprise
    Wow,
    /// Negative
    Sad,
}

impl ReactionKind {
    /// All kinds in display order
    pub const ALL: [ReactionKind; 4] = [
        ReactionKind::Heart,
        ReactionKind::Sad,
        ReactionKind::Cool,
        ReactionKind::Wow,
    ];

    /// Display name for the kind
    pub fn display_name(&self) -> &'static str {
        match self {
            ReactionKind::Heart => "Heart",
            ReactionKind::Cool => "Cool",
            ReactionKind::Wow => "Wow",
            ReactionKind::Sad => "Sad",
        }
    }
}

/// Identifier of one reaction record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReactionId(pub Uuid);

impl ReactionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ReactionId {
    fn default() -> Self {
        Self::new()
    }
}

/// One user's reaction to one photo
///
/// Invariant: at most one record exists per (photo, user) pair. The store
/// arbitrates concurrent first-time creates; see
/// [`PhotoStore::create_reaction`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionRecord {
    pub id: ReactionId,
    pub photo: PhotoId,
    pub user: UserId,
    pub kind: ReactionKind,
    pub created_at: DateTime<Utc>,
}

/// The single mutation a toggle decision resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionAction {
    /// No record exists: create one with the requested kind
    Create(ReactionKind),
    /// A record with a different kind exists: switch it in place
    Replace { id: ReactionId, kind: ReactionKind },
    /// The record already carries the requested kind: withdraw it
    Delete(ReactionId),
}

/// Decide how a reaction request mutates the record set
///
/// Pure: reads the given records, returns the single mutation to execute.
/// The records are assumed to be one atomic read of the current set; under
/// the one-record-per-pair invariant the first match is the only match.
pub fn toggle(
    actor: UserId,
    photo: PhotoId,
    requested: ReactionKind,
    records: &[ReactionRecord],
) -> ReactionAction {
    match records
        .iter()
        .find(|r| r.user == actor && r.photo == photo)
    {
        None => ReactionAction::Create(requested),
        Some(existing) if existing.kind == requested => ReactionAction::Delete(existing.id),
        Some(existing) => ReactionAction::Replace {
            id: existing.id,
            kind: requested,
        },
    }
}

/// The actor's current reaction to a photo, if any
///
/// Lets a view highlight the active reaction button.
pub fn current_kind(
    actor: UserId,
    photo: PhotoId,
    records: &[ReactionRecord],
) -> Option<ReactionKind> {
    records
        .iter()
        .find(|r| r.user == actor && r.photo == photo)
        .map(|r| r.kind)
}

/// Per-photo reaction counts broken out by kind
///
/// Derived, never stored: recompute from the record set whenever displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReactionAggregate {
    pub heart: usize,
    pub cool: usize,
    pub wow: usize,
    pub sad: usize,
}

impl ReactionAggregate {
    /// Derive the aggregate for one photo from a record set
    pub fn for_photo(photo: PhotoId, records: &[ReactionRecord]) -> Self {
        let mut aggregate = Self::default();
        for record in records.iter().filter(|r| r.photo == photo) {
            match record.kind {
                ReactionKind::Heart => aggregate.heart += 1,
                ReactionKind::Cool => aggregate.cool += 1,
                ReactionKind::Wow => aggregate.wow += 1,
                ReactionKind::Sad => aggregate.sad += 1,
            }
        }
        aggregate
    }

    /// Count for one kind
    pub fn count(&self, kind: ReactionKind) -> usize {
        match kind {
            ReactionKind::Heart => self.heart,
            ReactionKind::Cool => self.cool,
            ReactionKind::Wow => self.wow,
            ReactionKind::Sad => self.sad,
        }
    }

    /// Total reactions across all kinds
    pub fn total(&self) -> usize {
        self.heart + self.cool + self.wow + self.sad
    }
}

/// Decide and execute a toggle against the store as a single mutation
///
/// Re-reads the record set immediately before deciding so the decision is
/// computed from the latest state. On failure the store is untouched and
/// the caller's aggregates stay as they were; the next fetch re-derives
/// them from the authoritative set.
pub async fn submit_toggle<S: PhotoStore>(
    store: &mut S,
    actor: UserId,
    photo: PhotoId,
    requested: ReactionKind,
) -> Result<ReactionAction, PersistenceError> {
    let records = store.fetch_reactions(&[photo]).await?;
    let action = toggle(actor, photo, requested, &records);
    debug!(?action, user = %actor, photo = %photo, "Executing reaction toggle");

    let result = match action {
        ReactionAction::Create(kind) => store
            .create_reaction(photo, actor, kind)
            .await
            .map(|_| action),
        ReactionAction::Replace { id, kind } => {
            store.replace_reaction_kind(id, kind).await.map(|_| action)
        }
        ReactionAction::Delete(id) => store.delete_reaction(id).await.map(|_| action),
    };

    if let Err(ref error) = result {
        warn!(%error, user = %actor, photo = %photo, "Reaction toggle failed");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(photo: PhotoId, user: UserId, kind: ReactionKind) -> ReactionRecord {
        ReactionRecord {
            id: ReactionId::new(),
            photo,
            user,
            kind,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_no_existing_record_creates() {
        let (actor, photo) = (UserId::new(), PhotoId::new());
        let action = toggle(actor, photo, ReactionKind::Heart, &[]);
        assert_eq!(action, ReactionAction::Create(ReactionKind::Heart));
    }

    #[test]
    fn test_same_kind_deletes() {
        let (actor, photo) = (UserId::new(), PhotoId::new());
        let existing = record(photo, actor, ReactionKind::Heart);
        let action = toggle(actor, photo, ReactionKind::Heart, &[existing.clone()]);
        assert_eq!(action, ReactionAction::Delete(existing.id));
    }

    #[test]
    fn test_different_kind_replaces() {
        let (actor, photo) = (UserId::new(), PhotoId::new());
        let existing = record(photo, actor, ReactionKind::Heart);
        let action = toggle(actor, photo, ReactionKind::Sad, &[existing.clone()]);
        assert_eq!(
            action,
            ReactionAction::Replace {
                id: existing.id,
                kind: ReactionKind::Sad,
            }
        );
    }

    #[test]
    fn test_other_users_records_ignored() {
        let (actor, photo) = (UserId::new(), PhotoId::new());
        let others = vec![
            record(photo, UserId::new(), ReactionKind::Heart),
            record(PhotoId::new(), actor, ReactionKind::Heart),
        ];
        // Same kind exists, but for another user / another photo
        let action = toggle(actor, photo, ReactionKind::Heart, &others);
        assert_eq!(action, ReactionAction::Create(ReactionKind::Heart));
    }

    #[test]
    fn test_aggregate_counts_by_kind() {
        let photo = PhotoId::new();
        let records = vec![
            record(photo, UserId::new(), ReactionKind::Heart),
            record(photo, UserId::new(), ReactionKind::Heart),
            record(photo, UserId::new(), ReactionKind::Wow),
            record(PhotoId::new(), UserId::new(), ReactionKind::Sad),
        ];
        let aggregate = ReactionAggregate::for_photo(photo, &records);
        assert_eq!(aggregate.count(ReactionKind::Heart), 2);
        assert_eq!(aggregate.count(ReactionKind::Wow), 1);
        // The Sad record belongs to a different photo
        assert_eq!(aggregate.count(ReactionKind::Sad), 0);
        assert_eq!(aggregate.total(), 3);
    }

    #[test]
    fn test_current_kind_highlights_own_reaction() {
        let (actor, photo) = (UserId::new(), PhotoId::new());
        let records = vec![
            record(photo, UserId::new(), ReactionKind::Heart),
            record(photo, actor, ReactionKind::Cool),
        ];
        assert_eq!(
            current_kind(actor, photo, &records),
            Some(ReactionKind::Cool)
        );
        assert_eq!(current_kind(UserId::new(), photo, &records), None);
    }
}
