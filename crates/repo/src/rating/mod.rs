// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use trackrater_core::{Rating, RatingAggregate, TrackId};

use crate::prelude::*;

/// Keyed storage of rating aggregates
///
/// Implementations are shared between concurrently executed requests
/// and must serialize all updates of the same key, i.e. no increment
/// must ever get lost.
///
/// Inputs are stored as given. Validating them is the responsibility
/// of the caller.
pub trait RatingRepo: Send + Sync {
    /// Load the current aggregate of a track.
    ///
    /// Tracks that have never been rated yield [`RatingAggregate::EMPTY`]
    /// instead of an error.
    fn load_rating_aggregate(&self, track_id: &TrackId) -> RepoResult<RatingAggregate>;

    /// Accumulate a rating and return the updated aggregate.
    ///
    /// The aggregate is created on demand when rating a track
    /// for the first time.
    fn increment_rating_aggregate(
        &self,
        track_id: &TrackId,
        rating: Rating,
    ) -> RepoResult<RatingAggregate>;

    /// The number of tracks with at least one rating.
    fn count_rated_tracks(&self) -> RepoResult<u64>;
}
