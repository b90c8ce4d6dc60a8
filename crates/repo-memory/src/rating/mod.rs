// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use hashbrown::HashMap;
use parking_lot::RwLock;

use trackrater_core::{Rating, RatingAggregate, TrackId};
use trackrater_repo::{prelude::*, rating::RatingRepo};

/// Process-wide map of rating aggregates
///
/// Readers share the lock. The read-modify-write of an increment
/// holds the lock exclusively.
#[derive(Debug, Default)]
pub struct InMemoryRatingRepo {
    aggregates: RwLock<HashMap<TrackId, RatingAggregate>>,
}

impl InMemoryRatingRepo {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            aggregates: RwLock::new(HashMap::with_capacity(capacity)),
        }
    }
}

impl RatingRepo for InMemoryRatingRepo {
    fn load_rating_aggregate(&self, track_id: &TrackId) -> RepoResult<RatingAggregate> {
        let aggregate = self
            .aggregates
            .read()
            .get(track_id)
            .copied()
            .unwrap_or(RatingAggregate::EMPTY);
        Ok(aggregate)
    }

    fn increment_rating_aggregate(
        &self,
        track_id: &TrackId,
        rating: Rating,
    ) -> RepoResult<RatingAggregate> {
        let mut aggregates = self.aggregates.write();
        let aggregate = aggregates.entry(track_id.clone()).or_insert_with(|| {
            log::debug!("Creating rating aggregate for track {track_id}");
            RatingAggregate::EMPTY
        });
        aggregate.accumulate(rating);
        Ok(*aggregate)
    }

    fn count_rated_tracks(&self) -> RepoResult<u64> {
        Ok(self.aggregates.read().len() as u64)
    }
}
