// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use semval::Validate as _;

use trackrater_core::{AggregateSummary, Rating, TrackId};
use trackrater_repo::rating::RatingRepo;

use super::*;

#[derive(Debug)]
pub struct ValidatedInput {
    pub track_id: TrackId,
    pub rating: Rating,
}

fn validate_track_id(track_id: &TrackId) -> InputResult<()> {
    track_id
        .validate()
        .map_err(|err| anyhow::anyhow!("Invalid track id input: {err:?}").into())
}

pub fn validate_input(track_id: TrackId, rating: Rating) -> InputResult<ValidatedInput> {
    validate_track_id(&track_id)?;
    if let Err(err) = rating.validate() {
        return Err(anyhow::anyhow!("Invalid rating input: {err:?}").into());
    }
    Ok(ValidatedInput { track_id, rating })
}

/// Submit a new rating for a track.
///
/// All inputs are validated before touching the repository. A rejected
/// submission leaves the aggregate unmodified.
pub fn submit(
    repo: &(impl RatingRepo + ?Sized),
    track_id: TrackId,
    rating: Rating,
) -> Result<AggregateSummary> {
    let ValidatedInput { track_id, rating } = validate_input(track_id, rating)?;
    let aggregate = repo.increment_rating_aggregate(&track_id, rating)?;
    log::debug!(
        "Accepted rating {rating} for track {track_id}: {aggregate:?}",
        rating = rating.value()
    );
    Ok(aggregate.summary())
}

pub fn query(repo: &(impl RatingRepo + ?Sized), track_id: &TrackId) -> Result<AggregateSummary> {
    validate_track_id(track_id)?;
    let aggregate = repo.load_rating_aggregate(track_id)?;
    Ok(aggregate.summary())
}

#[cfg(test)]
mod tests;
