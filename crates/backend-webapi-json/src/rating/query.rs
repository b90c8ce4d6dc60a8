// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

pub const TRACK_ID_REQUIRED: &str = "Track ID is required";

const TRACK_ID_PARAM: &str = "trackId";

#[derive(Debug, Default)]
pub struct QueryParams {
    pub track_id: Option<String>,
}

impl QueryParams {
    /// Pick the parameters from decoded name/value pairs.
    ///
    /// Unknown names are ignored. Only the first occurrence of a
    /// repeated parameter is considered.
    #[must_use]
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let track_id = pairs
            .into_iter()
            .find_map(|(name, value)| (name == TRACK_ID_PARAM).then_some(value));
        Self { track_id }
    }
}

pub fn handle_request(
    repo: &(impl RatingRepo + ?Sized),
    query_params: QueryParams,
) -> Result<ResponseBody> {
    let QueryParams { track_id } = query_params;
    let Some(track_id) = track_id.filter(|track_id| !track_id.is_empty()) else {
        return Err(Error::BadRequest(anyhow::anyhow!(TRACK_ID_REQUIRED)));
    };
    uc::rating::query(repo, &TrackId::from(track_id))
        .map(Into::into)
        .map_err(|err| reject_invalid_input(err, TRACK_ID_REQUIRED))
}
