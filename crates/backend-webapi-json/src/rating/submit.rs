// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use serde_json::value::RawValue;

use trackrater_core::{Rating, rating::RatingValue};

use super::*;

pub const INVALID_TRACK_ID_OR_RATING: &str = "Invalid track ID or rating";

/// Loosely typed request body
///
/// Both fields are kept as unparsed JSON to distinguish invalid
/// inputs (client errors) from unparseable payloads. Numbers that
/// exceed the range of floating-point values are invalid inputs.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    #[serde(default)]
    pub track_id: Option<Box<RawValue>>,

    #[serde(default)]
    pub rating: Option<Box<RawValue>>,
}

impl RequestBody {
    /// Parse the raw request body.
    ///
    /// Fails if the payload is not a JSON object.
    pub fn parse(bytes: &[u8]) -> anyhow::Result<Self> {
        let json: Box<RawValue> = serde_json::from_slice(bytes)?;
        if !json.get().starts_with('{') {
            anyhow::bail!("request body is not a JSON object");
        }
        serde_json::from_str(json.get()).map_err(Into::into)
    }

    fn into_input(self) -> Option<(TrackId, Rating)> {
        let Self { track_id, rating } = self;
        let track_id = serde_json::from_str::<String>(track_id?.get())
            .ok()
            .filter(|track_id| !track_id.is_empty())?;
        let rating = parse_rating_value(rating?.get())?;
        Some((track_id.into(), Rating::new(rating)))
    }
}

/// Only JSON numbers are accepted, no strings.
fn parse_rating_value(json: &str) -> Option<RatingValue> {
    if !json.starts_with(|c: char| c == '-' || c.is_ascii_digit()) {
        return None;
    }
    serde_json::from_str(json).ok()
}

pub fn handle_request(
    repo: &(impl RatingRepo + ?Sized),
    request_body: &[u8],
) -> Result<ResponseBody> {
    let request_body = RequestBody::parse(request_body)
        .map_err(|err| Error::Other(err.context("failed to parse rating submission")))?;
    let Some((track_id, rating)) = request_body.into_input() else {
        return Err(Error::BadRequest(anyhow::anyhow!(
            INVALID_TRACK_ID_OR_RATING
        )));
    };
    uc::rating::submit(repo, track_id, rating)
        .map(Into::into)
        .map_err(|err| reject_invalid_input(err, INVALID_TRACK_ID_OR_RATING))
}
