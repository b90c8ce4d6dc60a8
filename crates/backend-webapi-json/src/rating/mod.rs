// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use serde::Deserialize;

use trackrater_core::TrackId;
use trackrater_core_json::rating::AggregateSummary;
use trackrater_repo::rating::RatingRepo;

use super::*;

pub mod query;
pub mod submit;

pub type ResponseBody = AggregateSummary;

/// Reject use case input errors with a fixed message.
///
/// The cause is only logged and not exposed to the client.
fn reject_invalid_input(err: uc::Error, message: &'static str) -> Error {
    match err {
        uc::Error::Input(err) => {
            log::debug!("Rejecting invalid input: {err}");
            Error::BadRequest(anyhow::anyhow!(message))
        }
        err => err.into(),
    }
}
