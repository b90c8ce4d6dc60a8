// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::prelude::*;

mod _core {
    pub(super) use trackrater_core::rating::{AggregateSummary, RatingValue};
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateSummary {
    pub average_rating: _core::RatingValue,
    pub total_ratings: u64,
}

impl From<_core::AggregateSummary> for AggregateSummary {
    fn from(from: _core::AggregateSummary) -> Self {
        let _core::AggregateSummary {
            average_rating,
            total_ratings,
        } = from;
        Self {
            average_rating,
            total_ratings,
        }
    }
}

impl From<AggregateSummary> for _core::AggregateSummary {
    fn from(from: AggregateSummary) -> Self {
        let AggregateSummary {
            average_rating,
            total_ratings,
        } = from;
        Self {
            average_rating,
            total_ratings,
        }
    }
}
