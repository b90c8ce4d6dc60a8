// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

pub mod rating;
pub use self::rating::{Aggregate as RatingAggregate, AggregateSummary, Rating};

pub mod track;
pub use self::track::TrackId;

pub mod prelude {
    // Re-export trait methods from semval
    pub use semval::{IsValid, Validate as _};
}
