// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use semval::prelude::*;

///////////////////////////////////////////////////////////////////////
// Rating
///////////////////////////////////////////////////////////////////////

pub type RatingValue = f64;

/// A single rating as submitted by a listener
///
/// Fractional values are permitted as long as they are within
/// the closed range [`Rating::MIN`, `Rating::MAX`].
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Rating(RatingValue);

impl Rating {
    pub const MIN: Self = Self(1.0);
    pub const MAX: Self = Self(5.0);

    #[must_use]
    pub const fn new(value: RatingValue) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> RatingValue {
        let Self(value) = self;
        value
    }
}

impl From<RatingValue> for Rating {
    fn from(from: RatingValue) -> Self {
        Self::new(from)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RatingInvalidity {
    NotFinite,
    OutOfRange,
}

impl Validate for Rating {
    type Invalidity = RatingInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        let value = self.value();
        let mut context = ValidationContext::new();
        if value.is_finite() {
            context = context.invalidate_if(
                value < Self::MIN.value() || value > Self::MAX.value(),
                Self::Invalidity::OutOfRange,
            );
        } else {
            context = context.invalidate(Self::Invalidity::NotFinite);
        }
        context.into()
    }
}

///////////////////////////////////////////////////////////////////////
// Aggregate
///////////////////////////////////////////////////////////////////////

/// Accumulated ratings of a single track
///
/// Only the count and the sum are stored. The average is derived
/// on demand. The aggregate never shrinks, i.e. both the count
/// and the sum are monotonically non-decreasing.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Aggregate {
    pub total_ratings: u64,

    pub rating_sum: RatingValue,
}

impl Aggregate {
    /// The implicit aggregate of all tracks that have not been rated yet.
    pub const EMPTY: Self = Self {
        total_ratings: 0,
        rating_sum: 0.0,
    };

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_ratings == 0
    }

    /// The arithmetic mean of all accumulated ratings or 0 if empty.
    #[must_use]
    pub fn average_rating(&self) -> RatingValue {
        if self.is_empty() {
            return 0.0;
        }
        self.rating_sum / self.total_ratings as RatingValue
    }

    /// Accumulate a single rating.
    ///
    /// The rating is expected to be valid. This is only checked in
    /// debug builds.
    pub fn accumulate(&mut self, rating: Rating) {
        debug_assert!(rating.is_valid());
        self.total_ratings += 1;
        self.rating_sum += rating.value();
    }

    #[must_use]
    pub fn summary(&self) -> AggregateSummary {
        AggregateSummary {
            average_rating: self.average_rating(),
            total_ratings: self.total_ratings,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct AggregateSummary {
    pub average_rating: RatingValue,

    pub total_ratings: u64,
}

impl From<Aggregate> for AggregateSummary {
    fn from(from: Aggregate) -> Self {
        from.summary()
    }
}
