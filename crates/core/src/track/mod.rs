// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use derive_more::Display;
use semval::prelude::*;
use smol_str::SmolStr;

/// Opaque identifier of a playable track
///
/// The format is neither interpreted nor constrained. The only
/// requirement is that the identifier is not empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[repr(transparent)]
pub struct TrackId(SmolStr);

impl TrackId {
    #[must_use]
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(SmolStr::new(id))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for TrackId {
    fn from(from: &str) -> Self {
        Self::new(from)
    }
}

impl From<String> for TrackId {
    fn from(from: String) -> Self {
        Self(from.into())
    }
}

impl AsRef<str> for TrackId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TrackIdInvalidity {
    Empty,
}

impl Validate for TrackId {
    type Invalidity = TrackIdInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        ValidationContext::new()
            .invalidate_if(self.is_empty(), Self::Invalidity::Empty)
            .into()
    }
}
