// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Collect ratings of tracks and report their running average.
//!
//! The domain model is always available. Everything else is
//! opt-in through features.

pub use trackrater_core::*;

#[cfg(feature = "json")]
pub use trackrater_core_json as json;

#[cfg(feature = "repo")]
pub use trackrater_repo as repo;

#[cfg(feature = "repo-memory")]
pub use trackrater_repo_memory as repo_memory;

#[cfg(feature = "usecases")]
pub use trackrater_usecases as usecases;
