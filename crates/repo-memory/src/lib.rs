// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Volatile storage that lives only as long as the process.
//!
//! Nothing is persisted. All data is lost on restart.

pub mod rating;
pub use self::rating::InMemoryRatingRepo;
