// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

pub mod rating;

pub mod prelude {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum RepoError {
        /// The storage backend is unavailable, e.g. while shutting down.
        #[error("aborted")]
        Aborted,

        #[error(transparent)]
        Other(#[from] anyhow::Error),
    }

    pub type RepoResult<T> = Result<T, RepoError>;
}
