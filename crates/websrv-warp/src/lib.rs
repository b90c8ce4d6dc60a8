// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{convert::Infallible, error::Error as StdError, pin::pin, result::Result as StdResult};

use bytes::{Buf, BufMut as _, Bytes, BytesMut};
use futures::{Stream, TryStreamExt as _};
use serde::Serialize;
use thiserror::Error;
use warp::{
    Filter, Reply,
    http::StatusCode,
    reject::{self, InvalidHeader, InvalidQuery, MethodNotAllowed, Reject, Rejection},
};

use trackrater_backend_webapi_json as api;
use trackrater_repo::prelude::RepoError;
use trackrater_usecases as uc;

/// Generic message for all internal errors.
///
/// The actual cause is only logged.
pub const INTERNAL_ERROR_MESSAGE: &str = "Failed to process rating";

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    BadRequest(anyhow::Error),

    #[error("service unavailable")]
    ServiceUnavailable,

    #[error("payload too large")]
    PayloadTooLarge,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<api::Error> for Error {
    fn from(err: api::Error) -> Self {
        use api::Error::*;
        match err {
            BadRequest(err) => Self::BadRequest(err),
            UseCase(err) => err.into(),
            Other(err) => Self::Other(err),
        }
    }
}

impl From<uc::Error> for Error {
    fn from(err: uc::Error) -> Self {
        use uc::Error::*;
        match err {
            Input(err) => Self::BadRequest(err.0),
            Repository(err) => err.into(),
            Other(err) => Self::Other(err),
        }
    }
}

impl From<RepoError> for Error {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Aborted => Self::ServiceUnavailable,
            RepoError::Other(err) => Self::Other(err),
        }
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Other(err.into())
    }
}

pub type Result<T> = StdResult<T, Error>;

impl Reject for Error {}

fn reject_on_error(err: impl Into<Error>) -> Rejection {
    reject::custom(err.into())
}

pub fn after_blocking_task_finished<T, E1, E2>(
    res: StdResult<StdResult<T, E1>, E2>,
) -> StdResult<T, Rejection>
where
    E1: Into<Error>,
    E2: Into<Error>,
{
    res.map_err(reject_on_error)
        .and_then(|res| res.map_err(reject_on_error))
}

/// Run a synchronous request handler on the blocking thread pool.
///
/// Storage backends are not required to be async. Running them
/// on the blocking pool prevents stalling the async executor
/// while waiting for locks or I/O.
pub async fn spawn_blocking_task<H, T, E>(handler: H) -> StdResult<T, Rejection>
where
    H: FnOnce() -> StdResult<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<Error> + Send + 'static,
{
    after_blocking_task_finished(tokio::task::spawn_blocking(handler).await)
}

/// Buffer the whole request body up to a size limit.
///
/// A declared `Content-Length` beyond the limit is rejected before
/// reading the body. Bodies without a declared length, e.g. with
/// chunked transfer encoding, are rejected as soon as the limit is
/// exceeded while reading.
pub fn request_body_with_limit(
    limit_bytes: u64,
) -> impl Filter<Extract = (Bytes,), Error = Rejection> + Clone {
    warp::header::optional::<u64>("content-length")
        .and_then(move |content_length: Option<u64>| async move {
            if content_length.is_some_and(|content_length| content_length > limit_bytes) {
                return Err(reject_on_error(Error::PayloadTooLarge));
            }
            Ok(())
        })
        .untuple_one()
        .and(warp::body::stream())
        .and_then(move |body| read_body_with_limit(body, limit_bytes))
}

async fn read_body_with_limit(
    body: impl Stream<Item = StdResult<impl Buf, warp::Error>>,
    limit_bytes: u64,
) -> StdResult<Bytes, Rejection> {
    let mut body = pin!(body);
    let mut bytes = BytesMut::new();
    while let Some(chunk) = body
        .try_next()
        .await
        .map_err(|err| reject_on_error(anyhow::Error::from(err)))?
    {
        if (bytes.len() + chunk.remaining()) as u64 > limit_bytes {
            return Err(reject_on_error(Error::PayloadTooLarge));
        }
        bytes.put(chunk);
    }
    Ok(bytes.freeze())
}

/// An API error serializable to JSON.
#[derive(Debug, Serialize)]
struct ErrorResponseBody {
    error: String,
}

fn status_code_to_string(code: StatusCode) -> String {
    code.canonical_reason()
        .unwrap_or_else(|| code.as_str())
        .to_string()
}

#[allow(clippy::unused_async)] // async needed for warp filter
pub async fn handle_rejection(reject: Rejection) -> StdResult<impl Reply, Infallible> {
    let code;
    let message;

    if reject.is_not_found() {
        code = StatusCode::NOT_FOUND;
        message = status_code_to_string(code);
    } else if let Some(err) = reject.find::<Error>() {
        match err {
            Error::BadRequest(err) => {
                code = StatusCode::BAD_REQUEST;
                message = err.to_string();
            }
            Error::ServiceUnavailable => {
                code = StatusCode::SERVICE_UNAVAILABLE;
                message = status_code_to_string(code);
            }
            Error::PayloadTooLarge => {
                code = StatusCode::PAYLOAD_TOO_LARGE;
                message = status_code_to_string(code);
            }
            Error::Other(err) => {
                log::error!("Failed to handle request: {err:#}");
                code = StatusCode::INTERNAL_SERVER_ERROR;
                message = INTERNAL_ERROR_MESSAGE.to_owned();
            }
        }
    } else if let Some(err) = reject.find::<InvalidHeader>() {
        code = StatusCode::BAD_REQUEST;
        message = err
            .source()
            .map_or_else(|| err.to_string(), ToString::to_string);
    } else if let Some(err) = reject.find::<InvalidQuery>() {
        code = StatusCode::BAD_REQUEST;
        message = err
            .source()
            .map_or_else(|| err.to_string(), ToString::to_string);
    } else if let Some(err) = reject.find::<MethodNotAllowed>() {
        // This must have the least priority, because most rejections
        // contain a MethodNotAllowed element!
        code = StatusCode::METHOD_NOT_ALLOWED;
        message = err.to_string();
    } else {
        log::error!("Unhandled rejection {reject:?}");
        code = StatusCode::INTERNAL_SERVER_ERROR;
        message = INTERNAL_ERROR_MESSAGE.to_owned();
    }

    let json_reply = warp::reply::json(&ErrorResponseBody { error: message });

    Ok(warp::reply::with_status(json_reply, code))
}
