// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::Arc;

use bytes::Bytes;
use warp::{Filter, Reply, filters::BoxedFilter};

use trackrater_backend_webapi_json as api;
use trackrater_repo::rating::RatingRepo;
use trackrater_websrv_warp as websrv;

pub(crate) fn create_filters(
    shared_repo: Arc<dyn RatingRepo>,
    request_body_limit_bytes: u64,
) -> BoxedFilter<(impl Reply,)> {
    let shared_repo = warp::any().map(move || Arc::clone(&shared_repo));

    log::info!("Creating API routes");

    let rating_path = warp::path("rating");

    let rating_query = warp::get()
        .and(rating_path)
        .and(warp::path::end())
        .and(warp::query::<Vec<(String, String)>>())
        .and(shared_repo.clone())
        .and_then(
            |query_pairs: Vec<(String, String)>, shared_repo: Arc<dyn RatingRepo>| async move {
                let query_params = api::rating::query::QueryParams::from_pairs(query_pairs);
                websrv::spawn_blocking_task(move || {
                    api::rating::query::handle_request(&*shared_repo, query_params)
                })
                .await
                .map(|response_body| warp::reply::json(&response_body))
            },
        );

    let rating_submit = warp::post()
        .and(rating_path)
        .and(warp::path::end())
        .and(websrv::request_body_with_limit(request_body_limit_bytes))
        .and(shared_repo)
        .and_then(
            |request_body: Bytes, shared_repo: Arc<dyn RatingRepo>| async move {
                websrv::spawn_blocking_task(move || {
                    api::rating::submit::handle_request(&*shared_repo, &request_body)
                })
                .await
                .map(|response_body| warp::reply::json(&response_body))
            },
        );

    rating_query.or(rating_submit).boxed()
}

#[cfg(test)]
mod tests;
