// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{net::SocketAddr, sync::Arc, time::Duration};

use jiff::Timestamp;
use tokio::{sync::mpsc, time::sleep};
use warp::{Filter as _, http::StatusCode};

use trackrater_repo::rating::RatingRepo;
use trackrater_repo_memory::InMemoryRatingRepo;
use trackrater_websrv_warp::handle_rejection;

use crate::{
    config::{Config, Storage, StorageConfig},
    routing,
};

const WEB_SERVER_LISTENING_DELAY: Duration = Duration::from_millis(250);

static OPENAPI_YAML: &str = include_str!("../res/openapi.yaml");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum State {
    Launching,
    Starting,
    Listening { socket_addr: SocketAddr },
    Stopping,
    Terminating,
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Command {
    Terminate,
}

pub(crate) fn provision_storage(config: &StorageConfig) -> Arc<dyn RatingRepo> {
    let StorageConfig {
        kind,
        initial_capacity,
    } = config;
    log::info!("Commissioning {kind} storage with initial capacity for {initial_capacity} track(s)");
    match kind {
        Storage::InMemory => Arc::new(InMemoryRatingRepo::with_capacity(*initial_capacity)),
    }
}

pub(crate) async fn run(
    config: Config,
    command_rx: mpsc::UnboundedReceiver<Command>,
    current_state_tx: discro::Publisher<Option<State>>,
) -> anyhow::Result<()> {
    let launched_at = Timestamp::now();

    log::info!("Launching");
    current_state_tx.write(Some(State::Launching));

    let shared_repo = provision_storage(&config.storage);

    log::info!("Creating service routes");

    // POST /shutdown
    let (server_shutdown_tx, mut server_shutdown_rx) = mpsc::unbounded_channel::<()>();
    let shutdown_filter = warp::post()
        .and(warp::path("shutdown"))
        .and(warp::path::end())
        .map(move || {
            server_shutdown_tx
                .send(())
                .map(|()| StatusCode::ACCEPTED)
                .unwrap_or_else(|_| {
                    log::warn!("Failed to forward shutdown request");
                    StatusCode::BAD_GATEWAY
                })
        });

    // GET /about
    let about_filter = {
        let config = config.clone();
        let shared_repo = Arc::clone(&shared_repo);
        warp::get()
            .and(warp::path("about"))
            .and(warp::path::end())
            .map(move || {
                let rated_tracks = shared_repo
                    .count_rated_tracks()
                    .map_err(|err| {
                        log::warn!("Failed to count rated tracks: {err}");
                    })
                    .ok();
                warp::reply::json(&serde_json::json!({
                    "name": env!("CARGO_PKG_NAME"),
                    "description": env!("CARGO_PKG_DESCRIPTION"),
                    "version": env!("CARGO_PKG_VERSION"),
                    "instance": {
                        "launchedAt": launched_at,
                        "config": config,
                        "ratedTracks": rated_tracks,
                    },
                }))
            })
    };

    let api_filters = warp::path("api").and(routing::api::create_filters(
        Arc::clone(&shared_repo),
        config.network.request_body_limit_bytes,
    ));

    // Static content
    let openapi_yaml = warp::get()
        .and(warp::path("openapi.yaml"))
        .and(warp::path::end())
        .map(|| {
            warp::reply::with_header(
                OPENAPI_YAML,
                "Content-Type",
                "application/x-yaml;charset=utf-8",
            )
        });

    let all_filters = api_filters
        .or(openapi_yaml)
        .or(shutdown_filter)
        .or(about_filter);

    log::info!("Initializing server");

    let server = warp::serve(
        all_filters
            .with(
                warp::cors()
                    .allow_any_origin()
                    .allow_methods(["GET", "POST"])
                    .allow_header("content-type"),
            )
            .recover(handle_rejection),
    );

    log::info!("Starting");
    current_state_tx.write(Some(State::Starting));

    let (socket_addr, server_listener) = {
        let mut command_rx = command_rx;
        server.try_bind_with_graceful_shutdown(config.network.endpoint.socket_addr(), async move {
            tokio::select! {
                Some(()) = server_shutdown_rx.recv() => (),
                Some(Command::Terminate) = command_rx.recv() => (),
                else => (),
            }
        })?
    };

    // Give the server some time to become ready and start listening
    // before announcing the actual endpoint address, i.e. when using
    // an ephemeral port. Unfortunately warp does not provide any signal
    // when the server has started listening.
    sleep(WEB_SERVER_LISTENING_DELAY).await;

    log::info!("Listening on {socket_addr}");
    current_state_tx.write(Some(State::Listening { socket_addr }));

    server_listener.await;

    log::info!("Stopping");
    current_state_tx.write(Some(State::Stopping));

    // Volatile storage is dropped together with the last reference
    match shared_repo.count_rated_tracks() {
        Ok(rated_tracks) => log::info!("Discarding ratings of {rated_tracks} track(s)"),
        Err(err) => log::warn!("Failed to count rated tracks: {err}"),
    }
    drop(shared_repo);

    log::info!("Terminating");
    current_state_tx.write(Some(State::Terminating));

    Ok(())
}
