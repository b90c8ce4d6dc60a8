// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{env::current_exe, process::ExitCode, sync::Arc};

use crate::{config::Config, launcher::Launcher, runtime::State as RuntimeState};

mod config;
mod env;
mod launcher;
mod routing;
mod runtime;

#[cfg(feature = "mimalloc")]
#[global_allocator]
static MIMALLOC: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Load the configuration file, falling back to defaults.
///
/// Settings from the environment are applied afterwards.
fn load_config() -> Config {
    if env::parse_default_config().unwrap_or(false) {
        log::info!("Ignoring configuration file");
        return Config::default();
    }
    let Some(file_path) = config::default_config_file_path() else {
        log::warn!("Configuration directory not available");
        return Config::default();
    };
    match Config::read_from_file(&file_path) {
        Ok(Some(config)) => {
            log::info!("Loaded configuration from {}", file_path.display());
            config
        }
        Ok(None) => {
            log::info!("No configuration found at {}", file_path.display());
            Config::default()
        }
        Err(err) => {
            log::warn!(
                "Ignoring invalid configuration file {}: {err:#}",
                file_path.display()
            );
            Config::default()
        }
    }
}

fn main() -> ExitCode {
    env::init_environment();

    if let Err(err) = env::init_tracing_and_logging() {
        eprintln!("Failed to initialize tracing and logging: {err}");
        return ExitCode::FAILURE;
    }

    log::info!(
        "{name} v{version}",
        name = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
    );
    if let Ok(exe_path) = current_exe() {
        log::debug!("Executable: {}", exe_path.display());
    }

    let mut config = load_config();
    env::parse_config_into(&mut config);
    log::debug!("Effective configuration: {config:?}");

    match run_until_terminated(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Run the web server until it is shut down.
///
/// Termination is requested either by Ctrl-C or through
/// the shutdown endpoint.
fn run_until_terminated(config: Config) -> anyhow::Result<()> {
    let launcher = Arc::new(parking_lot::Mutex::new(Launcher::new()));

    ctrlc::set_handler({
        let launcher = Arc::clone(&launcher);
        move || {
            log::info!("Received interrupt signal");
            if let Err(err) = launcher.lock().terminate_runtime() {
                log::warn!("Failed to terminate runtime: {err}");
            }
        }
    })?;

    let runtime_thread = launcher.lock().launch_runtime(config, |state| {
        if let Some(RuntimeState::Listening { socket_addr }) = state {
            // Announce the actual address on stdout, e.g. for an ephemeral port
            println!("{socket_addr}");
        }
    })?;

    runtime_thread
        .join()
        .map_err(|_| anyhow::anyhow!("runtime thread panicked"))??;
    log::info!("Exiting");
    Ok(())
}
