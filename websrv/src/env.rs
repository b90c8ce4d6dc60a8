// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{env, str::FromStr};

use tracing::{Subscriber, subscriber::set_global_default};
use tracing_log::LogTracer;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

pub(crate) fn init_environment() {
    if let Ok(path) = dotenvy::dotenv() {
        // Print to stderr because logging has not been initialized yet
        eprintln!("Loaded environment from dotenv file {}", path.display());
    }
}

const TRACING_SUBSCRIBER_ENV_FILTER_DEFAULT: &str = "info";

fn create_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|err| {
        let rust_log_from_env = env::var("RUST_LOG").ok();
        if let Some(rust_log_from_env) = rust_log_from_env {
            if !rust_log_from_env.is_empty() {
                eprintln!(
                    "Failed to parse RUST_LOG environment variable '{rust_log_from_env}': {err}"
                );
            }
        }
        EnvFilter::new(TRACING_SUBSCRIBER_ENV_FILTER_DEFAULT)
    })
}

fn create_tracing_subscriber() -> impl Subscriber + Send + Sync {
    let env_filter = create_env_filter();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish()
}

pub(crate) fn init_tracing_and_logging() -> anyhow::Result<()> {
    // Capture and redirect all log messages as tracing events
    LogTracer::init()?;

    let subscriber = create_tracing_subscriber();
    set_global_default(subscriber)?;

    Ok(())
}

fn parse_bool_var(var: &str) -> Option<bool> {
    let var = var.trim();
    var.to_lowercase().parse::<bool>().ok().or_else(|| {
        var.parse::<u8>().ok().and_then(|val| match val {
            0 => Some(false),
            1 => Some(true),
            _ => None,
        })
    })
}

/// Read and parse an optional environment variable.
///
/// Unparseable values are logged and ignored.
fn parse_var_with<T>(name: &str, parse: impl FnOnce(&str) -> Option<T>) -> Option<T> {
    let var = env::var(name).ok()?;
    tracing::debug!("{name} = {var}");
    if var.trim().is_empty() {
        return None;
    }
    let val = parse(&var);
    if val.is_none() {
        tracing::warn!("Failed to parse {name} = {var}");
    }
    val
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    parse_var_with(name, |var| var.trim().parse().ok())
}

const DEFAULT_CONFIG_ENV: &str = "DEFAULT_CONFIG";

pub(crate) fn parse_default_config() -> Option<bool> {
    parse_var_with(DEFAULT_CONFIG_ENV, parse_bool_var)
}

const ENDPOINT_IP_ENV: &str = "ENDPOINT_IP";

const ENDPOINT_PORT_ENV: &str = "ENDPOINT_PORT";

const REQUEST_BODY_LIMIT_BYTES_ENV: &str = "REQUEST_BODY_LIMIT_BYTES";

pub(crate) fn parse_config_into(config: &mut Config) {
    if let Some(ip_addr) = parse_var(ENDPOINT_IP_ENV) {
        config.network.endpoint.ip_addr = ip_addr;
    }
    if let Some(port) = parse_var(ENDPOINT_PORT_ENV) {
        config.network.endpoint.port = port;
    }
    if let Some(request_body_limit_bytes) = parse_var(REQUEST_BODY_LIMIT_BYTES_ENV) {
        config.network.request_body_limit_bytes = request_body_limit_bytes;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bool_vars() {
        assert_eq!(Some(true), parse_bool_var("true"));
        assert_eq!(Some(true), parse_bool_var("TRUE"));
        assert_eq!(Some(true), parse_bool_var(" 1 "));
        assert_eq!(Some(false), parse_bool_var("false"));
        assert_eq!(Some(false), parse_bool_var("0"));
        assert_eq!(None, parse_bool_var("2"));
        assert_eq!(None, parse_bool_var("yes"));
    }
}
