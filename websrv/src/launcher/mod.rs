// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{future::Future, thread::JoinHandle};

use discro::{Publisher, Subscriber};
use tokio::sync::mpsc;

use crate::{
    config::Config,
    runtime::{Command as RuntimeCommand, State as RuntimeState, run},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum State {
    Idle,
    Running,
}

#[derive(Debug)]
enum InternalState {
    Idle,
    Running {
        runtime_command_tx: mpsc::UnboundedSender<RuntimeCommand>,
    },
}

impl From<&InternalState> for State {
    fn from(from: &InternalState) -> Self {
        match from {
            InternalState::Idle => Self::Idle,
            InternalState::Running { .. } => Self::Running,
        }
    }
}

/// Owns the async runtime that executes the web server
#[derive(Debug)]
pub(crate) struct Launcher {
    state: InternalState,
}

impl Launcher {
    pub(crate) const fn new() -> Self {
        Self {
            state: InternalState::Idle,
        }
    }

    pub(crate) fn state(&self) -> State {
        (&self.state).into()
    }

    /// Spawn a new thread that executes the runtime.
    ///
    /// All state transitions of the runtime are reported through the
    /// callback, starting with the initial state.
    pub(crate) fn launch_runtime(
        &mut self,
        config: Config,
        on_state_changed: impl FnMut(Option<RuntimeState>) + Send + 'static,
    ) -> anyhow::Result<JoinHandle<anyhow::Result<()>>> {
        if self.state() != State::Idle {
            anyhow::bail!("Invalid state: {:?}", self.state());
        }

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        let (runtime_command_tx, runtime_command_rx) = mpsc::unbounded_channel();
        let current_state_pub = Publisher::new(None);
        let current_state_sub = current_state_pub.subscribe();

        let join_handle = std::thread::spawn(move || {
            runtime.spawn(observe_state(current_state_sub, on_state_changed));
            runtime.block_on(run(config, runtime_command_rx, current_state_pub))
        });

        self.state = InternalState::Running { runtime_command_tx };

        Ok(join_handle)
    }

    pub(crate) fn terminate_runtime(&mut self) -> anyhow::Result<()> {
        match &self.state {
            InternalState::Idle => anyhow::bail!("Invalid state: {:?}", self.state()),
            InternalState::Running { runtime_command_tx } => {
                let command = RuntimeCommand::Terminate;
                if let Err(err) = runtime_command_tx.send(command) {
                    anyhow::bail!(
                        "Failed to send command {command:?} in state {state:?}: {err}",
                        state = self.state()
                    );
                }
            }
        }
        Ok(())
    }
}

fn observe_state(
    mut state_sub: Subscriber<Option<RuntimeState>>,
    mut on_changed: impl FnMut(Option<RuntimeState>) + Send + 'static,
) -> impl Future<Output = ()> + Send + 'static {
    // Read the initial value immediately before spawning the async task
    let mut value = *state_sub.read_ack();
    async move {
        on_changed(value);
        while state_sub.changed().await.is_ok() {
            let new_value = *state_sub.read_ack();
            if value != new_value {
                value = new_value;
                on_changed(value);
            }
        }
        // Publisher has disappeared
        log::debug!("Stopped observing runtime state");
    }
}
