//! # Command Execution Layer
//!
//! Translates [`Effect`]s into [`Cmd`]s and runs them. This is the boundary
//! where state updates meet the back office API: every command becomes its
//! own Tokio task that resolves to the [`Msg`] carrying its result.
//!
//! Reference lists are fetched as three separate tasks, so a slow or failing
//! endpoint never delays the other selectors.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::task::{JoinHandle, spawn};
use tracing::debug;
use yousmala_api::BackOfficeApi;
use yousmala_engine::{PendingSubmission, ReferenceKind, fetch_reference_list};

use crate::app::{App, Effect, Msg, TaskOrigin};

/// Side-effectful work executed outside of state updates.
#[derive(Debug)]
pub enum Cmd {
    FetchReference(ReferenceKind),
    CreateOrder(Box<PendingSubmission>),
}

/// A spawned command. Resolves to its message, or to [`Msg::TaskFailed`]
/// naming the command when the task panicked or was aborted.
#[derive(Debug)]
pub struct PendingTask {
    origin: TaskOrigin,
    handle: JoinHandle<Msg>,
}

impl PendingTask {
    pub fn abort(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Future for PendingTask {
    type Output = Msg;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Msg> {
        let this = self.get_mut();
        let origin = this.origin;
        Pin::new(&mut this.handle).poll(cx).map(|joined| {
            joined.unwrap_or_else(|error| Msg::TaskFailed {
                origin,
                reason: error.to_string(),
            })
        })
    }
}

/// Result of running a batch of effects.
#[derive(Debug, Default)]
pub struct CommandBatch {
    /// Messages to feed back into the app right away.
    pub immediate: Vec<Msg>,
    /// Background tasks, each resolving to one message.
    pub pending: Vec<PendingTask>,
}

/// Split effects into immediate messages and commands.
pub fn from_effects(app: &mut App, effects: Vec<Effect>) -> (Vec<Msg>, Vec<Cmd>) {
    let mut messages = Vec::new();
    let mut commands = Vec::new();
    for effect in effects {
        match effect {
            Effect::SendMsg(msg) => messages.push(msg),
            Effect::LoadReferenceData => {
                for kind in ReferenceKind::ALL {
                    app.mark_loading(kind);
                    commands.push(Cmd::FetchReference(kind));
                }
            }
            Effect::SubmitOrder(pending) => commands.push(Cmd::CreateOrder(Box::new(pending))),
        }
    }
    (messages, commands)
}

/// Spawn one task per command.
pub fn run_cmds(api: &Arc<dyn BackOfficeApi>, commands: Vec<Cmd>) -> Vec<PendingTask> {
    commands
        .into_iter()
        .map(|command| {
            debug!(?command, "dispatching command");
            match command {
                Cmd::FetchReference(kind) => spawn_reference_fetch(Arc::clone(api), kind),
                Cmd::CreateOrder(payload) => spawn_create_order(Arc::clone(api), *payload),
            }
        })
        .collect()
}

/// Convenience wrapper used by the runtime.
pub fn run_from_effects(app: &mut App, api: &Arc<dyn BackOfficeApi>, effects: Vec<Effect>) -> CommandBatch {
    let (immediate, commands) = from_effects(app, effects);
    CommandBatch {
        immediate,
        pending: run_cmds(api, commands),
    }
}

fn spawn_reference_fetch(api: Arc<dyn BackOfficeApi>, kind: ReferenceKind) -> PendingTask {
    PendingTask {
        origin: TaskOrigin::Reference(kind),
        handle: spawn(async move { Msg::ReferenceListLoaded(fetch_reference_list(api.as_ref(), kind).await) }),
    }
}

fn spawn_create_order(api: Arc<dyn BackOfficeApi>, pending: PendingSubmission) -> PendingTask {
    let PendingSubmission { ticket, payload } = pending;
    PendingTask {
        origin: TaskOrigin::Submission(ticket),
        handle: spawn(async move { Msg::SubmitCompleted(ticket, api.create_order(&payload).await) }),
    }
}
