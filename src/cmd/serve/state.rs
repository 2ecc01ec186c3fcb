// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::time::Duration;

use rollcall_core::draw::DrawTicket;
use rollcall_core::error::ErrorReport;
use rollcall_core::error::Fallible;
use rollcall_core::rng::TinyRng;
use rollcall_core::session::Effect;
use rollcall_core::session::Event;
use rollcall_core::session::Session;
use rollcall_core::session::update;
use tokio::spawn;
use tokio::sync::oneshot::Sender;
use tokio::task::AbortHandle;
use tokio::time::sleep;

#[derive(Clone)]
pub struct ServerState {
    pub draw_delay: Duration,
    pub mutable: Arc<Mutex<MutableState>>,
    pub shutdown_tx: Arc<Mutex<Option<Sender<()>>>>,
}

pub struct MutableState {
    pub session: Session,
    pub rng: TinyRng,
    /// The timer that will commit the draw in progress.
    pub timer: Option<PendingCommit>,
}

pub struct PendingCommit {
    pub ticket: DrawTicket,
    pub handle: AbortHandle,
}

impl ServerState {
    pub fn lock(&self) -> Fallible<MutexGuard<'_, MutableState>> {
        self.mutable
            .lock()
            .map_err(|_| ErrorReport::new("session state is poisoned."))
    }

    /// Run `event` through the session and carry out the resulting effect.
    ///
    /// Must be called from within a Tokio runtime, since starting a draw
    /// spawns the task that commits it.
    pub fn dispatch(&self, event: Event) -> Fallible<()> {
        log::debug!("Dispatching {event:?}");
        let mut mutable = self.lock()?;
        let committed = match &event {
            Event::Commit(ticket) => Some(*ticket),
            _ => None,
        };
        let session = std::mem::take(&mut mutable.session);
        let (session, effect) = update(session, event, &mut mutable.rng);
        mutable.session = session;
        if committed.is_some() && mutable.timer.as_ref().map(|t| t.ticket) == committed {
            mutable.timer = None;
        }
        match effect {
            Some(Effect::ScheduleCommit(ticket)) => {
                let state = self.clone();
                let delay = self.draw_delay;
                let task = spawn(async move {
                    sleep(delay).await;
                    if let Err(e) = state.dispatch(Event::Commit(ticket)) {
                        log::error!("Failed to commit draw: {e}");
                    }
                });
                mutable.timer = Some(PendingCommit {
                    ticket,
                    handle: task.abort_handle(),
                });
            }
            Some(Effect::CancelCommit(ticket)) => {
                if let Some(timer) = mutable.timer.take() {
                    if timer.ticket == ticket {
                        log::debug!("Cancelling pending draw {}", ticket.id());
                        timer.handle.abort();
                    } else {
                        mutable.timer = Some(timer);
                    }
                }
            }
            None => {}
        }
        Ok(())
    }

    /// Abort the pending draw timer, if any. Used on shutdown.
    pub fn cancel_timer(&self) -> Fallible<()> {
        let mut mutable = self.lock()?;
        if let Some(timer) = mutable.timer.take() {
            timer.handle.abort();
        }
        Ok(())
    }

    /// Ask the server to shut down. Only the first request has any effect.
    pub fn request_shutdown(&self) -> Fallible<()> {
        let mut tx = self
            .shutdown_tx
            .lock()
            .map_err(|_| ErrorReport::new("shutdown channel is poisoned."))?;
        if let Some(tx) = tx.take() {
            let _ = tx.send(());
        }
        Ok(())
    }
}
