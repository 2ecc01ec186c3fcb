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

use serde::Deserialize;
use serde::Serialize;

use crate::rng::TinyRng;

/// Identifies one in-flight draw. Tickets are never reused within a pool, so
/// a commit that arrives after its draw was cancelled can be recognized and
/// dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrawTicket(u64);

impl DrawTicket {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawStatus {
    Idle,
    /// A draw has been started and is waiting for its commit.
    Drawing(DrawTicket),
}

/// Sampling without replacement: names move from `remaining` to `selected`
/// one at a time.
#[derive(Clone, Debug)]
pub struct DrawPool {
    remaining: Vec<String>,
    selected: Vec<String>,
    status: DrawStatus,
    /// Number of tickets issued so far.
    issued: u64,
}

impl DrawPool {
    pub fn new(roster: &[String]) -> Self {
        Self {
            remaining: roster.to_vec(),
            selected: Vec::new(),
            status: DrawStatus::Idle,
            issued: 0,
        }
    }

    pub fn remaining(&self) -> &[String] {
        &self.remaining
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn status(&self) -> DrawStatus {
        self.status
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.status, DrawStatus::Drawing(_))
    }

    /// The ticket of the draw in progress, if any.
    pub fn pending(&self) -> Option<DrawTicket> {
        match self.status {
            DrawStatus::Idle => None,
            DrawStatus::Drawing(ticket) => Some(ticket),
        }
    }

    pub fn can_draw(&self) -> bool {
        !self.remaining.is_empty() && !self.is_drawing()
    }

    /// Start a draw. Returns `None` without changing anything if the pool is
    /// exhausted or a draw is already in progress.
    pub fn begin(&mut self) -> Option<DrawTicket> {
        if !self.can_draw() {
            return None;
        }
        self.issued += 1;
        let ticket = DrawTicket(self.issued);
        self.status = DrawStatus::Drawing(ticket);
        Some(ticket)
    }

    /// Finish the draw identified by `ticket`: move one uniformly chosen name
    /// from the remaining pool to the end of the selected sequence.
    ///
    /// Stale tickets are ignored.
    pub fn commit(&mut self, ticket: DrawTicket, rng: &mut TinyRng) -> Option<String> {
        if self.pending() != Some(ticket) {
            return None;
        }
        self.status = DrawStatus::Idle;
        if self.remaining.is_empty() {
            return None;
        }
        let index = rng.index(self.remaining.len());
        let name = self.remaining.remove(index);
        self.selected.push(name.clone());
        Some(name)
    }

    /// Refill the remaining pool from `roster` and clear the selection.
    ///
    /// Any draw in progress is cancelled; its ticket is returned so the
    /// caller can abort the matching timer.
    pub fn reset(&mut self, roster: &[String]) -> Option<DrawTicket> {
        let cancelled = self.pending();
        self.remaining = roster.to_vec();
        self.selected.clear();
        self.status = DrawStatus::Idle;
        cancelled
    }
}
