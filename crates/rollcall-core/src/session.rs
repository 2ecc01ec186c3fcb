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

//! The whole application state and the single dispatcher that updates it.

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::draw::DrawPool;
use crate::draw::DrawTicket;
use crate::rng::TinyRng;
use crate::rng::shuffle;
use crate::roster::parse_roster;

/// How long a draw stays in the drawing state before it commits.
pub const DEFAULT_DRAW_DELAY_MS: u64 = 500;

/// Which view of the roster is shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// The full roster in (possibly shuffled) order.
    #[default]
    Shuffle,
    /// Drawn and remaining names.
    Pick,
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Shuffle => write!(f, "shuffle"),
            Mode::Pick => write!(f, "pick"),
        }
    }
}

impl TryFrom<&str> for Mode {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "shuffle" => Ok(Mode::Shuffle),
            "pick" => Ok(Mode::Pick),
            _ => Err(format!("Unknown mode: '{value}'.")),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// The text in the input box changed.
    Edit(String),
    /// Parse the current input into a new roster.
    Submit,
    SetMode(Mode),
    Shuffle,
    /// Start drawing the next name.
    Draw,
    /// The draw delay for this ticket has elapsed.
    Commit(DrawTicket),
    Reset,
}

/// Work the host has to do on behalf of the state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Dispatch `Event::Commit(ticket)` once the draw delay has elapsed.
    ScheduleCommit(DrawTicket),
    /// The draw for this ticket was cancelled; its timer can be dropped.
    CancelCommit(DrawTicket),
}

#[derive(Clone, Debug)]
pub struct Session {
    raw_input: String,
    roster: Vec<String>,
    mode: Mode,
    pool: DrawPool,
}

impl Session {
    pub fn new() -> Self {
        Self {
            raw_input: String::new(),
            roster: Vec::new(),
            mode: Mode::default(),
            pool: DrawPool::new(&[]),
        }
    }

    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    pub fn roster(&self) -> &[String] {
        &self.roster
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn remaining(&self) -> &[String] {
        self.pool.remaining()
    }

    pub fn selected(&self) -> &[String] {
        self.pool.selected()
    }

    pub fn is_drawing(&self) -> bool {
        self.pool.is_drawing()
    }

    pub fn pending_draw(&self) -> Option<DrawTicket> {
        self.pool.pending()
    }

    pub fn can_draw(&self) -> bool {
        self.pool.can_draw()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            raw_input: self.raw_input.clone(),
            roster: self.roster.clone(),
            remaining: self.remaining().to_vec(),
            selected: self.selected().to_vec(),
            mode: self.mode,
            drawing: self.is_drawing(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// A serializable copy of the visible session state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub raw_input: String,
    pub roster: Vec<String>,
    pub remaining: Vec<String>,
    pub selected: Vec<String>,
    pub mode: Mode,
    pub drawing: bool,
}

/// Apply `event` to `session`.
///
/// This is the only way the session changes. Requests that make no sense in
/// the current state (drawing from an empty pool, drawing while a draw is in
/// progress, committing a cancelled draw) leave the session untouched.
pub fn update(session: Session, event: Event, rng: &mut TinyRng) -> (Session, Option<Effect>) {
    let mut session = session;
    let effect = match event {
        Event::Edit(text) => {
            session.raw_input = text;
            None
        }
        Event::Submit => {
            session.roster = parse_roster(&session.raw_input);
            session
                .pool
                .reset(&session.roster)
                .map(Effect::CancelCommit)
        }
        Event::SetMode(mode) => {
            session.mode = mode;
            None
        }
        Event::Shuffle => {
            let roster = std::mem::take(&mut session.roster);
            session.roster = shuffle(roster, rng);
            None
        }
        Event::Draw => session.pool.begin().map(Effect::ScheduleCommit),
        Event::Commit(ticket) => {
            session.pool.commit(ticket, rng);
            None
        }
        Event::Reset => session
            .pool
            .reset(&session.roster)
            .map(Effect::CancelCommit),
    };
    (session, effect)
}
