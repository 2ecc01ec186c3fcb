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

use rollcall_core::error::Fallible;
use rollcall_core::rng::TinyRng;
use rollcall_core::session::Effect;
use rollcall_core::session::Event;
use rollcall_core::session::Mode;
use rollcall_core::session::Session;
use rollcall_core::session::update;

use crate::cmd::shuffle::numbered;
use crate::utils::clock_seed;
use crate::utils::read_names;

/// Draw up to `count` names (all of them by default) from `path` or standard
/// input, and print them in draw order.
pub fn draw_names(path: Option<String>, count: Option<usize>, seed: Option<u64>) -> Fallible<()> {
    let text = read_names(path.as_deref())?;
    let mut rng = TinyRng::from_seed(seed.unwrap_or_else(clock_seed));
    let session = draw_session(&text, count, &mut rng);
    if session.roster().is_empty() {
        println!("No names given.");
        return Ok(());
    }
    print!("{}", numbered(session.selected()));
    println!("Remaining: {}", session.remaining().len());
    Ok(())
}

/// Submit `text` and draw until `count` names are picked or the pool runs
/// out. There is no delay: each draw commits immediately.
fn draw_session(text: &str, count: Option<usize>, rng: &mut TinyRng) -> Session {
    let (session, _) = update(Session::new(), Event::Edit(text.to_string()), rng);
    let (session, _) = update(session, Event::Submit, rng);
    let (mut session, _) = update(session, Event::SetMode(Mode::Pick), rng);
    let limit = count.unwrap_or(usize::MAX);
    while session.selected().len() < limit {
        let (next, effect) = update(session, Event::Draw, rng);
        session = match effect {
            Some(Effect::ScheduleCommit(ticket)) => update(next, Event::Commit(ticket), rng).0,
            _ => return next,
        };
    }
    session
}
