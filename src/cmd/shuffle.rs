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
use rollcall_core::session::Event;
use rollcall_core::session::Session;
use rollcall_core::session::update;

use crate::utils::clock_seed;
use crate::utils::read_names;

/// Print the names in `path` (or standard input) in a random order.
pub fn shuffle_names(path: Option<String>, seed: Option<u64>) -> Fallible<()> {
    let text = read_names(path.as_deref())?;
    let mut rng = TinyRng::from_seed(seed.unwrap_or_else(clock_seed));
    let roster = shuffled_roster(&text, &mut rng);
    if roster.is_empty() {
        println!("No names given.");
        return Ok(());
    }
    print!("{}", numbered(&roster));
    Ok(())
}

fn shuffled_roster(text: &str, rng: &mut TinyRng) -> Vec<String> {
    let (session, _) = update(Session::new(), Event::Edit(text.to_string()), rng);
    let (session, _) = update(session, Event::Submit, rng);
    let (session, _) = update(session, Event::Shuffle, rng);
    session.roster().to_vec()
}

/// One name per line, numbered from 1.
pub fn numbered(names: &[String]) -> String {
    let mut out = String::new();
    for (index, name) in names.iter().enumerate() {
        out.push_str(&format!("{}. {name}\n", index + 1));
    }
    out
}
