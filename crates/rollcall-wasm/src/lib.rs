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

//! WASM bindings for rollcall - runs the name randomizer in the browser.
//!
//! The page owns the draw timer: `draw` returns a ticket, the page waits
//! `drawDelayMs()` and hands the ticket back to `commit`. When `reset` or
//! `submit` return a ticket, the matching timeout should be cleared.

use wasm_bindgen::prelude::*;
use web_sys::console;

use rollcall_core::DEFAULT_DRAW_DELAY_MS;
use rollcall_core::draw::DrawTicket;
use rollcall_core::rng::TinyRng;
use rollcall_core::session::Effect;
use rollcall_core::session::Event;
use rollcall_core::session::Mode;
use rollcall_core::session::Session;
use rollcall_core::session::update;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    console::log_1(&"rollcall WASM initialized".into());
}

/// The application state managed from JavaScript.
#[wasm_bindgen]
pub struct RollcallApp {
    session: Session,
    rng: TinyRng,
}

#[wasm_bindgen]
impl RollcallApp {
    /// Create a new app seeded from the browser's crypto API.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<RollcallApp, JsValue> {
        let mut buf = [0u8; 8];
        getrandom::getrandom(&mut buf)
            .map_err(|e| JsValue::from_str(&format!("Failed to seed RNG: {}", e)))?;
        Ok(Self::with_seed(u64::from_le_bytes(buf)))
    }

    /// Create a new app with a fixed seed, for reproducible sessions.
    #[wasm_bindgen(js_name = withSeed)]
    pub fn with_seed(seed: u64) -> RollcallApp {
        Self {
            session: Session::new(),
            rng: TinyRng::from_seed(seed),
        }
    }

    /// Replace the text in the input box.
    #[wasm_bindgen]
    pub fn edit(&mut self, text: &str) {
        self.dispatch(Event::Edit(text.to_string()));
    }

    /// Parse the input into a new roster. Returns the ticket of a draw that
    /// was cancelled by the new roster, if any.
    #[wasm_bindgen]
    pub fn submit(&mut self) -> Option<u64> {
        cancelled(self.dispatch(Event::Submit))
    }

    /// Switch to "shuffle" or "pick".
    #[wasm_bindgen(js_name = setMode)]
    pub fn set_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode = Mode::try_from(mode).map_err(|e| JsValue::from_str(&e))?;
        self.dispatch(Event::SetMode(mode));
        Ok(())
    }

    #[wasm_bindgen]
    pub fn shuffle(&mut self) {
        self.dispatch(Event::Shuffle);
    }

    /// Start a draw. Returns the ticket to pass to `commit` after the draw
    /// delay, or nothing if no draw was started.
    #[wasm_bindgen]
    pub fn draw(&mut self) -> Option<u64> {
        match self.dispatch(Event::Draw) {
            Some(Effect::ScheduleCommit(ticket)) => Some(ticket.id()),
            _ => None,
        }
    }

    /// Finish the draw with this ticket. Returns whether a name was drawn.
    #[wasm_bindgen]
    pub fn commit(&mut self, ticket: u64) -> bool {
        let before = self.session.selected().len();
        self.dispatch(Event::Commit(DrawTicket::new(ticket)));
        self.session.selected().len() > before
    }

    /// Put every name back in the pool. Returns the ticket of a cancelled
    /// draw, if one was in progress.
    #[wasm_bindgen]
    pub fn reset(&mut self) -> Option<u64> {
        cancelled(self.dispatch(Event::Reset))
    }

    #[wasm_bindgen]
    pub fn mode(&self) -> String {
        self.session.mode().to_string()
    }

    #[wasm_bindgen(js_name = isDrawing)]
    pub fn is_drawing(&self) -> bool {
        self.session.is_drawing()
    }

    #[wasm_bindgen(js_name = canDraw)]
    pub fn can_draw(&self) -> bool {
        self.session.can_draw()
    }

    #[wasm_bindgen(js_name = rawInput)]
    pub fn raw_input(&self) -> String {
        self.session.raw_input().to_string()
    }

    /// The visible state as a JSON object.
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.session.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }

    #[wasm_bindgen(js_name = rosterJson)]
    pub fn roster_json(&self) -> String {
        to_json(self.session.roster())
    }

    #[wasm_bindgen(js_name = remainingJson)]
    pub fn remaining_json(&self) -> String {
        to_json(self.session.remaining())
    }

    #[wasm_bindgen(js_name = selectedJson)]
    pub fn selected_json(&self) -> String {
        to_json(self.session.selected())
    }

    // Private helper methods

    fn dispatch(&mut self, event: Event) -> Option<Effect> {
        let session = std::mem::take(&mut self.session);
        let (session, effect) = update(session, event, &mut self.rng);
        self.session = session;
        effect
    }
}

/// How long the page should wait between `draw` and `commit`.
#[wasm_bindgen(js_name = drawDelayMs)]
pub fn draw_delay_ms() -> u32 {
    DEFAULT_DRAW_DELAY_MS as u32
}

fn cancelled(effect: Option<Effect>) -> Option<u64> {
    match effect {
        Some(Effect::CancelCommit(ticket)) => Some(ticket.id()),
        _ => None,
    }
}

fn to_json(names: &[String]) -> String {
    serde_json::to_string(names).unwrap_or_else(|_| "[]".to_string())
}
