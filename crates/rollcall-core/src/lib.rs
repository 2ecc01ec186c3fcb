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

//! rollcall-core: the state machine behind the rollcall name randomizer.
//!
//! - Parsing pasted text into a roster
//! - Uniform shuffling and sampling without replacement
//! - A reducer-style session that every frontend drives

pub mod draw;
pub mod error;
pub mod rng;
pub mod roster;
pub mod session;

// Re-exports for convenience
pub use draw::{DrawPool, DrawStatus, DrawTicket};
pub use error::{ErrorReport, Fallible, fail};
pub use roster::parse_roster;
pub use session::{DEFAULT_DRAW_DELAY_MS, Effect, Event, Mode, Session, Snapshot, update};
