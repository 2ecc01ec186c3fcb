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

use axum::Form;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use rollcall_core::error::Fallible;
use rollcall_core::session::Event;
use rollcall_core::session::Mode;
use serde::Deserialize;

use crate::cmd::serve::state::ServerState;

#[derive(Deserialize)]
pub struct FormData {
    action: Action,
    /// Contents of the roster text box; only sent with `Update`.
    names: Option<String>,
}

#[derive(Deserialize, Debug)]
enum Action {
    Update,
    #[serde(rename = "Shuffle mode")]
    ShuffleMode,
    #[serde(rename = "Pick mode")]
    PickMode,
    Shuffle,
    Draw,
    Reset,
    Shutdown,
}

pub async fn post_handler(
    State(state): State<ServerState>,
    Form(form): Form<FormData>,
) -> Response {
    match action_handler(&state, form) {
        Ok(()) => Redirect::to("/").into_response(),
        Err(e) => {
            log::error!("{e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

fn action_handler(state: &ServerState, form: FormData) -> Fallible<()> {
    log::debug!("Action: {:?}", form.action);
    match form.action {
        Action::Update => {
            state.dispatch(Event::Edit(form.names.unwrap_or_default()))?;
            state.dispatch(Event::Submit)
        }
        Action::ShuffleMode => state.dispatch(Event::SetMode(Mode::Shuffle)),
        Action::PickMode => state.dispatch(Event::SetMode(Mode::Pick)),
        Action::Shuffle => state.dispatch(Event::Shuffle),
        Action::Draw => state.dispatch(Event::Draw),
        Action::Reset => state.dispatch(Event::Reset),
        Action::Shutdown => state.request_shutdown(),
    }
}
