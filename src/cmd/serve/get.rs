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

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use maud::Markup;
use maud::html;
use rollcall_core::session::Mode;
use rollcall_core::session::Session;

use crate::cmd::serve::state::ServerState;
use crate::cmd::serve::template::page_template;

pub async fn get_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let mutable = match state.lock() {
        Ok(m) => m,
        Err(e) => {
            log::error!("{e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("Internal Server Error".to_string()),
            );
        }
    };
    let session = &mutable.session;
    let body = render_session(session);
    let html = page_template(body, session.is_drawing()).into_string();
    (StatusCode::OK, Html(html))
}

fn render_session(session: &Session) -> Markup {
    html! {
        div.root {
            h1 { "rollcall" }
            form.roster-form action="/" method="post" {
                textarea name="names" placeholder="Enter one name per line" {
                    (session.raw_input())
                }
                button #update type="submit" name="action" value="Update" {
                    "Update roster"
                }
            }
            @if !session.roster().is_empty() {
                div.results {
                    div.results-header {
                        h2 { "Results" }
                        form.mode-switch action="/" method="post" {
                            (mode_button(session.mode(), Mode::Shuffle))
                            (mode_button(session.mode(), Mode::Pick))
                        }
                    }
                    @match session.mode() {
                        Mode::Shuffle => { (render_shuffle(session)) }
                        Mode::Pick => { (render_pick(session)) }
                    }
                }
            }
            div.shutdown-container {
                form action="/" method="post" {
                    input #shutdown .shutdown-button type="submit" name="action" value="Shutdown" title="Shut down the server";
                }
            }
        }
    }
}

fn mode_button(current: Mode, mode: Mode) -> Markup {
    let (value, label) = match mode {
        Mode::Shuffle => ("Shuffle mode", "Shuffle all"),
        Mode::Pick => ("Pick mode", "Pick one by one"),
    };
    let class = if current == mode {
        "mode active"
    } else {
        "mode"
    };
    html! {
        button class=(class) type="submit" name="action" value=(value) { (label) }
    }
}

fn render_shuffle(session: &Session) -> Markup {
    html! {
        div.shuffle {
            form action="/" method="post" {
                button #shuffle type="submit" name="action" value="Shuffle" { "Shuffle again" }
            }
            ul.names {
                @for (index, name) in session.roster().iter().enumerate() {
                    li { (index + 1) ". " (name) }
                }
            }
        }
    }
}

fn render_pick(session: &Session) -> Markup {
    let label = if session.is_drawing() {
        "Drawing..."
    } else {
        "Draw next"
    };
    html! {
        div.pick {
            form.pick-controls action="/" method="post" {
                @if session.can_draw() {
                    button #draw type="submit" name="action" value="Draw" { (label) }
                } @else {
                    button #draw type="submit" name="action" value="Draw" disabled { (label) }
                }
                button #reset type="submit" name="action" value="Reset" { "Reset" }
            }
            h3 { "Drawn (" (session.selected().len()) "):" }
            ul.names.selected {
                @for (index, name) in session.selected().iter().enumerate() {
                    li { (index + 1) ". " (name) }
                }
            }
            h3 { "Remaining (" (session.remaining().len()) "):" }
            ul.names.remaining {
                @for name in session.remaining() {
                    li { (name) }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rollcall_core::rng::TinyRng;
    use rollcall_core::session::Event;
    use rollcall_core::session::update;

    use super::*;

    fn session_with(names: &str, mode: Mode) -> Session {
        let mut rng = TinyRng::from_seed(0);
        let (s, _) = update(Session::new(), Event::Edit(names.to_string()), &mut rng);
        let (s, _) = update(s, Event::Submit, &mut rng);
        update(s, Event::SetMode(mode), &mut rng).0
    }

    #[test]
    fn test_empty_session_has_no_results() {
        let html = render_session(&Session::new()).into_string();
        assert!(html.contains("Update roster"));
        assert!(!html.contains("Results"));
    }

    #[test]
    fn test_shuffle_view() {
        let html = render_session(&session_with("Alice\nBob", Mode::Shuffle)).into_string();
        assert!(html.contains("<li>1. Alice</li>"));
        assert!(html.contains("<li>2. Bob</li>"));
        assert!(html.contains("Shuffle again"));
        assert!(!html.contains("Draw next"));
    }

    #[test]
    fn test_pick_view() {
        let html = render_session(&session_with("Alice\nBob", Mode::Pick)).into_string();
        assert!(html.contains("Drawn (0):"));
        assert!(html.contains("Remaining (2):"));
        assert!(html.contains("Draw next"));
        assert!(!html.contains("disabled"));
    }

    #[test]
    fn test_pick_view_while_drawing() {
        let mut rng = TinyRng::from_seed(0);
        let (s, _) = update(session_with("Alice", Mode::Pick), Event::Draw, &mut rng);
        let html = render_session(&s).into_string();
        assert!(html.contains("Drawing..."));
        assert!(html.contains("disabled"));
    }

    #[test]
    fn test_names_are_escaped() {
        let html = render_session(&session_with("<b>Eve</b>", Mode::Shuffle)).into_string();
        assert!(html.contains("&lt;b&gt;Eve&lt;/b&gt;"));
        assert!(!html.contains("<b>Eve</b>"));
    }
}
