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

use maud::DOCTYPE;
use maud::Markup;
use maud::html;

/// Wrap `body` in the page chrome. While a draw is in progress the body is
/// flagged so the script can reload the page once the draw has committed.
pub fn page_template(body: Markup, drawing: bool) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "rollcall" }
                link rel="stylesheet" href="/style.css";
            }
            body data-drawing=(if drawing { "true" } else { "false" }) {
                (body)
                script src="/script.js" {};
            }
        }
    }
}
