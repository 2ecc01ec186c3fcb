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

mod get;
mod post;
pub mod server;
mod state;
mod template;

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use portpicker::pick_unused_port;
    use reqwest::StatusCode;
    use rollcall_core::error::Fallible;
    use rollcall_core::session::Mode;
    use rollcall_core::session::Snapshot;
    use tokio::spawn;
    use tokio::time::sleep;

    use crate::cmd::serve::server::ServerConfig;
    use crate::cmd::serve::server::start_server;
    use crate::utils::wait_for_server;

    const TEST_HOST: &str = "127.0.0.1";

    fn test_config(port: u16, draw_delay_ms: u64, names: Option<&str>) -> ServerConfig {
        ServerConfig {
            host: TEST_HOST.to_string(),
            port,
            draw_delay: Duration::from_millis(draw_delay_ms),
            names: names.map(String::from),
            seed: 42,
        }
    }

    async fn start(draw_delay_ms: u64, names: Option<&str>) -> Fallible<u16> {
        let port = pick_unused_port().unwrap();
        let config = test_config(port, draw_delay_ms, names);
        spawn(async move { start_server(config).await });
        wait_for_server(TEST_HOST, port).await?;
        Ok(port)
    }

    async fn action(port: u16, action: &str) -> Fallible<String> {
        let response = reqwest::Client::new()
            .post(format!("http://{TEST_HOST}:{port}/"))
            .form(&[("action", action)])
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
        Ok(response.text().await.unwrap())
    }

    async fn snapshot(port: u16) -> Fallible<Snapshot> {
        let response = reqwest::get(format!("http://{TEST_HOST}:{port}/state.json"))
            .await
            .unwrap();
        assert!(response.status().is_success());
        let text = response.text().await.unwrap();
        Ok(serde_json::from_str(&text)?)
    }

    fn sorted(v: &[String]) -> Vec<String> {
        let mut v = v.to_vec();
        v.sort();
        v
    }

    #[tokio::test]
    async fn test_start_server_on_used_port() -> Fallible<()> {
        let port = start(500, None).await?;
        let result = start_server(test_config(port, 500, None)).await;
        assert!(result.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_static_endpoints() -> Fallible<()> {
        let port = start(500, None).await?;

        // Hit the `style.css` endpoint.
        let response = reqwest::get(format!("http://{TEST_HOST}:{port}/style.css"))
            .await
            .unwrap();
        assert!(response.status().is_success());
        assert_eq!(response.headers().get("content-type").unwrap(), "text/css");

        // Hit the `script.js` endpoint.
        let response = reqwest::get(format!("http://{TEST_HOST}:{port}/script.js"))
            .await
            .unwrap();
        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/javascript"
        );
        let script = response.text().await.unwrap();
        assert!(script.starts_with("const DRAW_DELAY_MS = 500;"));

        // Hit the not found endpoint.
        let response = reqwest::get(format!("http://{TEST_HOST}:{port}/herp-derp"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        // Hit the root endpoint.
        let response = reqwest::get(format!("http://{TEST_HOST}:{port}/"))
            .await
            .unwrap();
        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/html; charset=utf-8"
        );
        let html = response.text().await.unwrap();
        assert!(html.contains("Update roster"));
        assert!(!html.contains("Results"));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_roster() -> Fallible<()> {
        let port = start(500, None).await?;
        let response = reqwest::Client::new()
            .post(format!("http://{TEST_HOST}:{port}/"))
            .form(&[("action", "Update"), ("names", "  Alice\n\nBob\r\nCarol\n")])
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
        let html = response.text().await.unwrap();
        assert!(html.contains("1. Alice"));
        assert!(html.contains("3. Carol"));

        let state = snapshot(port).await?;
        assert_eq!(state.roster, ["Alice", "Bob", "Carol"]);
        assert_eq!(state.remaining, state.roster);
        assert!(state.selected.is_empty());
        assert_eq!(state.mode, Mode::Shuffle);
        Ok(())
    }

    #[tokio::test]
    async fn test_shuffle() -> Fallible<()> {
        let port = start(500, Some("Alice\nBob\nCarol\nDave")).await?;
        let html = action(port, "Shuffle").await?;
        assert!(html.contains("Shuffle again"));
        let state = snapshot(port).await?;
        assert_eq!(sorted(&state.roster), ["Alice", "Bob", "Carol", "Dave"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_mode_switch() -> Fallible<()> {
        let port = start(500, Some("Alice\nBob")).await?;
        let html = action(port, "Pick mode").await?;
        assert!(html.contains("Drawn (0):"));
        assert!(html.contains("Remaining (2):"));
        assert_eq!(snapshot(port).await?.mode, Mode::Pick);

        let html = action(port, "Shuffle mode").await?;
        assert!(html.contains("Shuffle again"));
        assert_eq!(snapshot(port).await?.mode, Mode::Shuffle);
        Ok(())
    }

    #[tokio::test]
    async fn test_draw_all() -> Fallible<()> {
        let port = start(10, Some("Alice\nBob\nCarol")).await?;
        action(port, "Pick mode").await?;
        for i in 1..=3 {
            action(port, "Draw").await?;
            sleep(Duration::from_millis(200)).await;
            let state = snapshot(port).await?;
            assert!(!state.drawing);
            assert_eq!(state.selected.len(), i);
            assert_eq!(state.remaining.len(), 3 - i);
        }
        let state = snapshot(port).await?;
        assert_eq!(sorted(&state.selected), ["Alice", "Bob", "Carol"]);

        // The pool is empty: drawing again does nothing.
        let html = action(port, "Draw").await?;
        assert!(html.contains("disabled"));
        let state = snapshot(port).await?;
        assert!(!state.drawing);
        assert_eq!(state.selected.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_draw_while_drawing() -> Fallible<()> {
        let port = start(300, Some("Alice\nBob\nCarol")).await?;
        action(port, "Pick mode").await?;
        let html = action(port, "Draw").await?;
        assert!(html.contains("Drawing..."));
        assert!(html.contains("data-drawing=\"true\""));
        action(port, "Draw").await?;
        let state = snapshot(port).await?;
        assert!(state.drawing);
        assert!(state.selected.is_empty());
        sleep(Duration::from_millis(800)).await;
        let state = snapshot(port).await?;
        assert!(!state.drawing);
        assert_eq!(state.selected.len(), 1);
        assert_eq!(state.remaining.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_reset() -> Fallible<()> {
        let port = start(10, Some("Alice\nBob\nCarol")).await?;
        action(port, "Draw").await?;
        sleep(Duration::from_millis(200)).await;
        assert_eq!(snapshot(port).await?.selected.len(), 1);
        action(port, "Reset").await?;
        let state = snapshot(port).await?;
        assert_eq!(state.remaining, state.roster);
        assert!(state.selected.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_reset_while_drawing() -> Fallible<()> {
        let port = start(300, Some("Alice\nBob\nCarol")).await?;
        action(port, "Draw").await?;
        action(port, "Reset").await?;
        sleep(Duration::from_millis(800)).await;
        let state = snapshot(port).await?;
        assert!(!state.drawing);
        assert!(state.selected.is_empty());
        assert_eq!(state.remaining, state.roster);
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_action() -> Fallible<()> {
        let port = start(500, None).await?;
        let response = reqwest::Client::new()
            .post(format!("http://{TEST_HOST}:{port}/"))
            .form(&[("action", "Derp")])
            .send()
            .await
            .unwrap();
        assert!(response.status().is_client_error());
        Ok(())
    }

    #[tokio::test]
    async fn test_shutdown() -> Fallible<()> {
        let port = pick_unused_port().unwrap();
        let config = test_config(port, 500, None);
        let server = spawn(async move { start_server(config).await });
        wait_for_server(TEST_HOST, port).await?;
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap();
        let response = client
            .post(format!("http://{TEST_HOST}:{port}/"))
            .form(&[("action", "Shutdown")])
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        drop(response);
        drop(client);
        let result = server.await.unwrap();
        assert!(result.is_ok());
        Ok(())
    }
}
