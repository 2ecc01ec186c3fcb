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

use std::process::exit;

use clap::Parser;
use rollcall_core::error::Fallible;
use tokio::spawn;

use crate::cmd::draw::draw_names;
use crate::cmd::serve::server::ServerConfig;
use crate::cmd::serve::server::start_server;
use crate::cmd::shuffle::shuffle_names;
use crate::config::ServerSection;
use crate::config::load_config;
use crate::utils::clock_seed;
use crate::utils::read_names;
use crate::utils::wait_for_server;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Shuffle and draw names through a web interface.
    Serve {
        /// File with one name per line to load at startup.
        #[arg(long)]
        names: Option<String>,
        /// Path to a config file. By default, `rollcall.toml` in the current directory is used if it exists.
        #[arg(long)]
        config: Option<String>,
        /// The host address to bind to. Default is 127.0.0.1.
        #[arg(long)]
        host: Option<String>,
        /// The port to use for the web server. Default is 8000.
        #[arg(long)]
        port: Option<u16>,
        /// How long a draw takes, in milliseconds. Default is 500.
        #[arg(long)]
        draw_delay_ms: Option<u64>,
        /// Whether to open the browser automatically. Default is true.
        #[arg(long)]
        open_browser: Option<bool>,
    },
    /// Print a list of names in a random order.
    Shuffle {
        /// File with one name per line. By default, names are read from standard input.
        names: Option<String>,
        /// Seed for the random number generator, for reproducible output.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Draw names one at a time without replacement.
    Draw {
        /// File with one name per line. By default, names are read from standard input.
        names: Option<String>,
        /// How many names to draw. By default, all of them are drawn.
        #[arg(long)]
        count: Option<usize>,
        /// Seed for the random number generator, for reproducible output.
        #[arg(long)]
        seed: Option<u64>,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Serve {
            names,
            config,
            host,
            port,
            draw_delay_ms,
            open_browser,
        } => {
            let flags = ServerSection {
                host,
                port,
                draw_delay_ms,
                open_browser,
                names,
            };
            let settings = flags.or(load_config(config)?.server);
            let names = match &settings.names {
                Some(path) => Some(read_names(Some(path.as_str()))?),
                None => None,
            };
            let host = settings.host();
            let port = settings.port();
            if settings.open_browser() {
                // Start a separate task to open the browser once the server is up.
                let browser_host = host.clone();
                spawn(async move {
                    match wait_for_server(&browser_host, port).await {
                        Ok(_) => {
                            let _ = open::that(format!("http://{browser_host}:{port}/"));
                        }
                        Err(e) => {
                            eprintln!("Failed to connect to server: {e}");
                            exit(-1)
                        }
                    }
                });
            }
            let config = ServerConfig {
                host,
                port,
                draw_delay: settings.draw_delay(),
                names,
                seed: clock_seed(),
            };
            start_server(config).await
        }
        Command::Shuffle { names, seed } => shuffle_names(names, seed),
        Command::Draw { names, count, seed } => draw_names(names, count, seed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_names_flag() {
        let cli = Command::try_parse_from(["rollcall", "serve", "--names", "class.txt"]).unwrap();
        match cli {
            Command::Serve { names, .. } => assert_eq!(names.as_deref(), Some("class.txt")),
            _ => panic!("expected the serve command"),
        }
    }

    #[test]
    fn test_serve_names_not_positional() {
        let result = Command::try_parse_from(["rollcall", "serve", "class.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_draw_positional_names() {
        let args = ["rollcall", "draw", "class.txt", "--count", "2"];
        let cli = Command::try_parse_from(args).unwrap();
        match cli {
            Command::Draw { names, count, seed } => {
                assert_eq!(names.as_deref(), Some("class.txt"));
                assert_eq!(count, Some(2));
                assert_eq!(seed, None);
            }
            _ => panic!("expected the draw command"),
        }
    }
}
