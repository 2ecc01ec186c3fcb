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

use std::path::Path;
use std::time::Duration;

use rollcall_core::DEFAULT_DRAW_DELAY_MS;
use rollcall_core::error::Fallible;
use rollcall_core::error::fail;
use serde::Deserialize;

/// Name of the config file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "rollcall.toml";

pub const DEFAULT_HOST: &str = "127.0.0.1";

pub const DEFAULT_PORT: u16 = 8000;

/// Contents of a `rollcall.toml` file.
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub server: ServerSection,
}

/// Settings for `rollcall serve`. Every field is optional: command-line flags
/// take precedence, then the config file, then the built-in defaults.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub draw_delay_ms: Option<u64>,
    pub open_browser: Option<bool>,
    /// Path to a file with one name per line, loaded at startup.
    pub names: Option<String>,
}

impl ServerSection {
    /// Fill in any unset fields from `fallback`.
    pub fn or(self, fallback: ServerSection) -> ServerSection {
        ServerSection {
            host: self.host.or(fallback.host),
            port: self.port.or(fallback.port),
            draw_delay_ms: self.draw_delay_ms.or(fallback.draw_delay_ms),
            open_browser: self.open_browser.or(fallback.open_browser),
            names: self.names.or(fallback.names),
        }
    }

    pub fn host(&self) -> String {
        self.host
            .clone()
            .unwrap_or_else(|| DEFAULT_HOST.to_string())
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn draw_delay(&self) -> Duration {
        Duration::from_millis(self.draw_delay_ms.unwrap_or(DEFAULT_DRAW_DELAY_MS))
    }

    pub fn open_browser(&self) -> bool {
        self.open_browser.unwrap_or(true)
    }
}

pub fn parse_config(text: &str) -> Fallible<ConfigFile> {
    let config: ConfigFile = toml::from_str(text)?;
    Ok(config)
}

/// Load the config file at `path`. Without a path, `rollcall.toml` in the
/// current directory is used if it exists.
pub fn load_config(path: Option<String>) -> Fallible<ConfigFile> {
    match path {
        Some(path) => {
            if !Path::new(&path).exists() {
                return fail("config file does not exist.");
            }
            log::debug!("Loading config from {path}");
            parse_config(&std::fs::read_to_string(path)?)
        }
        None => {
            let path = Path::new(DEFAULT_CONFIG_FILE);
            if path.is_file() {
                log::debug!("Loading config from {DEFAULT_CONFIG_FILE}");
                parse_config(&std::fs::read_to_string(path)?)
            } else {
                Ok(ConfigFile::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use rollcall_core::ErrorReport;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_empty_config() -> Fallible<()> {
        let config = parse_config("")?;
        assert_eq!(config, ConfigFile::default());
        assert_eq!(config.server.host(), "127.0.0.1");
        assert_eq!(config.server.port(), 8000);
        assert_eq!(config.server.draw_delay(), Duration::from_millis(500));
        assert!(config.server.open_browser());
        Ok(())
    }

    #[test]
    fn test_full_config() -> Fallible<()> {
        let text = r#"
[server]
host = "0.0.0.0"
port = 9000
draw_delay_ms = 250
open_browser = false
names = "class.txt"
"#;
        let config = parse_config(text)?;
        assert_eq!(config.server.host(), "0.0.0.0");
        assert_eq!(config.server.port(), 9000);
        assert_eq!(config.server.draw_delay(), Duration::from_millis(250));
        assert!(!config.server.open_browser());
        assert_eq!(config.server.names.as_deref(), Some("class.txt"));
        Ok(())
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = parse_config("[server]\nprot = 9000\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_type_rejected() {
        let result = parse_config("[server]\nport = \"high\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_flags_override_file() {
        let flags = ServerSection {
            port: Some(1234),
            ..ServerSection::default()
        };
        let file = ServerSection {
            host: Some("0.0.0.0".to_string()),
            port: Some(9000),
            ..ServerSection::default()
        };
        let merged = flags.or(file);
        assert_eq!(merged.port(), 1234);
        assert_eq!(merged.host(), "0.0.0.0");
        assert_eq!(merged.draw_delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_load_missing_config() {
        let result = load_config(Some("./derpherp.toml".to_string()));
        assert_eq!(result, Err(ErrorReport::new("config file does not exist.")));
    }

    #[test]
    fn test_load_config_file() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("rollcall.toml");
        write(&path, "[server]\nport = 8123\n")?;
        let config = load_config(Some(path.display().to_string()))?;
        assert_eq!(config.server.port(), 8123);
        Ok(())
    }
}
