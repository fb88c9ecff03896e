use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::market::DEFAULT_API_URL;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub debounce_ms: u64,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            api_url: String::from(DEFAULT_API_URL),
            debounce_ms: 300,
        }
    }
}

impl Config {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            " api url: {} \n search debounce: {}ms",
            self.api_url, self.debounce_ms
        )
    }
}
