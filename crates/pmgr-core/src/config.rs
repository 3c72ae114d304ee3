// ── Runtime session configuration ──
//
// Describes how to reach the Pmgr service. Built by the consumer
// (CLI, UI glue) and handed to `Session::connect` -- core never reads
// config files.

use std::time::Duration;

/// Configuration for one service connection.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Service root, trailing slash required (e.g. `http://localhost:8080/api/`).
    pub url: String,
    /// Transport-level request timeout.
    pub timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8080/api/".into(),
            timeout: Duration::from_secs(30),
        }
    }
}
