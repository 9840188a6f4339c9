//! JSON envelope shared by every `--format json` command.

use serde::Serialize;
use ulid::Ulid;

pub const ENVELOPE_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Miss,
    Error,
}

#[derive(Debug, Serialize)]
pub struct Envelope<'a, T: Serialize> {
    pub envelope_version: &'static str,
    pub ts: String,
    pub event_id: String,
    pub cmd: &'a str,
    pub status: Status,
    #[serde(flatten)]
    pub body: T,
}

impl<'a, T: Serialize> Envelope<'a, T> {
    pub fn new(cmd: &'a str, status: Status, body: T) -> Self {
        Self {
            envelope_version: ENVELOPE_VERSION,
            ts: now_epoch_z(),
            event_id: Ulid::new().to_string(),
            cmd,
            status,
            body,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|e| {
            serde_json::json!({ "cmd": self.cmd, "status": "error", "error": e.to_string() })
        })
    }
}

/// Unix-epoch seconds with a `Z` suffix (e.g. `1771220592Z`).
pub fn now_epoch_z() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("{}Z", secs)
}
