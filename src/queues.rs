//! Pending remediation commands queued for a device.
//!
//! The console exposes each device's upcoming work as a queue of
//! [`QueuedCommand`] entries: a command type name, an opaque argument
//! string (its shape depends on the command type), and the scheduled
//! execution time.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::client::AutomoxClient;
use crate::scalars;
use crate::servers::SERVERS_PATH;

/// A remediation action scheduled for future execution on a device.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueuedCommand {
    /// Command type (e.g. `"InstallUpdate"`, `"Reboot"`).
    #[serde(default)]
    pub command_type_name: String,

    /// Opaque argument string; interpretation depends on the command type.
    #[serde(default)]
    pub args: String,

    /// When the device is scheduled to execute the command.
    #[serde(default, deserialize_with = "scalars::automox_time")]
    pub exec_time: Option<DateTime<Utc>>,
}

/// Retrieves the queue of upcoming commands for a device.
///
/// # Errors
///
/// - `AutomoxError::Api` — non-2xx status, with the console's message list.
/// - `AutomoxError::Network` — transport-level failure.
/// - `AutomoxError::Decode` — response body did not match the schema.
pub async fn get_server_command_queue(
    client: &AutomoxClient,
    server_id: i64,
) -> crate::error::Result<Vec<QueuedCommand>> {
    client
        .get_json(&format!("{SERVERS_PATH}/{server_id}/queues"))
        .await
}
