//! Server inventory for the Automox console API.
//!
//! This module covers the device-inventory half of the `servers` endpoint
//! family:
//!
//! - [`list_servers`] — retrieve every managed device the token can see.
//! - [`get_server`] — retrieve a single device by its numeric ID.
//!
//! The response type [`Server`] mirrors the console's JSON schema
//! field-for-field, including nested hardware detail (whose wire keys are
//! UPPER_SNAKE), policy status, compatibility checks, and the status
//! roll-up. Fields the console omits for a given device decode to their
//! defaults; unknown fields are ignored for forward compatibility.
//!
//! Timestamps use the console's colon-less offset layout and numeric
//! `uptime` may arrive quoted — see [`crate::scalars`].

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

use crate::client::AutomoxClient;
use crate::scalars;

pub(crate) const SERVERS_PATH: &str = "api/servers";

// ── Entity types ───────────────────────────────────────────────────────

/// A managed device's inventory and compliance snapshot.
///
/// One record per endpoint device; produced fresh on every fetch. Every
/// field carries `#[serde(default)]` so sparse responses (devices that
/// have not reported yet, trimmed list payloads) still decode.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Server {
    /// Numeric device ID assigned by the console.
    #[serde(default)]
    pub id: i64,

    /// Stable device UUID.
    #[serde(default)]
    pub uuid: String,

    /// Hostname as reported by the agent.
    #[serde(default)]
    pub name: String,

    /// Name shown in the console UI.
    #[serde(default)]
    pub display_name: String,

    /// Operator-assigned override name, empty when unset.
    #[serde(default)]
    pub custom_name: String,

    /// Installed agent version string.
    #[serde(default)]
    pub agent_version: String,

    /// OS family (e.g. `"Windows"`, `"Mac"`, `"Linux"`).
    #[serde(default)]
    pub os_family: String,

    /// OS product name (e.g. `"Ubuntu"`, `"Windows 10 Pro"`).
    #[serde(default)]
    pub os_name: String,

    /// OS version string.
    #[serde(default)]
    pub os_version: String,

    /// Console-internal numeric ID for the OS version.
    #[serde(default)]
    pub os_version_id: i64,

    /// Whether the device currently meets all attached policies.
    #[serde(default)]
    pub compliant: bool,

    /// Whether the agent has an active connection to the console.
    #[serde(default)]
    pub connected: bool,

    /// Whether the device has been soft-deleted in the console.
    #[serde(default)]
    pub deleted: bool,

    /// Whether the device is excluded from compliance reporting.
    #[serde(default)]
    pub exception: bool,

    /// Whether work is pending for the device.
    #[serde(default)]
    pub pending: bool,

    /// Whether the device needs operator attention.
    #[serde(default)]
    pub needs_attention: bool,

    /// Whether a reboot is required to finish patching.
    #[serde(default)]
    pub needs_reboot: bool,

    /// Whether the most recent scan failed.
    #[serde(default)]
    pub last_scan_failed: bool,

    /// Whether the device passes the agent's compatibility checks.
    #[serde(default)]
    pub is_compatible: bool,

    /// Patch install delayed by a pending user notification.
    #[serde(default)]
    pub is_delayed_by_notification: bool,

    /// Patch install delayed by an explicit user deferral.
    #[serde(default)]
    pub is_delayed_by_user: bool,

    /// Reboot delayed by a pending user notification.
    #[serde(default)]
    pub reboot_is_delayed_by_notification: bool,

    /// Reboot delayed by an explicit user deferral.
    #[serde(default)]
    pub reboot_is_delayed_by_user: bool,

    /// Total patches applied to date.
    #[serde(default)]
    pub patches: i64,

    /// Patches currently waiting to be applied.
    #[serde(default)]
    pub pending_patches: i64,

    /// How many times patching has been deferred.
    #[serde(default)]
    pub patch_deferral_count: i64,

    /// How many times a reboot has been deferred.
    #[serde(default)]
    pub reboot_deferral_count: i64,

    /// Outstanding patch notifications shown to the user.
    #[serde(default)]
    pub notification_count: i64,

    /// Outstanding reboot notifications shown to the user.
    #[serde(default)]
    pub reboot_notification_count: i64,

    /// Agent check-in interval in minutes.
    #[serde(default)]
    pub refresh_interval: i64,

    /// Organization that owns the device.
    #[serde(default)]
    pub organization_id: i64,

    /// Directory organizational unit, empty when not domain-joined.
    #[serde(default)]
    pub organizational_unit: String,

    /// Server group the device belongs to.
    #[serde(default)]
    pub server_group_id: i64,

    /// Cloud instance ID when the device is a cloud VM.
    #[serde(default)]
    pub instance_id: String,

    /// Hardware serial number.
    #[serde(default)]
    pub serial_number: String,

    /// IANA timezone reported by the agent.
    #[serde(default)]
    pub timezone: String,

    /// Last interactive user, as `DOMAIN\user` or plain username.
    #[serde(default)]
    pub last_logged_in_user: String,

    /// Public IP addresses observed for the device.
    #[serde(default)]
    pub ip_addrs: Vec<String>,

    /// Private IP addresses reported by the agent.
    #[serde(default)]
    pub ip_addrs_private: Vec<String>,

    /// Operator-assigned tags. The console leaves the element shape
    /// unspecified, so the raw JSON is preserved.
    #[serde(default)]
    pub tags: Vec<Value>,

    /// Raw command history entries attached to the record.
    #[serde(default)]
    pub commands: Vec<Value>,

    /// Seconds since last boot. May arrive as a quoted string.
    #[serde(default, deserialize_with = "scalars::quoted_i64")]
    pub uptime: i64,

    /// Total records in the collection, populated on list responses.
    #[serde(default)]
    pub total_count: i64,

    /// When the console first registered the device.
    #[serde(default, deserialize_with = "scalars::automox_time")]
    pub create_time: Option<DateTime<Utc>>,

    /// Last time the agent disconnected.
    #[serde(default, deserialize_with = "scalars::automox_time")]
    pub last_disconnect_time: Option<DateTime<Utc>>,

    /// Last time the agent processed work.
    #[serde(default, deserialize_with = "scalars::automox_time")]
    pub last_process_time: Option<DateTime<Utc>>,

    /// Last full inventory refresh.
    #[serde(default, deserialize_with = "scalars::automox_time")]
    pub last_refresh_time: Option<DateTime<Utc>>,

    /// Last record update in the console.
    #[serde(default, deserialize_with = "scalars::automox_time")]
    pub last_update_time: Option<DateTime<Utc>>,

    /// Next scheduled patch window, `None` when nothing is scheduled.
    #[serde(default, deserialize_with = "scalars::automox_time")]
    pub next_patch_time: Option<DateTime<Utc>>,

    /// Agent compatibility check flags.
    #[serde(default)]
    pub compatibility_checks: CompatibilityChecks,

    /// Nested hardware inventory reported by the agent.
    #[serde(default)]
    pub detail: HardwareDetail,

    /// Evaluation results for each policy attached to the device.
    #[serde(default)]
    pub policy_status: Vec<PolicyStatus>,

    /// Policies attached to the device, with their configuration.
    #[serde(default)]
    pub server_policies: Vec<ServerPolicy>,

    /// Roll-up of device, agent, and policy status.
    #[serde(default)]
    pub status: StatusSummary,
}

/// Agent compatibility check flags. All false on a healthy device.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompatibilityChecks {
    /// macOS App Store connectivity is broken.
    #[serde(default)]
    pub app_store_disconnected: bool,
    /// macOS secure token is missing for the agent account.
    #[serde(default)]
    pub missing_secure_token: bool,
    /// Not enough free disk space to stage patches.
    #[serde(default)]
    pub low_diskspace: bool,
}

/// Hardware inventory nested under a server record.
///
/// The console renders this block with UPPER_SNAKE wire keys, unlike the
/// rest of the schema. Free-form OS- and vendor-specific entries are kept
/// as raw JSON.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct HardwareDetail {
    /// CPU model string.
    #[serde(default)]
    pub cpu: String,
    /// Installed RAM, as a human-readable string (e.g. `"17179869184"`).
    #[serde(default)]
    pub ram: String,
    /// Hardware model name.
    #[serde(default)]
    pub model: String,
    /// Hardware serial number.
    #[serde(default)]
    pub serial: String,
    /// Hardware vendor.
    #[serde(default)]
    pub vendor: String,
    /// Firmware or OS build version.
    #[serde(default)]
    pub version: String,
    /// Vendor service tag; shape varies by vendor.
    #[serde(default)]
    pub servicetag: Value,
    /// Fully qualified domain names for the device.
    #[serde(default)]
    pub fqdns: Vec<String>,
    /// IP addresses at inventory time.
    #[serde(default)]
    pub ips: Vec<String>,
    /// Raw physical disk entries.
    #[serde(default)]
    pub disks: Vec<Value>,
    /// macOS account holding the secure token, empty elsewhere.
    #[serde(default)]
    pub secure_token_account: String,
    /// Active Directory distinguished name, absent off-domain.
    #[serde(default)]
    pub distinguished_name: Value,
    /// Windows Server Update Services configuration, Windows only.
    #[serde(default)]
    pub wsus_config: Value,
    /// WMI integrity check result, Windows only.
    #[serde(default)]
    pub wmi_integrity_check: Value,
    /// PowerShell version, Windows only.
    #[serde(default)]
    pub ps_version: Value,
    /// Update source reachability check.
    #[serde(default)]
    pub update_source_check: UpdateSourceCheck,
    /// Most recent interactive logon.
    #[serde(default)]
    pub last_user_logon: LastUserLogon,
    /// OS auto-update configuration.
    #[serde(default)]
    pub auto_update_options: AutoUpdateOptions,
    /// Network interfaces.
    #[serde(default)]
    pub nics: Vec<Nic>,
    /// Disk volumes.
    #[serde(default)]
    pub volume: Vec<Volume>,
}

/// Reachability of the OS update source, reported as strings by the agent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct UpdateSourceCheck {
    /// `"true"`/`"false"` reachability flag.
    #[serde(default)]
    pub connected: String,
    /// Error detail when the source is unreachable, empty otherwise.
    #[serde(default)]
    pub error: String,
}

/// Most recent interactive logon on the device.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct LastUserLogon {
    /// Account name of the logon.
    #[serde(default)]
    pub user: String,
    /// Logon time, as the agent's free-form string.
    #[serde(default)]
    pub time: String,
    /// Logon source (console, tty, RDP session).
    #[serde(default)]
    pub src: String,
}

/// OS auto-update configuration, reported as strings by the agent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct AutoUpdateOptions {
    /// Raw options string from the OS updater.
    #[serde(default)]
    pub options: String,
    /// `"0"`/`"1"` enabled flag.
    #[serde(default)]
    pub enabled: String,
}

/// A network interface in the hardware inventory.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Nic {
    /// Addresses bound to the interface.
    #[serde(default)]
    pub ips: Vec<String>,
    /// Whether the link is up.
    #[serde(default)]
    pub connected: bool,
    /// Interface vendor.
    #[serde(default)]
    pub vendor: String,
    /// OS device name (e.g. `"ens160"`).
    #[serde(default)]
    pub device: String,
    /// Interface type (e.g. `"Ethernet"`, `"Wireless"`).
    #[serde(default, rename = "TYPE")]
    pub nic_type: String,
    /// Hardware MAC address.
    #[serde(default)]
    pub mac: String,
}

/// A disk volume in the hardware inventory.
///
/// Sizes and the system-disk flag arrive as strings, matching the agent's
/// report format.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Volume {
    /// Mount point or drive label.
    #[serde(default)]
    pub label: String,
    /// Total capacity in bytes, string-encoded.
    #[serde(default)]
    pub avail: String,
    /// Free space in bytes, string-encoded.
    #[serde(default)]
    pub free: String,
    /// `"true"` when this volume holds the OS.
    #[serde(default)]
    pub is_system_disk: String,
    /// Underlying device path or volume identifier.
    #[serde(default)]
    pub volume: String,
    /// Filesystem type (e.g. `"ext4"`, `"NTFS"`).
    #[serde(default)]
    pub fstype: String,
}

/// Evaluation result for one policy attached to a device.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PolicyStatus {
    /// Row ID for this policy-on-device evaluation.
    #[serde(default)]
    pub id: i64,
    /// Organization that owns the policy.
    #[serde(default)]
    pub organization_id: i64,
    /// The evaluated policy.
    #[serde(default)]
    pub policy_id: i64,
    /// The evaluated device.
    #[serde(default)]
    pub server_id: i64,
    /// Policy name at evaluation time.
    #[serde(default)]
    pub policy_name: String,
    /// Policy kind (e.g. `"patch"`, `"custom"`, `"required_software"`).
    #[serde(default)]
    pub policy_type_name: String,
    /// Numeric status code from the console.
    #[serde(default)]
    pub status: i64,
    /// Result payload of the last evaluation, as a raw string.
    #[serde(default)]
    pub result: String,
    /// When this evaluation was recorded.
    #[serde(default, deserialize_with = "scalars::automox_time")]
    pub create_time: Option<DateTime<Utc>>,
    /// Next scheduled remediation, `None` when nothing is scheduled.
    #[serde(default, deserialize_with = "scalars::automox_time")]
    pub next_remediation: Option<DateTime<Utc>>,
    /// Whether the next remediation will reboot the device.
    #[serde(default)]
    pub will_reboot: bool,
    /// Work items pending for this policy.
    #[serde(default)]
    pub pending_count: i64,
}

/// A policy attached to a device, including its schedule and
/// notification/deferral configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerPolicy {
    /// Policy ID.
    #[serde(default)]
    pub id: i64,
    /// Policy name.
    #[serde(default)]
    pub name: String,
    /// Organization that owns the policy.
    #[serde(default)]
    pub organization_id: i64,
    /// Policy kind (e.g. `"patch"`, `"custom"`).
    #[serde(default)]
    pub policy_type_name: String,
    /// Operator notes attached to the policy.
    #[serde(default)]
    pub notes: String,
    /// Result payload of the last run, as a raw string.
    #[serde(default)]
    pub result: String,
    /// Numeric status code from the console.
    #[serde(default)]
    pub status: i64,
    /// When the policy was created.
    #[serde(default, deserialize_with = "scalars::automox_time")]
    pub create_time: Option<DateTime<Utc>>,
    /// Next scheduled remediation, `None` when nothing is scheduled.
    #[serde(default, deserialize_with = "scalars::automox_time")]
    pub next_remediation: Option<DateTime<Utc>>,
    /// Bitmask of scheduled weekdays.
    #[serde(default)]
    pub schedule_days: i64,
    /// Bitmask of scheduled months.
    #[serde(default)]
    pub schedule_months: i64,
    /// Scheduled time of day, as `"HH:MM"`.
    #[serde(default)]
    pub schedule_time: String,
    /// Bitmask of scheduled weeks within the month.
    #[serde(default)]
    pub schedule_weeks_of_month: i64,
    /// Devices this policy applies to.
    #[serde(default)]
    pub server_count: i64,
    /// Server group IDs the policy targets.
    #[serde(default)]
    pub server_groups: Vec<i64>,
    /// Patch/reboot/notification configuration block.
    #[serde(default)]
    pub configuration: PolicyConfiguration,
}

/// Patch, reboot, notification, and deferral configuration for a policy.
///
/// The console exposes the whole block on every attached policy; most
/// deployments leave the custom-notification fields empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PolicyConfiguration {
    /// Whether patches install automatically.
    #[serde(default)]
    pub auto_patch: bool,
    /// Which patches the policy applies (e.g. `"all"`, `"filter"`).
    #[serde(default)]
    pub patch_rule: String,
    /// Whether the device reboots automatically after patching.
    #[serde(default)]
    pub auto_reboot: bool,
    /// How the patch filter list is interpreted.
    #[serde(default)]
    pub filter_type: String,
    /// Whether the user is notified before patching.
    #[serde(default)]
    pub notify_user: bool,
    /// Raw device filter expressions.
    #[serde(default)]
    pub device_filters: Vec<Value>,
    /// Whether optional updates are included.
    #[serde(default)]
    pub include_optional: bool,
    /// Whether the user is notified before a reboot.
    #[serde(default)]
    pub notify_reboot_user: bool,
    /// Whether devices that missed the window patch on next check-in.
    #[serde(default)]
    pub missed_patch_window: bool,
    /// Whether the schedule uses the device's timezone.
    #[serde(default)]
    pub use_scheduled_timezone: bool,
    /// Whether users may defer patch installs.
    #[serde(default)]
    pub install_deferral_enabled: bool,
    /// Whether users are notified about deferred reboots.
    #[serde(default)]
    pub notify_deferred_reboot_user: bool,
    /// Seconds before the patch notification auto-dismisses.
    #[serde(default)]
    pub notify_user_message_timeout: i64,
    /// Maximum times a user may delay the patch notification.
    #[serde(default)]
    pub custom_notification_max_delays: i64,
    /// Whether users may defer pending reboots.
    #[serde(default)]
    pub pending_reboot_deferral_enabled: bool,
    /// Custom patch notification text (Windows).
    #[serde(default)]
    pub custom_notification_patch_message: String,
    /// Whether an unanswered patch notification auto-defers.
    #[serde(default)]
    pub notify_user_auto_deferral_enabled: bool,
    /// Custom reboot notification text (Windows).
    #[serde(default)]
    pub custom_notification_reboot_message: String,
    /// Deferral period choices offered to the user, in hours.
    #[serde(default)]
    pub custom_notification_deferment_periods: Vec<i64>,
    /// Custom patch notification text (macOS).
    #[serde(default)]
    pub custom_notification_patch_message_mac: String,
    /// Custom reboot notification text (macOS).
    #[serde(default)]
    pub custom_notification_reboot_message_mac: String,
    /// Custom pending-reboot notification text (Windows).
    #[serde(default)]
    pub custom_pending_reboot_notification_message: String,
    /// Seconds before the deferred-reboot notification auto-dismisses.
    #[serde(default)]
    pub notify_deferred_reboot_user_message_timeout: i64,
    /// Maximum times a user may delay the pending-reboot notification.
    #[serde(default)]
    pub custom_pending_reboot_notification_max_delays: i64,
    /// Custom pending-reboot notification text (macOS).
    #[serde(default)]
    pub custom_pending_reboot_notification_message_mac: String,
    /// Whether an unanswered deferred-reboot notification auto-defers.
    #[serde(default)]
    pub notify_deferred_reboot_user_auto_deferral_enabled: bool,
    /// Pending-reboot deferral period choices, in hours.
    #[serde(default)]
    pub custom_pending_reboot_notification_deferment_periods: Vec<i64>,
}

/// Per-policy compliance flag inside the status roll-up.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PolicyCompliance {
    /// Policy ID.
    #[serde(default)]
    pub id: i64,
    /// Whether the device meets this policy.
    #[serde(default)]
    pub compliant: bool,
}

/// Roll-up of device, agent, and policy status strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusSummary {
    /// Overall device status (e.g. `"ready"`).
    #[serde(default)]
    pub device_status: String,
    /// Agent connectivity status.
    #[serde(default)]
    pub agent_status: String,
    /// Aggregate policy compliance status.
    #[serde(default)]
    pub policy_status: String,
    /// Per-policy compliance flags.
    #[serde(default)]
    pub policy_statuses: Vec<PolicyCompliance>,
}

// ── Display ────────────────────────────────────────────────────────────

impl fmt::Display for Server {
    /// Renders a human-readable device summary: identity, OS triple,
    /// uptime, key hardware facts, and volume labels.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<16}{}", "ID", self.id)?;
        writeln!(f, "{:<16}{}", "Name", self.name)?;
        writeln!(f, "{:<16}{}", "OsFamily", self.os_family)?;
        writeln!(f, "{:<16}{}", "OsName", self.os_name)?;
        writeln!(f, "{:<16}{}", "OsVersion", self.os_version)?;
        writeln!(f, "{:<16}{}", "OsVersionID", self.os_version_id)?;
        writeln!(f, "{:<16}{}", "Uptime", self.uptime)?;
        writeln!(f, "{:<16}{}", "CPU", self.detail.cpu)?;
        writeln!(f, "{:<16}{}", "RAM", self.detail.ram)?;
        writeln!(f, "{:<16}{}", "LastUserLogon", self.last_logged_in_user)?;
        for (i, volume) in self.detail.volume.iter().enumerate() {
            writeln!(f, "{:<16}{}", format!("Volume {}", i + 1), volume.label)?;
        }
        Ok(())
    }
}

// ── Endpoint functions ─────────────────────────────────────────────────

/// Retrieves all devices reported to the console.
///
/// Known limitation: the call issues a single request and returns whatever
/// the console puts in the first response. If the service paginates
/// natively, only the first page is returned — there is no pagination
/// handling in this client.
///
/// # Errors
///
/// - `AutomoxError::Api` — non-2xx status, with the console's message list.
/// - `AutomoxError::Network` — transport-level failure.
/// - `AutomoxError::Decode` — response body did not match the schema.
pub async fn list_servers(client: &AutomoxClient) -> crate::error::Result<Vec<Server>> {
    client.get_json(SERVERS_PATH).await
}

/// Retrieves a single device by its numeric ID.
///
/// # Errors
///
/// - `AutomoxError::Api` — non-2xx status. A 404 means the ID is unknown
///   or belongs to another organization.
/// - `AutomoxError::Network` — transport-level failure.
/// - `AutomoxError::Decode` — response body did not match the schema.
pub async fn get_server(client: &AutomoxClient, id: i64) -> crate::error::Result<Server> {
    client.get_json(&format!("{SERVERS_PATH}/{id}")).await
}
