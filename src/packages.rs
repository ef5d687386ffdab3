//! Installed-package and patch status for the Automox console API.
//!
//! A [`Package`] is one software unit's patch/install state on one device:
//! identity across the console's package/version/software ID spaces, CVE
//! exposure, install and ignore flags, and any deferral windows. The
//! listing endpoint returns every package the agent reported for a device,
//! installed or merely available.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::client::AutomoxClient;
use crate::scalars;
use crate::servers::SERVERS_PATH;

/// A software unit's patch/install state on a given device.
///
/// Field names match the console's lower-snake wire schema. Fields absent
/// from a response decode to their defaults; unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Package {
    /// Row ID for this package-on-device record.
    #[serde(default)]
    pub id: i64,

    /// Console-wide ID of the package.
    #[serde(default)]
    pub package_id: i64,

    /// Console-wide ID of this specific package version.
    #[serde(default)]
    pub package_version_id: i64,

    /// Console-wide ID of the underlying software product.
    #[serde(default)]
    pub software_id: i64,

    /// Vendor-native identifier (e.g. a KB number on Windows).
    #[serde(default)]
    pub secondary_id: String,

    /// Device the record belongs to.
    #[serde(default)]
    pub server_id: i64,

    /// Organization that owns the device.
    #[serde(default)]
    pub organization_id: i64,

    /// Package name as reported by the package manager.
    #[serde(default)]
    pub name: String,

    /// Name shown in the console UI.
    #[serde(default)]
    pub display_name: String,

    /// Package version string.
    #[serde(default)]
    pub version: String,

    /// CVE identifiers addressed by this package.
    #[serde(default)]
    pub cves: Vec<String>,

    /// Highest CVSS score across the CVEs, as reported (string-encoded).
    #[serde(default)]
    pub cve_score: String,

    /// Severity as classified by the agent (e.g. `"critical"`).
    #[serde(default)]
    pub agent_severity: String,

    /// Severity as classified by the vendor.
    #[serde(default)]
    pub severity: String,

    /// Numeric impact score used for prioritization.
    #[serde(default)]
    pub impact: i64,

    /// Whether the package is currently installed.
    #[serde(default)]
    pub installed: bool,

    /// Whether this package is excluded from patching for the device.
    #[serde(default)]
    pub ignored: bool,

    /// Whether the package is excluded at the server-group level.
    #[serde(default)]
    pub group_ignored: bool,

    /// Device-level deferral: no install before this time.
    #[serde(default, deserialize_with = "scalars::automox_time")]
    pub deferred_until: Option<DateTime<Utc>>,

    /// Group-level deferral: no install before this time.
    #[serde(default, deserialize_with = "scalars::automox_time")]
    pub group_deferred_until: Option<DateTime<Utc>>,

    /// Whether the console manages this package.
    #[serde(default)]
    pub is_managed: bool,

    /// Whether the package can be uninstalled through the console.
    #[serde(default)]
    pub is_uninstallable: bool,

    /// Whether installing requires a reboot.
    #[serde(default)]
    pub requires_reboot: bool,

    /// OS product name the package applies to.
    #[serde(default)]
    pub os_name: String,

    /// OS version the package applies to.
    #[serde(default)]
    pub os_version: String,

    /// Console-internal numeric ID for the OS version.
    #[serde(default)]
    pub os_version_id: i64,

    /// Source repository the package comes from.
    #[serde(default)]
    pub repo: String,

    /// Patch scope (e.g. `"all"`, `"security"`).
    #[serde(default)]
    pub patch_scope: String,

    /// Vendor patch classification category.
    #[serde(default)]
    pub patch_classification_category_id: i64,

    /// When the console first saw this package on the device.
    #[serde(default, deserialize_with = "scalars::automox_time")]
    pub create_time: Option<DateTime<Utc>>,
}

/// Retrieves the packages reported for a device, installed or available.
///
/// Single request, no pagination — the console's first response is the
/// whole result set as far as this client is concerned.
///
/// # Errors
///
/// - `AutomoxError::Api` — non-2xx status, with the console's message list.
/// - `AutomoxError::Network` — transport-level failure.
/// - `AutomoxError::Decode` — response body did not match the schema.
pub async fn get_server_packages(
    client: &AutomoxClient,
    server_id: i64,
) -> crate::error::Result<Vec<Package>> {
    client
        .get_json(&format!("{SERVERS_PATH}/{server_id}/packages"))
        .await
}
