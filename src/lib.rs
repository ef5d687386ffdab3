//! Async Rust client library for the Automox device-management REST API.
//!
//! Provides a bearer-authenticated HTTP client and typed read accessors
//! for server inventory, installed-package/patch status, and queued
//! remediation commands. Each call is a single stateless request/response
//! round trip — no retries, caching, or pagination.
//!
//! # Modules
//!
//! - [`client`] — Authenticated HTTP client, builder, fixed header set.
//! - [`error`] — Typed error hierarchy (`AutomoxError`) for all operations.
//! - [`scalars`] — Decoders for the console's non-standard wire scalars.
//! - [`servers`] — Server inventory entities and list/get accessors.
//! - [`packages`] — Installed-package records and per-device listing.
//! - [`queues`] — Pending command-queue entries per device.
//!
//! # Quick Start
//!
//! ```ignore
//! use automox::client::AutomoxClient;
//! use automox::servers::{get_server, list_servers};
//!
//! let client = AutomoxClient::new(&api_token)?;
//! for server in list_servers(&client).await? {
//!     println!("{} ({})", server.name, server.id);
//! }
//! let detail = get_server(&client, 955).await?;
//! print!("{detail}");
//! ```
//!
//! The client is immutable after construction and safe to share across
//! concurrent call sites. Requests can be aborted cooperatively by
//! attaching a `tokio_util::sync::CancellationToken` at build time.

#![warn(missing_docs)]

pub mod client;
pub mod error;
pub mod packages;
pub mod queues;
pub mod scalars;
pub mod servers;
