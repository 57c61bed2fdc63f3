//! Upstream accounting API subsystem.
//!
//! # Data Flow
//! ```text
//! proxy handler
//!     → client.rs (single GET, bounded by connect/request timeouts)
//!     → accounting API  /api.xro/2.0/Reports/BalanceSheet
//!     → Ok(serde_json::Value) | Err(UpstreamError)
//! ```
//!
//! # Design Decisions
//! - One attempt per inbound request; no retries, no caching
//! - The report body is opaque JSON; nothing here inspects it
//! - Timeouts are classified separately for logs and metrics only

pub mod client;

pub use client::{report_url, UpstreamClient, UpstreamError};
