//! # Portsweep Common
//!
//! Shared vocabulary of the workspace: what a scan request looks like, how it is
//! validated, and what a finished scan reports back.
//!
//! * **[`network`]**: Scan targets and port ranges, including input validation.
//! * **[`report`]**: Per-port results and the aggregated [`report::ScanReport`].
//! * **[`config`]**: Tunables for the scanning engine.
//! * **[`error`]**: The one error a scan can surface to its caller.

pub mod config;
pub mod error;
pub mod network;
pub mod report;

pub use error::ValidationError;
