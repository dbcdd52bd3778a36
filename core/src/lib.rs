//! # Portsweep Core
//!
//! The scanning engine.
//!
//! * **[`network`]**: The TCP connect primitive every probe is built on.
//! * **[`scanner`]**: [`scanner::PortScanner`], which fans probes out across a port
//!   range and folds their outcomes into a [`portsweep_common::report::ScanReport`].

pub mod network;
pub mod scanner;

pub use network::tcp::{Connector, TcpConnector};
pub use scanner::PortScanner;
