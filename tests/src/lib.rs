//! End-to-end tests that drive the scanner against real loopback sockets.

pub mod util;

mod scan;
