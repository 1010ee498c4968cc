//! Process plumbing shared by the binary and the tests

pub mod shutdown;

pub use shutdown::{listen_for_shutdown_signals, ShutdownSignal};
