//! Kibitzer engine library.
//!
//! Exposes the board representation, FEN codec, observation
//! reconciliation, and session state machine for use by integration
//! tests and the binary entry point.

pub mod board;
pub mod console;
pub mod protocol;
pub mod session;
pub mod vision;
