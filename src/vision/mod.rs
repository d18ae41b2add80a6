//! Observation handling.
//!
//! Maps between display coordinates and canonical squares, represents
//! raw occupancy snapshots, and reconciles each snapshot against the
//! previous board state to recover the move that occurred.

pub mod mapper;
pub mod observation;
pub mod reconcile;

pub use mapper::{to_address, to_square, BoardAddress};
pub use observation::{Observation, ObservationError};
pub use reconcile::{reconcile, ReconcileError};
