//! Wire formats spoken at the session's edges.
//!
//! This module implements the FEN position codec, the coordinate move
//! notation the oracle replies in, and decoding of the oracle's JSON
//! reply envelope.

pub mod fen;
pub mod lan;
pub mod oracle;

pub use fen::{encode_fen, encode_placement, parse_fen, parse_placement, FenError};
pub use lan::{format_lan, parse_lan, LanError};
pub use oracle::{decode_reply, OracleError, OracleVerdict};
