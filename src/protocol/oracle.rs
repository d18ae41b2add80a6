//! Oracle reply decoding.
//!
//! The move oracle answers a position query with a small JSON document
//! in the chessdb style: `{"status":"ok","move":"e2e4"}`. This module
//! decodes that reply into a validated verdict; the HTTP or process
//! transport that obtains the text lives outside the core.

use serde::Deserialize;

use crate::board::moves::Move;
use crate::protocol::lan::{parse_lan, LanError};

/// The oracle's answer for a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OracleVerdict {
    /// The recommended move, already validated as coordinate notation.
    Best(Move),
    /// The oracle explicitly has no move for this position.
    NoMove,
}

/// Errors from decoding an oracle reply.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("malformed oracle reply: {0}")]
    MalformedReply(#[from] serde_json::Error),

    #[error("oracle reply status '{0}'")]
    BadStatus(String),

    #[error("oracle move text did not parse: {0}")]
    BadMoveText(#[from] LanError),

    #[error("oracle reply has status ok but no move")]
    MissingMove,

    #[error("oracle unreachable: {0}")]
    Unreachable(String),
}

/// The raw JSON shape of an oracle reply.
#[derive(Debug, Deserialize)]
struct RawReply {
    #[serde(default)]
    status: String,
    #[serde(rename = "move", default)]
    best_move: Option<String>,
}

/// Decodes an oracle JSON reply into a verdict.
///
/// A `nomove` or `unknown` status is an explicit no-move answer; any
/// other non-ok status is an error. Move text that does not parse as two
/// squares plus an optional promotion letter is treated as an oracle
/// error, never as a move.
pub fn decode_reply(json: &str) -> Result<OracleVerdict, OracleError> {
    let raw: RawReply = serde_json::from_str(json)?;
    match raw.status.as_str() {
        "ok" => {
            let text = raw.best_move.ok_or(OracleError::MissingMove)?;
            Ok(OracleVerdict::Best(parse_lan(&text)?))
        }
        "nomove" | "nobestmove" | "unknown" => Ok(OracleVerdict::NoMove),
        other => Err(OracleError::BadStatus(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::moves::Move;
    use crate::board::square::Square;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn decode_best_move() {
        let verdict = decode_reply(r#"{"status":"ok","move":"e2e4"}"#).unwrap();
        assert_eq!(verdict, OracleVerdict::Best(Move::new(sq("e2"), sq("e4"))));
    }

    #[test]
    fn decode_no_move_statuses() {
        for json in [
            r#"{"status":"nomove"}"#,
            r#"{"status":"nobestmove"}"#,
            r#"{"status":"unknown"}"#,
        ] {
            assert_eq!(decode_reply(json).unwrap(), OracleVerdict::NoMove);
        }
    }

    #[test]
    fn bad_status_is_an_error() {
        assert!(matches!(
            decode_reply(r#"{"status":"invalid board"}"#),
            Err(OracleError::BadStatus(_))
        ));
    }

    #[test]
    fn ok_without_move_is_an_error() {
        assert!(matches!(
            decode_reply(r#"{"status":"ok"}"#),
            Err(OracleError::MissingMove)
        ));
    }

    #[test]
    fn unparseable_move_text_is_an_error() {
        assert!(matches!(
            decode_reply(r#"{"status":"ok","move":"castle!"}"#),
            Err(OracleError::BadMoveText(_))
        ));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            decode_reply("not json"),
            Err(OracleError::MalformedReply(_))
        ));
    }
}
