//! Input-validation errors.
//!
//! Internal invariant violations are not represented here; they panic.

use thiserror::Error;

/// Reasons a position string was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("expected at least 4 space-separated fields, found {0}")]
    MissingFields(usize),

    #[error("expected 8 ranks in the board field, found {0}")]
    RankCount(usize),

    #[error("rank {rank} describes {files} files instead of 8")]
    RankLength { rank: u8, files: u32 },

    #[error("unexpected piece character '{0}'")]
    PieceChar(char),

    #[error("unexpected side-to-move field '{0}'")]
    SideToMove(String),

    #[error("unexpected castling character '{0}'")]
    CastlingChar(char),

    #[error("invalid en passant square '{0}'")]
    EnPassant(String),

    #[error("invalid {field} clock '{value}'")]
    Clock { field: &'static str, value: String },

    #[error("{color} has {count} kings, expected exactly one")]
    KingCount { color: &'static str, count: u32 },

    #[error("side not to move is in check")]
    OpponentInCheck,
}

/// Reasons move text could not be matched to a legal move.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("malformed move text '{0}'")]
    Malformed(String),

    #[error("'{0}' is not legal in this position")]
    Illegal(String),
}
