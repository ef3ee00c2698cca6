//! The read-only lookup context shared by every search stack.

use crate::attacks::AttackTables;
use crate::zobrist::ZobristKeys;

/// Seed used when no configuration supplies one.
pub const DEFAULT_ZOBRIST_SEED: u64 = 982;

/// Attack tables plus Zobrist keys.
///
/// Built once before any position is parsed and never mutated afterwards.
/// Positions hashed with one instance must only be compared with positions
/// hashed with the same instance (or one built from the same seed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineTables {
    pub attacks: AttackTables,
    pub zobrist: ZobristKeys,
}

impl EngineTables {
    pub fn new(zobrist_seed: u64) -> Self {
        Self {
            attacks: AttackTables::new(),
            zobrist: ZobristKeys::from_seed(zobrist_seed),
        }
    }
}

impl Default for EngineTables {
    fn default() -> Self {
        Self::new(DEFAULT_ZOBRIST_SEED)
    }
}
