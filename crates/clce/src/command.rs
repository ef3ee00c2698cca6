//! The colon-delimited command protocol.
//!
//! ```text
//! go:<fen>:<milliseconds>:<v|q>
//! perft:<fen>:<depth>:<flag>
//! ```
//!
//! `go` prints the chosen move (`0000` when there is none); with `v` it first
//! prints one `info` line per completed iteration. `perft` prints
//! `move:count` pairs on one line and the total on the next; flag `q`
//! restricts generation to non-captures.

use std::io::{self, Write};
use std::time::Duration;

use chess_core::{
    EngineTables, FenError, GenKind, SearchLimits, SearchState, perft_divide,
};
use classical_engine::{ClassicalEngine, SearchConfig};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}'")]
    UnknownVerb(String),

    #[error("'{verb}' is missing its {field} field")]
    MissingField {
        verb: &'static str,
        field: &'static str,
    },

    #[error("'{verb}' has {count} fields, expected 4")]
    ExtraFields { verb: &'static str, count: usize },

    #[error("invalid {field} '{value}'")]
    BadInteger { field: &'static str, value: String },

    #[error("flag must be a single character, got '{0}'")]
    BadFlag(String),

    #[error("invalid position: {0}")]
    Fen(#[from] FenError),

    #[error("failed to write output")]
    Io(#[from] io::Error),
}

/// A parsed request. The position text is validated when the command runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Go {
        fen: String,
        move_time: Duration,
        verbose: bool,
    },
    Perft {
        fen: String,
        depth: u8,
        kind: GenKind,
    },
}

/// The fields after the verb, consumed in order.
struct Fields<'a> {
    verb: &'static str,
    parts: std::str::Split<'a, char>,
}

impl<'a> Fields<'a> {
    fn next(&mut self, field: &'static str) -> Result<&'a str, CommandError> {
        self.parts.next().ok_or(CommandError::MissingField {
            verb: self.verb,
            field,
        })
    }

    fn integer<T: std::str::FromStr>(&mut self, field: &'static str) -> Result<T, CommandError> {
        let text = self.next(field)?;
        text.parse().map_err(|_| CommandError::BadInteger {
            field,
            value: text.to_string(),
        })
    }

    fn flag(&mut self) -> Result<char, CommandError> {
        let text = self.next("flag")?;
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(CommandError::BadFlag(text.to_string())),
        }
    }

    fn finish(self) -> Result<(), CommandError> {
        let rest = self.parts.count();
        if rest > 0 {
            return Err(CommandError::ExtraFields {
                verb: self.verb,
                count: 4 + rest,
            });
        }
        Ok(())
    }
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(CommandError::Empty);
        }
        let mut parts = line.split(':');
        let verb = match parts.next() {
            Some("go") => "go",
            Some("perft") => "perft",
            Some(other) => return Err(CommandError::UnknownVerb(other.to_string())),
            None => return Err(CommandError::Empty),
        };
        let mut fields = Fields { verb, parts };

        let command = match verb {
            "go" => {
                let fen = fields.next("position")?.to_string();
                let millis: u64 = fields.integer("milliseconds")?;
                let verbose = fields.flag()? == 'v';
                Command::Go {
                    fen,
                    move_time: Duration::from_millis(millis),
                    verbose,
                }
            }
            _ => {
                let fen = fields.next("position")?.to_string();
                let depth: u8 = fields.integer("depth")?;
                let kind = match fields.flag()? {
                    'q' => GenKind::Quiet,
                    _ => GenKind::All,
                };
                Command::Perft { fen, depth, kind }
            }
        };
        fields.finish()?;
        Ok(command)
    }

    /// Execute against `tables`, writing protocol output to `out`.
    pub fn run(
        &self,
        tables: &EngineTables,
        search: &SearchConfig,
        out: &mut impl Write,
    ) -> Result<(), CommandError> {
        match self {
            Command::Go {
                fen,
                move_time,
                verbose,
            } => {
                let mut state = SearchState::from_fen(tables, fen)?;
                let mut engine = ClassicalEngine::new(*search);
                let limits = SearchLimits::time(*move_time);

                let mut written = Ok(());
                let result = engine.search_with(&mut state, &limits, |report| {
                    if *verbose && written.is_ok() {
                        written = writeln!(
                            out,
                            "info depth {} score {} nodes {} time {} pv {}",
                            report.depth,
                            report.score,
                            report.nodes,
                            report.elapsed.as_millis(),
                            report.best_move
                        )
                        .and_then(|_| out.flush());
                    }
                });
                written?;

                info!(
                    depth = result.depth,
                    score = result.score,
                    nodes = result.nodes,
                    stopped = result.stopped,
                    "search finished"
                );
                match result.best_move {
                    Some(mv) => writeln!(out, "{mv}")?,
                    None => writeln!(out, "0000")?,
                }
            }
            Command::Perft { fen, depth, kind } => {
                let mut state = SearchState::from_fen(tables, fen)?;
                let divided = perft_divide(&mut state, *depth, *kind);
                let line = divided
                    .iter()
                    .map(|(mv, nodes)| format!("{mv}:{nodes}"))
                    .collect::<Vec<_>>()
                    .join(" ");
                let total: u64 = if *depth == 0 {
                    1
                } else {
                    divided.iter().map(|(_, nodes)| nodes).sum()
                };
                writeln!(out, "{line}")?;
                writeln!(out, "{total}")?;
            }
        }
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod command_tests;
