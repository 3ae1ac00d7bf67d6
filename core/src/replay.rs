//! Operation stream driver.
//!
//! A script holds one operation per line:
//!
//! ```text
//! # comment
//! add 5
//! delete 3
//! median
//! ```
//!
//! Keywords are case-insensitive and `get_median` is accepted for `median`.

use std::fmt;
use std::io::Read;
use std::num::ParseIntError;

use thiserror::Error;

use crate::multiset::{MedianContainer, MultisetConfig, Value};

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("line {line}: unknown operation `{op}`")]
    UnknownOp { line: usize, op: String },

    #[error("line {line}: `{op}` needs a value")]
    MissingArgument { line: usize, op: &'static str },

    #[error("line {line}: unexpected argument `{arg}`")]
    TrailingArgument { line: usize, arg: String },

    #[error("line {line}: invalid integer `{text}`")]
    InvalidValue {
        line: usize,
        text: String,
        #[source]
        source: ParseIntError,
    },

    #[error("unknown backend `{0}`, expected `heap` or `ordered`")]
    UnknownBackend(String),

    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),
}

/// One operation against a container.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Op {
    Add(Value),
    Delete(Value),
    Median,
}

impl Op {
    /// Parse one script line. Blank lines and comments yield `None`.
    pub fn parse_line(text: &str, line: usize) -> Result<Option<Op>, ReplayError> {
        let text = text.trim();
        if text.is_empty() || text.starts_with('#') {
            return Ok(None);
        }

        let mut tokens = text.split_whitespace();
        let keyword = tokens.next().unwrap_or_default().to_ascii_lowercase();
        let op = match keyword.as_str() {
            "add" => Op::Add(parse_value(tokens.next(), "add", line)?),
            "delete" => Op::Delete(parse_value(tokens.next(), "delete", line)?),
            "median" | "get_median" => Op::Median,
            _ => {
                return Err(ReplayError::UnknownOp {
                    line,
                    op: keyword,
                });
            }
        };

        if let Some(arg) = tokens.next() {
            return Err(ReplayError::TrailingArgument {
                line,
                arg: arg.to_string(),
            });
        }
        Ok(Some(op))
    }
}

fn parse_value(token: Option<&str>, op: &'static str, line: usize) -> Result<Value, ReplayError> {
    let text = token.ok_or(ReplayError::MissingArgument { line, op })?;
    text.parse().map_err(|source| ReplayError::InvalidValue {
        line,
        text: text.to_string(),
        source,
    })
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Add(v) => write!(f, "add {}", v),
            Op::Delete(v) => write!(f, "delete {}", v),
            Op::Median => f.write_str("median"),
        }
    }
}

/// Parse a whole script. Line numbers in errors are 1-based.
pub fn parse_script(text: &str) -> Result<Vec<Op>, ReplayError> {
    let mut ops = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if let Some(op) = Op::parse_line(line, idx + 1)? {
            ops.push(op);
        }
    }
    Ok(ops)
}

pub fn read_script(mut reader: impl Read) -> Result<Vec<Op>, ReplayError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_script(&text)
}

/// Result of applying one [`Op`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// Live size after an add.
    Size(usize),
    /// Whether a delete removed an occurrence.
    Deleted(bool),
    Median(Option<Value>),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Size(n) => write!(f, "{}", n),
            Outcome::Deleted(removed) => write!(f, "{}", removed),
            Outcome::Median(Some(v)) => write!(f, "{}", v),
            Outcome::Median(None) => f.write_str("none"),
        }
    }
}

/// Feeds operations to a container and collects their outcomes.
pub struct Replayer {
    container: Box<dyn MedianContainer>,
}

impl Replayer {
    pub fn new(container: Box<dyn MedianContainer>) -> Self {
        Self { container }
    }

    pub fn with_config(config: &MultisetConfig) -> Self {
        Self::new(crate::open(config))
    }

    pub fn apply(&mut self, op: Op) -> Outcome {
        let outcome = match op {
            Op::Add(v) => Outcome::Size(self.container.add(v)),
            Op::Delete(v) => Outcome::Deleted(self.container.delete(v)),
            Op::Median => Outcome::Median(self.container.get_median()),
        };
        tracing::trace!("{} -> {}", op, outcome);
        outcome
    }

    pub fn run<I: IntoIterator<Item = Op>>(&mut self, ops: I) -> Vec<Outcome> {
        ops.into_iter().map(|op| self.apply(op)).collect()
    }

    pub fn container(&self) -> &dyn MedianContainer {
        self.container.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multiset::Backend;

    const SCRIPT: &str = "
        # scenario with deletes
        add 30
        add 20
        ADD 10
        median
        delete 30
        get_median
        delete 10
        delete 10
        median
        delete 20
        median
    ";

    #[test]
    fn test_parse_script() {
        let ops = parse_script(SCRIPT).unwrap();
        assert_eq!(ops.len(), 11);
        assert_eq!(ops[0], Op::Add(30));
        assert_eq!(ops[2], Op::Add(10));
        assert_eq!(ops[3], Op::Median);
        assert_eq!(ops[5], Op::Median);
        assert_eq!(ops[6], Op::Delete(10));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_script("add 1\npush 2"),
            Err(ReplayError::UnknownOp { line: 2, op }) if op == "push"
        ));
        assert!(matches!(
            parse_script("delete"),
            Err(ReplayError::MissingArgument { line: 1, op: "delete" })
        ));
        assert!(matches!(
            parse_script("\n\nmedian 4"),
            Err(ReplayError::TrailingArgument { line: 3, arg }) if arg == "4"
        ));
        assert!(matches!(
            parse_script("add 1.5"),
            Err(ReplayError::InvalidValue { line: 1, text, .. }) if text == "1.5"
        ));
    }

    #[test]
    fn test_error_display() {
        let err = parse_script("add x").unwrap_err();
        assert_eq!(err.to_string(), "line 1: invalid integer `x`");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_replay_outcomes() {
        let ops = parse_script(SCRIPT).unwrap();
        for backend in [Backend::Heap, Backend::Ordered] {
            let mut replayer = Replayer::with_config(&MultisetConfig {
                backend,
                ..Default::default()
            });
            let outcomes = replayer.run(ops.iter().copied());
            assert_eq!(
                outcomes,
                vec![
                    Outcome::Size(1),
                    Outcome::Size(2),
                    Outcome::Size(3),
                    Outcome::Median(Some(20)),
                    Outcome::Deleted(true),
                    Outcome::Median(Some(10)),
                    Outcome::Deleted(true),
                    Outcome::Deleted(false),
                    Outcome::Median(Some(20)),
                    Outcome::Deleted(true),
                    Outcome::Median(None),
                ]
            );
            assert!(replayer.container().is_empty());
        }
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(Outcome::Size(3).to_string(), "3");
        assert_eq!(Outcome::Deleted(false).to_string(), "false");
        assert_eq!(Outcome::Median(Some(-7)).to_string(), "-7");
        assert_eq!(Outcome::Median(None).to_string(), "none");
    }

    #[test]
    fn test_read_script() {
        let ops = read_script("add 1\nmedian\n".as_bytes()).unwrap();
        assert_eq!(ops, vec![Op::Add(1), Op::Median]);
    }
}
