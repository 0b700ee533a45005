// Copyright 2021 Peter Williams <pwil3058@gmail.com> <pwil3058@bigpond.net.au>

use std::fmt;

/// Grammar-intake and table-assembly failures (spec §4.1, §4.4). Manual
/// `Display`, no `thiserror`: the same discipline the runtime crate's
/// `ParseError` follows.
#[derive(Debug, Clone)]
pub enum GeneratorError {
    DuplicateTerminal(String),
    DuplicatePrecedenceEntry(String),
    DuplicateNonTerminal(String),
    UndefinedSymbol(String),
    NoNonTerminals,
    UnexpectedConflicts {
        expected: usize,
        found: usize,
        detail: String,
    },
    IllFormedProduction(String),
    Io(String),
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GeneratorError::DuplicateTerminal(name) => {
                write!(f, "terminal \"{}\" declared more than once", name)
            }
            GeneratorError::DuplicatePrecedenceEntry(name) => write!(
                f,
                "terminal \"{}\" assigned precedence more than once",
                name
            ),
            GeneratorError::DuplicateNonTerminal(name) => {
                write!(f, "nonterminal \"{}\" declared more than once", name)
            }
            GeneratorError::UndefinedSymbol(name) => write!(
                f,
                "\"{}\" is neither a declared terminal nor the lhs of any rule",
                name
            ),
            GeneratorError::NoNonTerminals => write!(f, "grammar declares no nonterminals"),
            GeneratorError::UnexpectedConflicts {
                expected,
                found,
                detail,
            } => write!(
                f,
                "found {} unresolved conflict(s), expected at most {}:\n{}",
                found, expected, detail
            ),
            GeneratorError::IllFormedProduction(detail) => {
                write!(f, "ill-formed production: {}", detail)
            }
            GeneratorError::Io(message) => write!(f, "{}", message),
        }
    }
}

impl From<std::io::Error> for GeneratorError {
    fn from(err: std::io::Error) -> Self {
        GeneratorError::Io(err.to_string())
    }
}

impl std::error::Error for GeneratorError {}
