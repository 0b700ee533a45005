// Copyright 2021 Peter Williams <pwil3058@gmail.com> <pwil3058@bigpond.net.au>

use std::fmt;

use crate::token::Token;

/// The parse-time failure sentinel (spec §7). Syntax errors themselves are
/// reported through the host's `on_error` callback as they happen and
/// recovery proceeds per §4.6; `on_error`'s return value is ignored, and a
/// parse only ever returns an `Err` once recovery has exhausted the input
/// without finding a way back in. This is the single documented failure
/// sentinel the teacher's "parse errors never propagate out of the driver
/// except as the documented failure sentinel" policy describes — there is
/// no separate returned variant for an individual syntax error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    Unrecoverable,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseError::Unrecoverable => write!(f, "Syntax error: unable to recover."),
        }
    }
}

/// Default stderr reporter, used when the host does not supply its own
/// `on_error` closure. Mirrors `lalr1_plus::ReportError`'s default method,
/// which is this crate's entire logging story: a single `writeln!` to
/// stderr, no `log`/`tracing` dependency.
pub fn report_to_stderr<A>(message: &str, _offending: Option<&Token<A>>) {
    eprintln!("{}", message);
}
