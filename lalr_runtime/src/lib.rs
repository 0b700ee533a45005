// Copyright 2021 Peter Williams <pwil3058@gmail.com> <pwil3058@bigpond.net.au>

//! Runtime driver for tables produced by `lalr_core`: the stack machine
//! that interprets action/goto tables (component G), plus the graph-
//! structured-stack driver used when those tables were built in GLR mode.
//! Carries no dependency on `lalr_core` itself — a `Tables<A>` is a plain
//! data value, not a handle back into the generator.

pub mod action;
pub mod driver;
pub mod error;
pub mod glr_driver;
pub mod tables;
pub mod terminal_set;
pub mod token;

pub use action::Action;
pub use error::{report_to_stderr, ParseError};
pub use tables::{RuleInfo, SemanticAction, Tables};
pub use terminal_set::TerminalSet;
pub use token::{Location, NonTerminalId, Symbol, TerminalId, Token};
