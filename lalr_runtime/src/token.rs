// Copyright 2021 Peter Williams <pwil3058@gmail.com> <pwil3058@bigpond.net.au>

use std::fmt;

/// Dense small-integer id for a terminal symbol. Id 0 is always the
/// reserved end-of-input sentinel (`*eoi*`); id 1 is always the reserved
/// error-recovery terminal (`*error*`). User terminals start at id 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TerminalId(pub u32);

impl TerminalId {
    pub const EOI: TerminalId = TerminalId(0);
    pub const ERROR: TerminalId = TerminalId(1);

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TerminalId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// Dense small-integer id for a nonterminal symbol. Id 0 is always the
/// synthetic augmented start symbol `S'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NonTerminalId(pub u32);

impl NonTerminalId {
    pub const AUGMENTED_START: NonTerminalId = NonTerminalId(0);

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NonTerminalId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "N{}", self.0)
    }
}

/// A grammar symbol: either a terminal or a nonterminal, identified by its
/// dense id. Kept as a small `Copy` tagged value, the same role `lalr1_plus`
/// plays with its `Symbol<T, N>` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Terminal(TerminalId),
    NonTerminal(NonTerminalId),
}

impl Symbol {
    pub fn is_terminal(self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    pub fn is_non_terminal(self) -> bool {
        matches!(self, Symbol::NonTerminal(_))
    }
}

/// Source-location record a lexer attaches to a token. Exposed verbatim to
/// the host; the core never inspects its fields (spec-mandated opacity).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub input: String,
    pub line: usize,
    pub column: usize,
    pub offset: usize,
    pub length: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.input.is_empty() {
            write!(f, "{}:{}", self.line, self.column)
        } else {
            write!(f, "{}:{}:{}", self.input, self.line, self.column)
        }
    }
}

/// A lexical token as produced by the caller-supplied lexer: the terminal
/// category it belongs to, where it came from, and the semantic payload
/// that becomes `$n` inside a production's semantic action.
#[derive(Debug, Clone)]
pub struct Token<A> {
    category: TerminalId,
    location: Location,
    value: A,
}

impl<A> Token<A> {
    pub fn new(category: TerminalId, location: Location, value: A) -> Self {
        Self {
            category,
            location,
            value,
        }
    }

    pub fn eoi(location: Location, value: A) -> Self {
        Self::new(TerminalId::EOI, location, value)
    }

    pub fn category(&self) -> TerminalId {
        self.category
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn value(&self) -> &A {
        &self.value
    }

    pub fn into_value(self) -> A {
        self.value
    }

    pub fn is_eoi(&self) -> bool {
        self.category == TerminalId::EOI
    }
}
