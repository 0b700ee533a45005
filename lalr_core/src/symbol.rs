// Copyright 2021 Peter Williams <pwil3058@gmail.com> <pwil3058@bigpond.net.au>

use std::collections::HashMap;
use std::fmt;

use lalr_runtime::{NonTerminalId, TerminalId};

use crate::error::GeneratorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    NonAssoc,
    Left,
    Right,
}

impl Default for Associativity {
    fn default() -> Self {
        Associativity::NonAssoc
    }
}

impl fmt::Display for Associativity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Associativity::NonAssoc => write!(f, "nonassoc"),
            Associativity::Left => write!(f, "left"),
            Associativity::Right => write!(f, "right"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TerminalInfo {
    pub name: String,
    pub precedence: Option<u32>,
    pub associativity: Associativity,
}

#[derive(Debug, Clone)]
pub struct NonTerminalInfo {
    pub name: String,
}

/// Accumulates terminal and nonterminal names to dense ids as the grammar is
/// declared, in the same add-then-freeze style as `alap_gen_ng::SymbolTable`.
/// Id 0 is always `*eoi*`, id 1 is always `*error*`; user terminals start at
/// 2 in declaration order.
pub struct SymbolTable {
    terminals: Vec<TerminalInfo>,
    terminal_ids: HashMap<String, TerminalId>,
    nonterminals: Vec<NonTerminalInfo>,
    nonterminal_ids: HashMap<String, NonTerminalId>,
    next_precedence: u32,
}

impl SymbolTable {
    pub fn new() -> Self {
        let mut table = Self {
            terminals: Vec::new(),
            terminal_ids: HashMap::new(),
            nonterminals: Vec::new(),
            nonterminal_ids: HashMap::new(),
            next_precedence: 1,
        };
        table.push_terminal("*eoi*");
        table.push_terminal("*error*");
        // Reserved for the synthetic augmented start; id 0 is filled in by
        // `Grammar::build` once the user's start symbol is known.
        table.nonterminals.push(NonTerminalInfo {
            name: "S'".to_string(),
        });
        table
    }

    fn push_terminal(&mut self, name: &str) -> TerminalId {
        let id = TerminalId(self.terminals.len() as u32);
        self.terminals.push(TerminalInfo {
            name: name.to_string(),
            precedence: None,
            associativity: Associativity::NonAssoc,
        });
        self.terminal_ids.insert(name.to_string(), id);
        id
    }

    pub fn declare_terminal(&mut self, name: &str) -> Result<TerminalId, GeneratorError> {
        if self.terminal_ids.contains_key(name) {
            return Err(GeneratorError::DuplicateTerminal(name.to_string()));
        }
        Ok(self.push_terminal(name))
    }

    /// Assigns the next (monotonically increasing) precedence level and a
    /// shared associativity to every name in `names`, per spec §4.1: groups
    /// are processed in the order the caller supplies them.
    pub fn declare_precedence_group(
        &mut self,
        associativity: Associativity,
        names: &[String],
    ) -> Result<(), GeneratorError> {
        let level = self.next_precedence;
        self.next_precedence += 1;
        for name in names {
            let id = *self
                .terminal_ids
                .get(name)
                .ok_or_else(|| GeneratorError::UndefinedSymbol(name.clone()))?;
            let info = &mut self.terminals[id.index()];
            if info.precedence.is_some() {
                return Err(GeneratorError::DuplicatePrecedenceEntry(name.clone()));
            }
            info.precedence = Some(level);
            info.associativity = associativity;
        }
        Ok(())
    }

    pub fn declare_nonterminal(&mut self, name: &str) -> Result<NonTerminalId, GeneratorError> {
        if name == "S'" || self.nonterminal_ids.contains_key(name) {
            return Err(GeneratorError::DuplicateNonTerminal(name.to_string()));
        }
        let id = NonTerminalId(self.nonterminals.len() as u32);
        self.nonterminals.push(NonTerminalInfo {
            name: name.to_string(),
        });
        self.nonterminal_ids.insert(name.to_string(), id);
        Ok(id)
    }

    pub fn terminal_id(&self, name: &str) -> Option<TerminalId> {
        self.terminal_ids.get(name).copied()
    }

    pub fn nonterminal_id(&self, name: &str) -> Option<NonTerminalId> {
        self.nonterminal_ids.get(name).copied()
    }

    pub fn terminal_info(&self, id: TerminalId) -> &TerminalInfo {
        &self.terminals[id.index()]
    }

    pub fn nonterminal_info(&self, id: NonTerminalId) -> &NonTerminalInfo {
        &self.nonterminals[id.index()]
    }

    pub fn num_terminals(&self) -> usize {
        self.terminals.len()
    }

    pub fn num_nonterminals(&self) -> usize {
        self.nonterminals.len()
    }

    pub fn terminals(&self) -> &[TerminalInfo] {
        &self.terminals
    }

    pub fn nonterminals(&self) -> &[NonTerminalInfo] {
        &self.nonterminals
    }

    pub fn set_start_symbol_name(&mut self, name: &str) {
        self.nonterminals[NonTerminalId::AUGMENTED_START.index()].name = format!("{}'", name);
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eoi_and_error_are_reserved() {
        let table = SymbolTable::new();
        assert_eq!(table.terminal_id("*eoi*"), Some(TerminalId::EOI));
        assert_eq!(table.terminal_id("*error*"), Some(TerminalId::ERROR));
    }

    #[test]
    fn duplicate_terminal_is_rejected() {
        let mut table = SymbolTable::new();
        table.declare_terminal("PLUS").unwrap();
        match table.declare_terminal("PLUS") {
            Err(GeneratorError::DuplicateTerminal(name)) => assert_eq!(name, "PLUS"),
            other => panic!("expected DuplicateTerminal, got {:?}", other),
        }
    }

    #[test]
    fn precedence_groups_increase_monotonically() {
        let mut table = SymbolTable::new();
        table.declare_terminal("PLUS").unwrap();
        table.declare_terminal("STAR").unwrap();
        table
            .declare_precedence_group(Associativity::Left, &["PLUS".to_string()])
            .unwrap();
        table
            .declare_precedence_group(Associativity::Left, &["STAR".to_string()])
            .unwrap();
        let plus = table.terminal_id("PLUS").unwrap();
        let star = table.terminal_id("STAR").unwrap();
        assert!(table.terminal_info(star).precedence > table.terminal_info(plus).precedence);
    }

    #[test]
    fn precedence_on_undeclared_terminal_is_rejected() {
        let mut table = SymbolTable::new();
        let err = table
            .declare_precedence_group(Associativity::Left, &["NOPE".to_string()])
            .unwrap_err();
        assert!(matches!(err, GeneratorError::UndefinedSymbol(_)));
    }

    #[test]
    fn duplicate_nonterminal_is_rejected() {
        let mut table = SymbolTable::new();
        table.declare_nonterminal("E").unwrap();
        match table.declare_nonterminal("E") {
            Err(GeneratorError::DuplicateNonTerminal(name)) => assert_eq!(name, "E"),
            other => panic!("expected DuplicateNonTerminal, got {:?}", other),
        }
    }

    #[test]
    fn the_reserved_augmented_start_name_cannot_be_declared() {
        let mut table = SymbolTable::new();
        match table.declare_nonterminal("S'") {
            Err(GeneratorError::DuplicateNonTerminal(name)) => assert_eq!(name, "S'"),
            other => panic!("expected DuplicateNonTerminal, got {:?}", other),
        }
    }
}
