// Copyright 2021 Peter Williams <pwil3058@gmail.com> <pwil3058@bigpond.net.au>

use std::collections::{HashMap, HashSet};

use lalr_runtime::{NonTerminalId, SemanticAction, TerminalId};
use lalr_runtime::Symbol as RuntimeSymbol;

use crate::error::GeneratorError;
use crate::symbol::{Associativity, SymbolTable};

/// One alternative of a nonterminal's rule group, as supplied by the host:
/// a sequence of symbol names (terminals, nonterminals, or `*error*`), an
/// optional explicit precedence terminal, and the semantic action.
pub struct ProductionSpec<A> {
    pub rhs: Vec<String>,
    pub precedence: Option<String>,
    pub action: SemanticAction<A>,
    pub display: String,
}

impl<A> ProductionSpec<A> {
    pub fn new(rhs: Vec<String>, action: SemanticAction<A>, display: impl Into<String>) -> Self {
        Self {
            rhs,
            precedence: None,
            action,
            display: display.into(),
        }
    }

    pub fn with_precedence(mut self, terminal: impl Into<String>) -> Self {
        self.precedence = Some(terminal.into());
        self
    }
}

struct RuleGroup<A> {
    lhs: NonTerminalId,
    alternatives: Vec<ProductionSpec<A>>,
}

/// A single grammar production after intake: dense lhs/rhs ids, resolved
/// precedence, and the opaque semantic action (spec §3 "Production").
pub struct Production<A> {
    pub id: u32,
    pub lhs: NonTerminalId,
    pub rhs: Vec<RuntimeSymbol>,
    pub precedence: Option<u32>,
    pub action: SemanticAction<A>,
    pub display: String,
}

/// The immutable grammar bundle (spec §3 "Grammar"), built once during
/// intake and never mutated afterward.
pub struct Grammar<A> {
    pub symbols: SymbolTable,
    pub productions: Vec<Production<A>>,
    first_production_of: HashMap<NonTerminalId, Vec<u32>>,
    nullable: HashSet<NonTerminalId>,
}

impl<A> Grammar<A> {
    pub fn productions_of(&self, nt: NonTerminalId) -> &[u32] {
        self.first_production_of
            .get(&nt)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn production(&self, id: u32) -> &Production<A> {
        &self.productions[id as usize]
    }

    pub fn is_nullable(&self, nt: NonTerminalId) -> bool {
        self.nullable.contains(&nt)
    }

    pub fn num_productions(&self) -> usize {
        self.productions.len()
    }

    /// Drops every production whose rhs contains `*error*` and renumbers
    /// the rest, per spec §4.5: GLR construction never sees error
    /// productions.
    pub fn without_error_productions(self) -> Grammar<A> {
        let Grammar { symbols, productions, .. } = self;
        let mut new_productions = Vec::new();
        let mut first_production_of: HashMap<NonTerminalId, Vec<u32>> = HashMap::new();
        for p in productions {
            let has_error = p
                .rhs
                .iter()
                .any(|s| matches!(s, RuntimeSymbol::Terminal(t) if *t == TerminalId::ERROR));
            if has_error {
                continue;
            }
            let id = new_productions.len() as u32;
            first_production_of.entry(p.lhs).or_default().push(id);
            new_productions.push(Production { id, ..p });
        }
        let nullable = compute_nullable(&new_productions);
        Grammar {
            symbols,
            productions: new_productions,
            first_production_of,
            nullable,
        }
    }
}

/// Accumulates terminal declarations, precedence groups, and nonterminal
/// rule groups, then validates and freezes them into a `Grammar` — the
/// same add-then-freeze shape as `alap_gen_ng::Specification`.
pub struct GrammarBuilder<A> {
    symbols: SymbolTable,
    rule_groups: Vec<RuleGroup<A>>,
    start_declared: bool,
}

impl<A> GrammarBuilder<A> {
    pub fn new() -> Self {
        Self {
            symbols: SymbolTable::new(),
            rule_groups: Vec::new(),
            start_declared: false,
        }
    }

    pub fn terminal(mut self, name: &str) -> Result<Self, GeneratorError> {
        self.symbols.declare_terminal(name)?;
        Ok(self)
    }

    pub fn terminals(mut self, names: &[&str]) -> Result<Self, GeneratorError> {
        for name in names {
            self.symbols.declare_terminal(name)?;
        }
        Ok(self)
    }

    pub fn precedence_group(
        mut self,
        associativity: Associativity,
        names: &[&str],
    ) -> Result<Self, GeneratorError> {
        let owned: Vec<String> = names.iter().map(|n| n.to_string()).collect();
        self.symbols.declare_precedence_group(associativity, &owned)?;
        Ok(self)
    }

    /// Declares one nonterminal's rule group. The lhs of the first call
    /// becomes the grammar's start symbol (spec §4.1).
    pub fn rule(
        mut self,
        lhs: &str,
        alternatives: Vec<ProductionSpec<A>>,
    ) -> Result<Self, GeneratorError> {
        if !self.start_declared {
            self.start_declared = true;
            self.symbols.set_start_symbol_name(lhs);
        }
        let id = self.symbols.declare_nonterminal(lhs)?;
        self.rule_groups.push(RuleGroup {
            lhs: id,
            alternatives,
        });
        Ok(self)
    }

    pub fn build(self) -> Result<Grammar<A>, GeneratorError> {
        if self.rule_groups.is_empty() {
            return Err(GeneratorError::NoNonTerminals);
        }
        let symbols = self.symbols;
        let start = self.rule_groups[0].lhs;

        let mut productions: Vec<Production<A>> = Vec::new();
        let mut first_production_of: HashMap<NonTerminalId, Vec<u32>> = HashMap::new();

        // Production 0: the synthetic `S' -> S *eoi*` augmentation.
        productions.push(Production {
            id: 0,
            lhs: NonTerminalId::AUGMENTED_START,
            rhs: vec![
                RuntimeSymbol::NonTerminal(start),
                RuntimeSymbol::Terminal(TerminalId::EOI),
            ],
            precedence: None,
            action: std::rc::Rc::new(|mut v| v.swap_remove(0)),
            display: "S' -> S *eoi*".to_string(),
        });
        first_production_of.insert(NonTerminalId::AUGMENTED_START, vec![0]);

        for group in self.rule_groups {
            let mut ids = Vec::new();
            for spec in group.alternatives {
                let id = productions.len() as u32;
                let mut rhs = Vec::with_capacity(spec.rhs.len());
                let mut rightmost_terminal_precedence = None;
                for name in &spec.rhs {
                    let symbol = resolve_symbol(&symbols, name)?;
                    if let RuntimeSymbol::Terminal(t) = symbol {
                        rightmost_terminal_precedence = symbols.terminal_info(t).precedence;
                    }
                    rhs.push(symbol);
                }
                let error_count = rhs
                    .iter()
                    .filter(|s| matches!(s, RuntimeSymbol::Terminal(t) if *t == TerminalId::ERROR))
                    .count();
                if error_count > 1 {
                    return Err(GeneratorError::IllFormedProduction(format!(
                        "{} uses *error* more than once; a production may have at most one recovery point",
                        spec.display
                    )));
                }
                let precedence = match &spec.precedence {
                    Some(name) => {
                        let t = symbols
                            .terminal_id(name)
                            .ok_or_else(|| GeneratorError::UndefinedSymbol(name.clone()))?;
                        symbols.terminal_info(t).precedence
                    }
                    None => rightmost_terminal_precedence,
                };
                productions.push(Production {
                    id,
                    lhs: group.lhs,
                    rhs,
                    precedence,
                    action: spec.action,
                    display: spec.display,
                });
                ids.push(id);
            }
            first_production_of.insert(group.lhs, ids);
        }

        let nullable = compute_nullable(&productions);

        Ok(Grammar {
            symbols,
            productions,
            first_production_of,
            nullable,
        })
    }
}

impl<A> Default for GrammarBuilder<A> {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve_symbol(symbols: &SymbolTable, name: &str) -> Result<RuntimeSymbol, GeneratorError> {
    if let Some(t) = symbols.terminal_id(name) {
        return Ok(RuntimeSymbol::Terminal(t));
    }
    if let Some(n) = symbols.nonterminal_id(name) {
        return Ok(RuntimeSymbol::NonTerminal(n));
    }
    Err(GeneratorError::UndefinedSymbol(name.to_string()))
}

/// Least fixpoint over the grammar: N is nullable iff some production of N
/// has every rhs symbol nullable (spec §4.3's nullable precomputation,
/// shared here since it is a grammar-level property, not a relation-engine
/// one).
fn compute_nullable<A>(productions: &[Production<A>]) -> HashSet<NonTerminalId> {
    let mut nullable = HashSet::new();
    let mut changed = true;
    while changed {
        changed = false;
        for p in productions {
            if nullable.contains(&p.lhs) {
                continue;
            }
            let all_nullable = p.rhs.iter().all(|s| match s {
                RuntimeSymbol::NonTerminal(n) => nullable.contains(n),
                RuntimeSymbol::Terminal(_) => false,
            });
            if all_nullable {
                nullable.insert(p.lhs);
                changed = true;
            }
        }
    }
    nullable
}
