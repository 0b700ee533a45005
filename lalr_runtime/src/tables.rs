// Copyright 2021 Peter Williams <pwil3058@gmail.com> <pwil3058@bigpond.net.au>

use std::rc::Rc;

use crate::action::Action;
use crate::terminal_set::TerminalSet;
use crate::token::{NonTerminalId, TerminalId};

/// A production's semantic action: an opaque callable over the semantic
/// values of its right-hand side, producing the value for its left-hand
/// side. Design note §9 calls actions "opaque callables over semantic
/// values... the core must not peek inside", so this is exactly `Rc<dyn
/// Fn>` rather than a tagged enum the core would have to match on.
pub type SemanticAction<A> = Rc<dyn Fn(Vec<A>) -> A>;

/// Per-production bookkeeping the runtime driver needs: how many symbols to
/// pop, which nonterminal to push, and the closure to invoke.
pub struct RuleInfo<A> {
    pub lhs: NonTerminalId,
    pub rhs_len: usize,
    pub action: SemanticAction<A>,
    pub display: String,
}

impl<A> RuleInfo<A> {
    pub fn new(lhs: NonTerminalId, rhs_len: usize, action: SemanticAction<A>, display: String) -> Self {
        Self {
            lhs,
            rhs_len,
            action,
            display,
        }
    }
}

/// The action/goto tables produced by `lalr_core`'s Table Assembler
/// (component D), in the vocabulary the runtime driver (component G)
/// interprets. Immutable once built; safe to share across concurrent
/// parses of disjoint input (spec §5).
pub struct Tables<A> {
    num_states: u32,
    action: Vec<Vec<Action>>,
    goto: Vec<Vec<Option<u32>>>,
    rules: Vec<RuleInfo<A>>,
    terminal_names: Vec<String>,
    nonterminal_names: Vec<String>,
    /// For states reached by shifting `*error*`: the set of terminals that
    /// terminate the panic-mode discard loop (spec §4.6 step 2), derived
    /// from the symbol immediately following `*error*` in the kernel items
    /// of that state.
    sync_terminals: Vec<(u32, TerminalSet)>,
}

impl<A> Tables<A> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        num_states: u32,
        action: Vec<Vec<Action>>,
        goto: Vec<Vec<Option<u32>>>,
        rules: Vec<RuleInfo<A>>,
        terminal_names: Vec<String>,
        nonterminal_names: Vec<String>,
        sync_terminals: Vec<(u32, TerminalSet)>,
    ) -> Self {
        Self {
            num_states,
            action,
            goto,
            rules,
            terminal_names,
            nonterminal_names,
            sync_terminals,
        }
    }

    pub fn num_states(&self) -> u32 {
        self.num_states
    }

    pub fn action(&self, state: u32, terminal: TerminalId) -> &Action {
        &self.action[state as usize][terminal.index()]
    }

    pub fn goto(&self, state: u32, nonterminal: NonTerminalId) -> Option<u32> {
        self.goto[state as usize][nonterminal.index()]
    }

    pub fn rule(&self, production: u32) -> &RuleInfo<A> {
        &self.rules[production as usize]
    }

    pub fn terminal_name(&self, terminal: TerminalId) -> &str {
        self.terminal_names
            .get(terminal.index())
            .map(String::as_str)
            .unwrap_or("?")
    }

    pub fn nonterminal_name(&self, nonterminal: NonTerminalId) -> &str {
        self.nonterminal_names
            .get(nonterminal.index())
            .map(String::as_str)
            .unwrap_or("?")
    }

    pub fn num_terminals(&self) -> usize {
        self.terminal_names.len()
    }

    /// The set of terminals that terminate panic-mode discard for errors
    /// recovered into `state`, or an empty set if `state` is not an
    /// error-recovery state.
    pub fn sync_terminals_for(&self, state: u32) -> TerminalSet {
        self.sync_terminals
            .iter()
            .find(|(s, _)| *s == state)
            .map(|(_, set)| set.clone())
            .unwrap_or_else(|| TerminalSet::new(self.num_terminals()))
    }

    pub fn expected_terminals(&self, state: u32) -> TerminalSet {
        let mut set = TerminalSet::new(self.terminal_names.len());
        for terminal_id in 0..self.terminal_names.len() as u32 {
            let terminal = TerminalId(terminal_id);
            if terminal == TerminalId::ERROR {
                continue;
            }
            if !self.action(state, terminal).is_error() {
                set.insert(terminal);
            }
        }
        set
    }
}
