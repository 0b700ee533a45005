// Copyright 2021 Peter Williams <pwil3058@gmail.com> <pwil3058@bigpond.net.au>

use std::collections::{BTreeSet, HashMap};

use lalr_runtime::{NonTerminalId, Symbol as RuntimeSymbol, TerminalSet};

use crate::digraph;
use crate::grammar::Grammar;
use crate::lr0::Automaton;

/// Reduction lookahead sets, keyed by `(state, production)`, as produced by
/// the DeRemer-Pennello relation engine (spec §4.3).
pub struct Lookaheads {
    la: HashMap<(u32, u32), TerminalSet>,
    empty: TerminalSet,
}

impl Lookaheads {
    pub fn get(&self, state: u32, production: u32) -> &TerminalSet {
        self.la.get(&(state, production)).unwrap_or(&self.empty)
    }
}

/// Runs both digraph fixpoints (`DR`/`reads` for `Read`, then `Read`/
/// `includes` for `Follow`) and resolves `lookback` to produce the LA set
/// of every reduction item in the automaton.
pub fn compute<A>(grammar: &Grammar<A>, automaton: &Automaton) -> Lookaheads {
    let num_terminals = grammar.symbols.num_terminals();

    let nt_trans: Vec<(u32, NonTerminalId)> = automaton.nt_transitions();
    let index_of: HashMap<(u32, NonTerminalId), usize> = nt_trans
        .iter()
        .enumerate()
        .map(|(i, key)| (*key, i))
        .collect();

    let dr = directly_reads(grammar, automaton, &nt_trans, num_terminals);
    let reads_edges = reads_edges(grammar, automaton, &nt_trans, &index_of);
    let read = digraph::solve(&reads_edges, dr);

    let production_starts = production_start_states(automaton);
    let includes_edges = includes_edges(grammar, automaton, &production_starts, &index_of, nt_trans.len());
    let follow = digraph::solve(&includes_edges, read);

    let rev = reverse_transitions(automaton);
    let la = lookback(grammar, automaton, &rev, &index_of, &follow, num_terminals);

    Lookaheads {
        la,
        empty: TerminalSet::new(num_terminals),
    }
}

fn directly_reads<A>(
    _grammar: &Grammar<A>,
    automaton: &Automaton,
    nt_trans: &[(u32, NonTerminalId)],
    num_terminals: usize,
) -> Vec<TerminalSet> {
    nt_trans
        .iter()
        .map(|(s, a)| {
            let target = automaton.states[*s as usize].transitions[&RuntimeSymbol::NonTerminal(*a)];
            let mut set = TerminalSet::new(num_terminals);
            for symbol in automaton.states[target as usize].transitions.keys() {
                if let RuntimeSymbol::Terminal(t) = symbol {
                    set.insert(*t);
                }
            }
            set
        })
        .collect()
}

fn reads_edges<A>(
    grammar: &Grammar<A>,
    automaton: &Automaton,
    nt_trans: &[(u32, NonTerminalId)],
    index_of: &HashMap<(u32, NonTerminalId), usize>,
) -> Vec<Vec<usize>> {
    nt_trans
        .iter()
        .map(|(s, a)| {
            let target = automaton.states[*s as usize].transitions[&RuntimeSymbol::NonTerminal(*a)];
            let mut edges = Vec::new();
            for symbol in automaton.states[target as usize].transitions.keys() {
                if let RuntimeSymbol::NonTerminal(c) = symbol {
                    if grammar.is_nullable(*c) {
                        if let Some(&idx) = index_of.get(&(target, *c)) {
                            edges.push(idx);
                        }
                    }
                }
            }
            edges
        })
        .collect()
}

/// For every production, the set of states whose closure contains the
/// item `(production, 0)` — the states from which this production could
/// be about to be recognized.
fn production_start_states(automaton: &Automaton) -> HashMap<u32, Vec<u32>> {
    let mut starts: HashMap<u32, Vec<u32>> = HashMap::new();
    for state in &automaton.states {
        for item in &state.closure {
            if item.dot == 0 {
                starts.entry(item.production).or_default().push(state.id);
            }
        }
    }
    starts
}

fn includes_edges<A>(
    grammar: &Grammar<A>,
    automaton: &Automaton,
    production_starts: &HashMap<u32, Vec<u32>>,
    index_of: &HashMap<(u32, NonTerminalId), usize>,
    num_nodes: usize,
) -> Vec<Vec<usize>> {
    let mut edges = vec![Vec::new(); num_nodes];
    for production in &grammar.productions {
        let Some(starts) = production_starts.get(&production.id) else {
            continue;
        };
        for &s in starts {
            let mut current = s;
            for (i, symbol) in production.rhs.iter().enumerate() {
                if let RuntimeSymbol::NonTerminal(n) = symbol {
                    let suffix_nullable = production.rhs[i + 1..].iter().all(|sym| match sym {
                        RuntimeSymbol::NonTerminal(m) => grammar.is_nullable(*m),
                        RuntimeSymbol::Terminal(_) => false,
                    });
                    if suffix_nullable {
                        if let (Some(&from), Some(&to)) = (
                            index_of.get(&(current, *n)),
                            index_of.get(&(s, production.lhs)),
                        ) {
                            edges[from].push(to);
                        }
                    }
                }
                current = automaton.states[current as usize].transitions[symbol];
            }
        }
    }
    edges
}

fn reverse_transitions(automaton: &Automaton) -> HashMap<(u32, RuntimeSymbol), Vec<u32>> {
    let mut rev: HashMap<(u32, RuntimeSymbol), Vec<u32>> = HashMap::new();
    for state in &automaton.states {
        for (&symbol, &target) in &state.transitions {
            rev.entry((target, symbol)).or_default().push(state.id);
        }
    }
    rev
}

fn lookback<A>(
    grammar: &Grammar<A>,
    automaton: &Automaton,
    rev: &HashMap<(u32, RuntimeSymbol), Vec<u32>>,
    index_of: &HashMap<(u32, NonTerminalId), usize>,
    follow: &[TerminalSet],
    num_terminals: usize,
) -> HashMap<(u32, u32), TerminalSet> {
    let mut la: HashMap<(u32, u32), TerminalSet> = HashMap::new();
    for state in &automaton.states {
        for item in &state.closure {
            let production = grammar.production(item.production);
            if item.dot as usize != production.rhs.len() {
                continue;
            }
            let mut current: BTreeSet<u32> = BTreeSet::from([state.id]);
            for symbol in production.rhs.iter().rev() {
                let mut predecessors = BTreeSet::new();
                for &c in &current {
                    if let Some(preds) = rev.get(&(c, *symbol)) {
                        predecessors.extend(preds.iter().copied());
                    }
                }
                current = predecessors;
            }
            let mut set = TerminalSet::new(num_terminals);
            for &s in &current {
                if let Some(&idx) = index_of.get(&(s, production.lhs)) {
                    set.union_with(&follow[idx]);
                }
            }
            la.entry((state.id, item.production))
                .or_insert_with(|| TerminalSet::new(num_terminals))
                .union_with(&set);
        }
    }
    la
}
