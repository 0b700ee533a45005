// Copyright 2021 Peter Williams <pwil3058@gmail.com> <pwil3058@bigpond.net.au>

use lalr_runtime::Symbol as RuntimeSymbol;
use lalr_runtime::{Action, RuleInfo, Tables, TerminalId, TerminalSet};

use crate::grammar::Grammar;
use crate::lr0::Automaton;
use crate::relation::Lookaheads;
use crate::symbol::Associativity;

/// Everything `table::assemble` reports back to the caller so it can check
/// the unresolved-conflict count against the `expect:` option (spec §4.4's
/// last paragraph); building this is `lalr_core`'s job, deciding whether it
/// is acceptable is `generator.rs`'s.
pub struct Assembled<A> {
    pub tables: Tables<A>,
    pub unresolved_conflicts: usize,
    pub conflict_report: String,
}

pub fn assemble<A>(grammar: &Grammar<A>, automaton: &Automaton, lookaheads: &Lookaheads, glr: bool) -> Assembled<A> {
    let num_states = automaton.states.len();
    let num_terminals = grammar.symbols.num_terminals();
    let num_nonterminals = grammar.symbols.num_nonterminals();

    let mut cells: Vec<Vec<Vec<Action>>> = vec![vec![Vec::new(); num_terminals]; num_states];
    let mut goto: Vec<Vec<Option<u32>>> = vec![vec![None; num_nonterminals]; num_states];

    for state in &automaton.states {
        for (&symbol, &target) in &state.transitions {
            match symbol {
                RuntimeSymbol::Terminal(t) => cells[state.id as usize][t.index()].push(Action::Shift(target)),
                RuntimeSymbol::NonTerminal(n) => goto[state.id as usize][n.index()] = Some(target),
            }
        }
        for item in &state.closure {
            let production = grammar.production(item.production);
            if item.dot as usize != production.rhs.len() {
                continue;
            }
            for terminal in lookaheads.get(state.id, item.production).iter() {
                let action = if item.production == 0 && terminal == TerminalId::EOI {
                    Action::Accept
                } else {
                    Action::Reduce(item.production)
                };
                cells[state.id as usize][terminal.index()].push(action);
            }
        }
    }

    let mut action: Vec<Vec<Action>> = vec![vec![Action::Error; num_terminals]; num_states];
    let mut unresolved_conflicts = 0usize;
    let mut conflict_report = String::new();

    for s in 0..num_states {
        for t in 0..num_terminals {
            let candidates = &cells[s][t];
            action[s][t] = match candidates.len() {
                0 => Action::Error,
                1 => candidates[0].clone(),
                _ if glr => Action::Conflict(candidates.clone()),
                _ => resolve(
                    grammar,
                    candidates,
                    TerminalId(t as u32),
                    s as u32,
                    &mut unresolved_conflicts,
                    &mut conflict_report,
                ),
            };
        }
    }

    let sync_terminals = sync_terminals(grammar, automaton);
    let terminal_names: Vec<String> = grammar
        .symbols
        .terminals()
        .iter()
        .map(|t| t.name.clone())
        .collect();
    let nonterminal_names: Vec<String> = grammar
        .symbols
        .nonterminals()
        .iter()
        .map(|n| n.name.clone())
        .collect();

    let rules: Vec<RuleInfo<A>> = grammar
        .productions
        .iter()
        .map(|p| RuleInfo::new(p.lhs, p.rhs.len(), std::rc::Rc::clone(&p.action), p.display.clone()))
        .collect();

    let tables = Tables::new(
        num_states as u32,
        action,
        goto,
        rules,
        terminal_names,
        nonterminal_names,
        sync_terminals,
    );

    Assembled {
        tables,
        unresolved_conflicts,
        conflict_report,
    }
}

/// Deterministic conflict resolution per spec §4.4's table: reduce/reduce
/// picks the smaller production id; shift/reduce consults precedence and
/// associativity, falling back to "shift wins" when either side lacks one.
fn resolve<A>(
    grammar: &Grammar<A>,
    candidates: &[Action],
    terminal: TerminalId,
    state: u32,
    unresolved_conflicts: &mut usize,
    report: &mut String,
) -> Action {
    if candidates.iter().any(|a| matches!(a, Action::Accept)) {
        return Action::Accept;
    }

    let shift = candidates.iter().find_map(|a| match a {
        Action::Shift(s) => Some(*s),
        _ => None,
    });
    let mut reduces: Vec<u32> = candidates
        .iter()
        .filter_map(|a| match a {
            Action::Reduce(p) => Some(*p),
            _ => None,
        })
        .collect();
    reduces.sort_unstable();

    let reduce = if reduces.len() > 1 {
        *unresolved_conflicts += 1;
        report.push_str(&format!(
            "state {} terminal {}: reduce/reduce conflict among productions {:?}, resolved to {}\n",
            state, terminal, reduces, reduces[0]
        ));
        Some(reduces[0])
    } else {
        reduces.first().copied()
    };

    match (shift, reduce) {
        (Some(s), Some(p)) => {
            let production = grammar.production(p);
            let terminal_info = grammar.symbols.terminal_info(terminal);
            match (production.precedence, terminal_info.precedence) {
                (Some(pp), Some(tp)) if tp > pp => Action::Shift(s),
                (Some(pp), Some(tp)) if tp < pp => Action::Reduce(p),
                (Some(_), Some(_)) => match terminal_info.associativity {
                    Associativity::Left => Action::Reduce(p),
                    Associativity::Right => Action::Shift(s),
                    Associativity::NonAssoc => Action::Error,
                },
                _ => {
                    *unresolved_conflicts += 1;
                    report.push_str(&format!(
                        "state {} terminal {}: shift/reduce conflict with production {}, resolved to shift\n",
                        state, terminal, p
                    ));
                    Action::Shift(s)
                }
            }
        }
        (Some(s), None) => Action::Shift(s),
        (None, Some(p)) => Action::Reduce(p),
        (None, None) => Action::Error,
    }
}

/// Per spec §4.6 step 2: for every state reached by shifting `*error*`, the
/// terminals that immediately follow `*error*` in the kernel items that
/// shifted it there.
fn sync_terminals<A>(grammar: &Grammar<A>, automaton: &Automaton) -> Vec<(u32, TerminalSet)> {
    let mut out = Vec::new();
    for state in &automaton.states {
        let mut set = TerminalSet::new(grammar.symbols.num_terminals());
        let mut is_recovery_state = false;
        for item in &state.kernel {
            if item.dot == 0 {
                continue;
            }
            let production = grammar.production(item.production);
            if production.rhs.get(item.dot as usize - 1) == Some(&RuntimeSymbol::Terminal(TerminalId::ERROR)) {
                is_recovery_state = true;
                if let Some(RuntimeSymbol::Terminal(t)) = production.rhs.get(item.dot as usize) {
                    set.insert(*t);
                }
            }
        }
        if is_recovery_state {
            out.push((state.id, set));
        }
    }
    out
}
