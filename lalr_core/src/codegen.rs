// Copyright 2021 Peter Williams <pwil3058@gmail.com> <pwil3058@bigpond.net.au>

use std::fmt::Write as _;

use lalr_runtime::{Action, Symbol as RuntimeSymbol, Tables};

use crate::grammar::Grammar;
use crate::lr0::Automaton;

/// The §6.3 human-readable table dump: for each state its kernel items
/// (dot shown as `.`), transitions, and action row; for each production
/// its id, lhs, rhs and precedence. Informative only; no consumer parses
/// it back, matching `alap_gen_ng::grammar::write_description`'s role.
pub fn write_table_dump<A>(grammar: &Grammar<A>, automaton: &Automaton, tables: &Tables<A>) -> String {
    let mut out = String::new();

    writeln!(out, "# Productions").unwrap();
    for production in &grammar.productions {
        let rhs: Vec<String> = production
            .rhs
            .iter()
            .map(|s| symbol_name(grammar, *s))
            .collect();
        let prec = production
            .precedence
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "{:>4}: {} -> {}  [prec {}]",
            production.id,
            grammar.symbols.nonterminal_info(production.lhs).name,
            if rhs.is_empty() { "ε".to_string() } else { rhs.join(" ") },
            prec
        )
        .unwrap();
    }

    writeln!(out).unwrap();
    writeln!(out, "# States").unwrap();
    for state in &automaton.states {
        writeln!(out, "state {}:", state.id).unwrap();
        for item in &state.kernel {
            let production = grammar.production(item.production);
            let mut rhs_display = Vec::new();
            for (i, symbol) in production.rhs.iter().enumerate() {
                if i as u32 == item.dot {
                    rhs_display.push(".".to_string());
                }
                rhs_display.push(symbol_name(grammar, *symbol));
            }
            if item.dot as usize == production.rhs.len() {
                rhs_display.push(".".to_string());
            }
            writeln!(
                out,
                "  [{}] {} -> {}",
                production.id,
                grammar.symbols.nonterminal_info(production.lhs).name,
                rhs_display.join(" ")
            )
            .unwrap();
        }
        for (symbol, target) in &state.transitions {
            writeln!(out, "    on {} goto {}", symbol_name(grammar, *symbol), target).unwrap();
        }
        for (terminal_id, info) in grammar.symbols.terminals().iter().enumerate() {
            let action = tables.action(state.id, lalr_runtime::TerminalId(terminal_id as u32));
            if !action.is_error() {
                writeln!(out, "    on {} action {}", info.name, describe_action(action)).unwrap();
            }
        }
    }

    out
}

fn symbol_name<A>(grammar: &Grammar<A>, symbol: RuntimeSymbol) -> String {
    match symbol {
        RuntimeSymbol::Terminal(t) => grammar.symbols.terminal_info(t).name.clone(),
        RuntimeSymbol::NonTerminal(n) => grammar.symbols.nonterminal_info(n).name.clone(),
    }
}

fn describe_action(action: &Action) -> String {
    match action {
        Action::Shift(s) => format!("shift {}", s),
        Action::Reduce(p) => format!("reduce {}", p),
        Action::Accept => "accept".to_string(),
        Action::Error => "error".to_string(),
        Action::Conflict(candidates) => {
            let parts: Vec<String> = candidates.iter().map(describe_action).collect();
            format!("conflict({})", parts.join(", "))
        }
    }
}

/// The `output:` option (spec §6.1) asks for "the generated driver as a
/// named artifact". Semantic actions here are runtime closures, not source
/// text, so there is no Rust item to splice them back into the way
/// `alap_gen_ng::grammar::write_parser_implementation_code` would; this
/// emits a descriptive module documenting the grammar's shape instead of a
/// compilable trait implementation.
pub fn write_driver_artifact<A>(name: &str, grammar: &Grammar<A>) -> String {
    let mut out = String::new();
    writeln!(out, "// Generated grammar description for `{}`.", name).unwrap();
    writeln!(out, "// Not a compilable parser: semantic actions are runtime").unwrap();
    writeln!(out, "// closures and are not reproduced here.").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "// Terminals:").unwrap();
    for terminal in grammar.symbols.terminals() {
        writeln!(out, "//   {}", terminal.name).unwrap();
    }
    writeln!(out, "// Nonterminals:").unwrap();
    for nonterminal in grammar.symbols.nonterminals() {
        writeln!(out, "//   {}", nonterminal.name).unwrap();
    }
    writeln!(out, "// Productions:").unwrap();
    for production in &grammar.productions {
        writeln!(out, "//   {}", production.display).unwrap();
    }
    out
}
