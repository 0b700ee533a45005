// Copyright 2021 Peter Williams <pwil3058@gmail.com> <pwil3058@bigpond.net.au>

use std::rc::Rc;

use lalr_core::{DriverKind, GeneratorOptions, Grammar, GrammarBuilder, ProductionSpec};
use lalr_runtime::{Action, Location, TerminalId, Token};

// S -> A | B
// A -> X
// B -> X
//
// goto(start, X) closes over both A -> X. and B -> X. with the same
// lookahead (*eoi*), so this is a genuine reduce/reduce conflict with no
// precedence to break it.
fn grammar() -> Grammar<i64> {
    GrammarBuilder::new()
        .terminals(&["X"])
        .unwrap()
        .rule(
            "S",
            vec![
                ProductionSpec::new(vec!["A".into()], Rc::new(|mut v: Vec<i64>| v.pop().unwrap() + 1000), "S -> A"),
                ProductionSpec::new(vec!["B".into()], Rc::new(|mut v: Vec<i64>| v.pop().unwrap() + 2000), "S -> B"),
            ],
        )
        .unwrap()
        .rule(
            "A",
            vec![ProductionSpec::new(vec!["X".into()], Rc::new(|mut v: Vec<i64>| v.pop().unwrap() + 10), "A -> X")],
        )
        .unwrap()
        .rule(
            "B",
            vec![ProductionSpec::new(vec!["X".into()], Rc::new(|mut v: Vec<i64>| v.pop().unwrap() + 20), "B -> X")],
        )
        .unwrap()
        .build()
        .unwrap()
}

fn token(category: TerminalId, value: i64) -> Token<i64> {
    Token::new(category, Location::default(), value)
}

#[test]
fn lower_production_id_wins_in_lalr_mode() {
    let generated = lalr_core::generate(grammar(), &GeneratorOptions::new().with_expect(1)).unwrap();
    assert_eq!(generated.unresolved_conflicts, 1);

    let mut input = vec![token(TerminalId(2), 1), token(TerminalId::EOI, 0)].into_iter();
    let result = lalr_runtime::driver::parse(&generated.tables, || input.next().unwrap(), |_, _| {});
    // A -> X is production 3, B -> X is production 4; the smaller id wins,
    // so the reduction goes through A, then S -> A.
    assert_eq!(result.unwrap(), 1011);
}

#[test]
fn both_reductions_survive_in_glr_mode() {
    let generated =
        lalr_core::generate(grammar(), &GeneratorOptions::new().with_driver(DriverKind::Glr)).unwrap();

    let mut found_conflict = false;
    for state in 0..generated.tables.num_states() {
        for terminal in 0..generated.tables.num_terminals() {
            if matches!(generated.tables.action(state as u32, TerminalId(terminal as u32)), Action::Conflict(_)) {
                found_conflict = true;
            }
        }
    }
    assert!(found_conflict, "expected the reduce/reduce conflict to survive as Action::Conflict in GLR mode");

    let mut input = vec![token(TerminalId(2), 1), token(TerminalId::EOI, 0)].into_iter();
    let mut results = lalr_runtime::glr_driver::parse(&generated.tables, || input.next().unwrap()).unwrap();
    results.sort();
    assert_eq!(results, vec![1011, 2021]);
}
