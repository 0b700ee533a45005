// Copyright 2021 Peter Williams <pwil3058@gmail.com> <pwil3058@bigpond.net.au>

use std::rc::Rc;

use lalr_core::{DriverKind, GeneratorOptions, GrammarBuilder, ProductionSpec};
use lalr_runtime::{Location, TerminalId, Token};

fn token(category: TerminalId, value: i64) -> Token<i64> {
    Token::new(category, Location::default(), value)
}

#[test]
fn ambiguous_concatenation_yields_both_groupings() {
    // S -> S S | a
    let grammar = GrammarBuilder::new()
        .terminals(&["a"])
        .unwrap()
        .rule(
            "S",
            vec![
                ProductionSpec::new(
                    vec!["S".into(), "S".into()],
                    Rc::new(|mut v: Vec<i64>| {
                        let r = v.pop().unwrap();
                        v.pop().unwrap() + r
                    }),
                    "S -> S S",
                ),
                ProductionSpec::new(vec!["a".into()], Rc::new(|mut v: Vec<i64>| v.pop().unwrap()), "S -> a"),
            ],
        )
        .unwrap()
        .build()
        .unwrap();

    let generated = lalr_core::generate(grammar, &GeneratorOptions::new().with_driver(DriverKind::Glr)).unwrap();

    let mut input = vec![
        token(TerminalId(2), 1),
        token(TerminalId(2), 1),
        token(TerminalId(2), 1),
        token(TerminalId::EOI, 0),
    ]
    .into_iter();

    let mut results = lalr_runtime::glr_driver::parse(&generated.tables, || input.next().unwrap()).unwrap();
    results.sort();
    // (a a) a and a (a a) both sum to 3, but are two distinct derivations;
    // the driver keeps one surviving branch per accept, so both occurrences
    // of the value 3 are the two groupings' results.
    assert_eq!(results, vec![3, 3]);
}
