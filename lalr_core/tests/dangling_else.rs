// Copyright 2021 Peter Williams <pwil3058@gmail.com> <pwil3058@bigpond.net.au>

use std::rc::Rc;

use lalr_core::{GeneratorOptions, GrammarBuilder, ProductionSpec};
use lalr_runtime::{Location, TerminalId, Token};

fn token(category: TerminalId, value: i64) -> Token<i64> {
    Token::new(category, Location::default(), value)
}

#[test]
fn else_binds_to_the_nearest_if_and_reports_one_conflict() {
    let grammar = GrammarBuilder::new()
        .terminals(&["IF", "EXPR", "THEN", "ELSE", "OTHER"])
        .unwrap()
        .rule(
            "S",
            vec![
                ProductionSpec::new(
                    vec!["IF".into(), "EXPR".into(), "THEN".into(), "S".into(), "ELSE".into(), "S".into()],
                    Rc::new(|mut v: Vec<i64>| {
                        // encode as: 100 + 10*then_branch + else_branch, just to
                        // distinguish which S each branch attached to.
                        let else_branch = v.pop().unwrap();
                        v.pop();
                        let then_branch = v.pop().unwrap();
                        100 + 10 * then_branch + else_branch
                    }),
                    "S -> IF EXPR THEN S ELSE S",
                ),
                ProductionSpec::new(
                    vec!["IF".into(), "EXPR".into(), "THEN".into(), "S".into()],
                    Rc::new(|mut v: Vec<i64>| {
                        let then_branch = v.pop().unwrap();
                        200 + then_branch
                    }),
                    "S -> IF EXPR THEN S",
                ),
                ProductionSpec::new(vec!["OTHER".into()], Rc::new(|_| 1), "S -> OTHER"),
            ],
        )
        .unwrap()
        .build()
        .unwrap();

    let generated = lalr_core::generate(grammar, &GeneratorOptions::new().with_expect(1)).unwrap();
    assert_eq!(generated.unresolved_conflicts, 1);

    // IF EXPR THEN IF EXPR THEN OTHER ELSE OTHER
    let mut input = vec![
        token(TerminalId(2), 0), // IF
        token(TerminalId(3), 0), // EXPR
        token(TerminalId(4), 0), // THEN
        token(TerminalId(2), 0), // IF
        token(TerminalId(3), 0), // EXPR
        token(TerminalId(4), 0), // THEN
        token(TerminalId(6), 0), // OTHER
        token(TerminalId(5), 0), // ELSE
        token(TerminalId(6), 0), // OTHER
        token(TerminalId::EOI, 0),
    ]
    .into_iter();

    let result = lalr_runtime::driver::parse(&generated.tables, || input.next().unwrap(), |_, _| {}).unwrap();
    // If ELSE had bound to the outer IF the whole thing would parse as the
    // 6-symbol production (100 + ...); shift-wins binds it to the inner IF
    // instead, so the outer production seen is the 4-symbol one (200 + ...).
    assert!(result >= 200, "expected else bound to the inner if, got {}", result);
}
