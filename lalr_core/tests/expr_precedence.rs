// Copyright 2021 Peter Williams <pwil3058@gmail.com> <pwil3058@bigpond.net.au>

use std::rc::Rc;

use lalr_core::{Associativity, GeneratorOptions, Grammar, GrammarBuilder, ProductionSpec};
use lalr_runtime::{Location, TerminalId, Token};

fn arith_grammar() -> Grammar<i64> {
    GrammarBuilder::new()
        .terminals(&["ID", "PLUS", "MINUS", "STAR", "SLASH"])
        .unwrap()
        .precedence_group(Associativity::Left, &["PLUS", "MINUS"])
        .unwrap()
        .precedence_group(Associativity::Left, &["STAR", "SLASH"])
        .unwrap()
        .rule(
            "E",
            vec![
                ProductionSpec::new(
                    vec!["E".into(), "PLUS".into(), "E".into()],
                    Rc::new(|mut v: Vec<i64>| {
                        let r = v.pop().unwrap();
                        v.pop();
                        v.pop().unwrap() + r
                    }),
                    "E -> E PLUS E",
                ),
                ProductionSpec::new(
                    vec!["E".into(), "MINUS".into(), "E".into()],
                    Rc::new(|mut v: Vec<i64>| {
                        let r = v.pop().unwrap();
                        v.pop();
                        v.pop().unwrap() - r
                    }),
                    "E -> E MINUS E",
                ),
                ProductionSpec::new(
                    vec!["E".into(), "STAR".into(), "E".into()],
                    Rc::new(|mut v: Vec<i64>| {
                        let r = v.pop().unwrap();
                        v.pop();
                        v.pop().unwrap() * r
                    }),
                    "E -> E STAR E",
                ),
                ProductionSpec::new(
                    vec!["E".into(), "SLASH".into(), "E".into()],
                    Rc::new(|mut v: Vec<i64>| {
                        let r = v.pop().unwrap();
                        v.pop();
                        v.pop().unwrap() / r
                    }),
                    "E -> E SLASH E",
                ),
                ProductionSpec::new(vec!["ID".into()], Rc::new(|mut v: Vec<i64>| v.pop().unwrap()), "E -> ID"),
            ],
        )
        .unwrap()
        .build()
        .unwrap()
}

fn token(category: TerminalId, value: i64) -> Token<i64> {
    Token::new(category, Location::default(), value)
}

#[test]
fn implicit_precedence_binds_multiplication_tighter() {
    let grammar = arith_grammar();
    let generated = lalr_core::generate(grammar, &GeneratorOptions::new()).unwrap();
    assert_eq!(generated.unresolved_conflicts, 0);

    const ID: u32 = 2;
    const PLUS: u32 = 3;
    const STAR: u32 = 5;

    // ID(2) + ID(3) * ID(4) == 2 + (3 * 4) == 14
    let mut input = vec![
        token(TerminalId(ID), 2),
        token(TerminalId(PLUS), 0),
        token(TerminalId(ID), 3),
        token(TerminalId(STAR), 0),
        token(TerminalId(ID), 4),
        token(TerminalId::EOI, 0),
    ]
    .into_iter();

    let result = lalr_runtime::driver::parse(&generated.tables, || input.next().unwrap(), |_, _| {});
    assert_eq!(result.unwrap(), 14);
}
