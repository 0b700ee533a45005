// Copyright 2021 Peter Williams <pwil3058@gmail.com> <pwil3058@bigpond.net.au>

use std::rc::Rc;

use lalr_core::{Associativity, GeneratorOptions, Grammar, GrammarBuilder, ProductionSpec};
use lalr_runtime::{Location, TerminalId, Token};

// ID STAR SLASH MINUS PLUS are real operators; `uminus` is a precedence-only
// pseudo-terminal (never produced by a lexer, used solely via `prec:`);
// NONASSOC is a real binary operator declared with nonassoc associativity.
fn grammar() -> Grammar<i64> {
    GrammarBuilder::new()
        .terminals(&["ID", "PLUS", "MINUS", "STAR", "SLASH", "NONASSOC", "uminus"])
        .unwrap()
        .precedence_group(Associativity::Left, &["PLUS", "MINUS"])
        .unwrap()
        .precedence_group(Associativity::Left, &["STAR", "SLASH"])
        .unwrap()
        .precedence_group(Associativity::NonAssoc, &["NONASSOC"])
        .unwrap()
        .precedence_group(Associativity::NonAssoc, &["uminus"])
        .unwrap()
        .rule(
            "E",
            vec![
                ProductionSpec::new(
                    vec!["MINUS".into(), "E".into()],
                    Rc::new(|mut v: Vec<i64>| -v.pop().unwrap()),
                    "E -> MINUS E",
                )
                .with_precedence("uminus"),
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
                    vec!["E".into(), "NONASSOC".into(), "E".into()],
                    Rc::new(|mut v: Vec<i64>| {
                        let r = v.pop().unwrap();
                        v.pop();
                        v.pop().unwrap() + r
                    }),
                    "E -> E NONASSOC E",
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
fn uminus_binds_tighter_than_multiplication() {
    let generated = lalr_core::generate(grammar(), &GeneratorOptions::new()).unwrap();
    assert_eq!(generated.unresolved_conflicts, 0);

    const ID: u32 = 2;
    const MINUS: u32 = 4;
    const STAR: u32 = 5;

    // - ID(3) * ID(4) == (-3) * 4 == -12
    let mut input = vec![
        token(TerminalId(MINUS), 0),
        token(TerminalId(ID), 3),
        token(TerminalId(STAR), 0),
        token(TerminalId(ID), 4),
        token(TerminalId::EOI, 0),
    ]
    .into_iter();

    let result = lalr_runtime::driver::parse(&generated.tables, || input.next().unwrap(), |_, _| {});
    assert_eq!(result.unwrap(), -12);
}

#[test]
fn repeated_nonassoc_operator_is_a_syntax_error() {
    let generated = lalr_core::generate(grammar(), &GeneratorOptions::new()).unwrap();

    const ID: u32 = 2;
    const NONASSOC: u32 = 7;

    let mut input = vec![
        token(TerminalId(ID), 1),
        token(TerminalId(NONASSOC), 0),
        token(TerminalId(ID), 2),
        token(TerminalId(NONASSOC), 0),
        token(TerminalId(ID), 3),
        token(TerminalId::EOI, 0),
    ]
    .into_iter();

    let result = lalr_runtime::driver::parse(&generated.tables, || input.next().unwrap(), |_, _| {});
    assert!(result.is_err());
}
