// Copyright 2021 Peter Williams <pwil3058@gmail.com> <pwil3058@bigpond.net.au>

use std::rc::Rc;

use clap::crate_authors;
use lazy_static::lazy_static;
use regex::Regex;
use structopt::StructOpt;

use lalr_core::{Associativity, GeneratorOptions, Grammar, GrammarBuilder, ProductionSpec};
use lalr_runtime::{Location, TerminalId, Token};

const NUM: u32 = 2;
const PLUS: u32 = 3;
const MINUS: u32 = 4;
const STAR: u32 = 5;
const SLASH: u32 = 6;
const LPAREN: u32 = 7;
const RPAREN: u32 = 8;

fn arith_grammar() -> Grammar<f64> {
    GrammarBuilder::new()
        .terminals(&["NUM", "PLUS", "MINUS", "STAR", "SLASH", "LPAREN", "RPAREN"])
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
                    Rc::new(|mut v: Vec<f64>| {
                        let r = v.pop().unwrap();
                        v.pop();
                        v.pop().unwrap() + r
                    }),
                    "E -> E PLUS E",
                ),
                ProductionSpec::new(
                    vec!["E".into(), "MINUS".into(), "E".into()],
                    Rc::new(|mut v: Vec<f64>| {
                        let r = v.pop().unwrap();
                        v.pop();
                        v.pop().unwrap() - r
                    }),
                    "E -> E MINUS E",
                ),
                ProductionSpec::new(
                    vec!["E".into(), "STAR".into(), "E".into()],
                    Rc::new(|mut v: Vec<f64>| {
                        let r = v.pop().unwrap();
                        v.pop();
                        v.pop().unwrap() * r
                    }),
                    "E -> E STAR E",
                ),
                ProductionSpec::new(
                    vec!["E".into(), "SLASH".into(), "E".into()],
                    Rc::new(|mut v: Vec<f64>| {
                        let r = v.pop().unwrap();
                        v.pop();
                        v.pop().unwrap() / r
                    }),
                    "E -> E SLASH E",
                ),
                ProductionSpec::new(
                    vec!["LPAREN".into(), "E".into(), "RPAREN".into()],
                    Rc::new(|mut v: Vec<f64>| {
                        v.pop();
                        let inner = v.pop().unwrap();
                        v.pop();
                        inner
                    }),
                    "E -> LPAREN E RPAREN",
                ),
                ProductionSpec::new(vec!["NUM".into()], Rc::new(|mut v: Vec<f64>| v.pop().unwrap()), "E -> NUM"),
            ],
        )
        .unwrap()
        .build()
        .unwrap()
}

lazy_static! {
    static ref TOKEN_RE: Regex =
        Regex::new(r"^(?:(?P<num>\d+(?:\.\d+)?)|(?P<op>[+\-*/()])|(?P<ws>\s+))").unwrap();
}

fn location_at(offset: usize, length: usize) -> Location {
    Location {
        offset,
        length,
        ..Location::default()
    }
}

fn tokenize(text: &str) -> Result<Vec<Token<f64>>, String> {
    let mut tokens = Vec::new();
    let mut rest = text;
    let mut offset = 0usize;
    while !rest.is_empty() {
        let caps = TOKEN_RE
            .captures(rest)
            .ok_or_else(|| format!("unrecognised input at offset {}: {:?}", offset, rest))?;
        let whole = caps.get(0).unwrap();
        let len = whole.as_str().len();
        if let Some(num) = caps.name("num") {
            let value: f64 = num.as_str().parse().unwrap();
            tokens.push(Token::new(TerminalId(NUM), location_at(offset, len), value));
        } else if let Some(op) = caps.name("op") {
            let category = match op.as_str() {
                "+" => TerminalId(PLUS),
                "-" => TerminalId(MINUS),
                "*" => TerminalId(STAR),
                "/" => TerminalId(SLASH),
                "(" => TerminalId(LPAREN),
                ")" => TerminalId(RPAREN),
                _ => unreachable!(),
            };
            tokens.push(Token::new(category, location_at(offset, len), 0.0));
        }
        rest = &rest[len..];
        offset += len;
    }
    tokens.push(Token::new(TerminalId::EOI, location_at(offset, 0), 0.0));
    Ok(tokens)
}

#[derive(Debug, StructOpt)]
#[structopt(name = "calculator", about = "A four-function expression evaluator built on lalr_core", author = crate_authors!())]
struct CLOptions {
    /// Write the generated LALR table dump to this path before evaluating.
    #[structopt(short, long)]
    out_table: Option<std::path::PathBuf>,
    /// The expression to evaluate, e.g. "1 + 8 * 5".
    expression: String,
}

fn main() {
    let cl_options = CLOptions::from_args();

    let mut options = GeneratorOptions::new();
    if let Some(path) = cl_options.out_table {
        options = options.with_out_table(path);
    }

    let generated = match lalr_core::generate(arith_grammar(), &options) {
        Ok(generated) => generated,
        Err(error) => {
            eprintln!("failed to build parser: {}", error);
            std::process::exit(1);
        }
    };

    let tokens = match tokenize(&cl_options.expression) {
        Ok(tokens) => tokens,
        Err(error) => {
            eprintln!("{}", error);
            std::process::exit(2);
        }
    };

    let mut tokens = tokens.into_iter();
    let result = lalr_runtime::driver::parse(&generated.tables, || tokens.next().unwrap(), |message, token| {
        eprintln!("parse error: {} (at {:?})", message, token);
    });

    match result {
        Ok(value) => println!("{}", value),
        Err(error) => {
            eprintln!("{}", error);
            std::process::exit(3);
        }
    }
}
